//! CLI logic for the Vantage scene player.
//!
//! This module contains the core CLI logic: it loads a scene fixture,
//! replays it through a headless host and writes the event log and the
//! resulting node markup.

pub mod error_adapter;
pub mod scene;
pub mod stage;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::Write};

use log::info;

use vantage::VantageError;

use scene::Scene;
use stage::Stage;

/// Run the Vantage CLI application
///
/// This function replays the input scene and writes the report to the
/// output file, or to stdout when no output path is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `VantageError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing errors
/// - Steps referring to unknown nodes
/// - Invalid zoom values
pub fn run(args: &Args) -> Result<(), VantageError> {
    info!(input_path = args.input; "Replaying scene");

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read and parse the scene
    let source = fs::read_to_string(&args.input)?;
    let scene = Scene::parse(&source)?;

    // Replay
    let mut stage = Stage::new(&app_config, &scene)?;
    stage.play(&scene)?;
    let report = stage.report();

    match &args.output {
        Some(output) => {
            fs::write(output, report)?;
            info!(output_file = output; "Report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
