//! Vantage CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use vantage_cli::{Args, error_adapter::to_reportable};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Parse configuration first
    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?, scene = args.input.as_str(); "Starting Vantage");
    debug!(args:?; "Parsed arguments");

    // Replay the scene
    if let Err(err) = vantage_cli::run(&args) {
        // Render the error as a single diagnostic
        let mut report = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut report, &to_reportable(&err))
            .expect("Writing to String buffer is infallible");

        error!(scene = args.input.as_str(); "{report}");
        process::exit(1);
    }

    match &args.output {
        Some(output) => info!(output = output.as_str(); "Report written"),
        None => info!("Completed successfully"),
    }
}
