//! Error types for Vantage operations.
//!
//! This module provides the main error type [`VantageError`]. Most renderer
//! paths never fail: uninteresting input (zero sizes, negligible deltas,
//! culled nodes) is ignored rather than reported.

use std::io;

use thiserror::Error;

use vantage_core::{identifier::Id, viewport::ViewportError};

use crate::observer::HostError;

/// The main error type for Vantage operations.
#[derive(Debug, Error)]
pub enum VantageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Viewport error: {0}")]
    Viewport(#[from] ViewportError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Unknown node `{0}`")]
    UnknownNode(Id),

    #[error("Duplicate node `{0}`")]
    DuplicateNode(Id),
}
