//! Error adapter for converting VantageError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use vantage::VantageError;

/// Adapter for [`VantageError`].
///
/// Vantage errors carry no source locations; the adapter adds an error
/// code and, where one applies, a hint for fixing the input.
pub struct ErrorAdapter<'a>(pub &'a VantageError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            VantageError::Io(_) => "vantage::io",
            VantageError::Viewport(_) => "vantage::viewport",
            VantageError::Host(_) => "vantage::host",
            VantageError::Config(_) => "vantage::config",
            VantageError::Scene(_) => "vantage::scene",
            VantageError::UnknownNode(_) => "vantage::unknown_node",
            VantageError::DuplicateNode(_) => "vantage::duplicate_node",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            VantageError::Viewport(_) => "zoom must be a finite number greater than zero",
            VantageError::Config(_) => {
                "check the [virtualization] and [resize] sections of the configuration file"
            }
            VantageError::Scene(_) => {
                "scenes contain [viewport], [[nodes]] and [[steps]] tables; every step needs an `action`"
            }
            VantageError::UnknownNode(_) => "steps may only refer to nodes declared in [[nodes]]",
            VantageError::DuplicateNode(_) => "node ids must be unique within a scene",
            VantageError::Io(_) | VantageError::Host(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap a [`VantageError`] for rendering with miette.
pub fn to_reportable(err: &VantageError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
