//! Configuration types for Vantage node rendering.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! any serde format. Every section and field is optional and falls back to
//! its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`VirtualizationConfig`] - Controls viewport culling of nodes.
//! - [`ResizeConfig`] - Controls how host size reports are applied.
//!
//! # Example
//!
//! ```
//! # use vantage::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.virtualization().enabled());
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use crate::error::VantageError;

const DEFAULT_RESIZE_TOLERANCE: f32 = 0.0001;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Virtualization section.
    #[serde(default)]
    virtualization: VirtualizationConfig,

    /// Resize section.
    #[serde(default)]
    resize: ResizeConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `virtualization` - Viewport culling settings.
    /// * `resize` - Size report settings.
    pub fn new(virtualization: VirtualizationConfig, resize: ResizeConfig) -> Self {
        Self {
            virtualization,
            resize,
        }
    }

    /// Returns the virtualization configuration.
    pub fn virtualization(&self) -> &VirtualizationConfig {
        &self.virtualization
    }

    /// Returns the resize configuration.
    pub fn resize(&self) -> &ResizeConfig {
        &self.resize
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::Config`] if the resize tolerance is negative
    /// or not finite.
    pub fn validate(&self) -> Result<(), VantageError> {
        let tolerance = self.resize.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(VantageError::Config(format!(
                "resize tolerance must be a finite, non-negative number, got {tolerance}"
            )));
        }
        Ok(())
    }
}

/// Viewport culling configuration.
///
/// When enabled, nodes whose screen box falls outside the container are not
/// drawn.
#[derive(Debug, Clone, Deserialize)]
pub struct VirtualizationConfig {
    #[serde(default = "default_enabled")]
    enabled: bool,
}

impl VirtualizationConfig {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns whether culling is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for VirtualizationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Host size report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ResizeConfig {
    /// Diagram-space delta below which a reported size counts as unchanged.
    #[serde(default = "default_tolerance")]
    tolerance: f32,
}

impl ResizeConfig {
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    /// Returns the size comparison tolerance.
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

fn default_tolerance() -> f32 {
    DEFAULT_RESIZE_TOLERANCE
}
