//! Viewport state and the diagram-to-screen projection.
//!
//! The [`Viewport`] is the pan/zoom transform applied to diagram coordinates
//! plus the size of the container the diagram is drawn into. Its
//! [`Viewport::is_visible`] test is what virtualization uses to decide
//! whether a node is drawn at all.

use thiserror::Error;

use crate::geometry::{Bounds, Point, Size};

/// Errors raised when building a viewport from untrusted values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    #[error("zoom must be finite and greater than zero, got {0}")]
    InvalidZoom(f32),
}

/// Pan offset, zoom factor and container size of a diagram surface.
///
/// `container` is `None` until the host reports the container size.
///
/// # Examples
///
/// ```
/// # use vantage_core::geometry::{Point, Size};
/// # use vantage_core::viewport::Viewport;
/// let viewport = Viewport::default()
///     .with_zoom(2.0)
///     .unwrap()
///     .with_pan(Point::new(10.0, 0.0))
///     .with_container(Size::new(800.0, 600.0));
///
/// let screen = viewport.to_screen(Point::new(5.0, 5.0), Size::new(20.0, 10.0));
/// assert_eq!(screen.min_x(), 20.0);
/// assert_eq!(screen.max_x(), 60.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pan: Point,
    zoom: f32,
    container: Option<Size>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Point::default(),
            zoom: 1.0,
            container: None,
        }
    }
}

impl Viewport {
    /// Returns the pan offset in screen pixels
    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Returns the zoom factor
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Returns the container size, if the host reported one
    pub fn container(&self) -> Option<Size> {
        self.container
    }

    /// Returns a copy with the given pan offset.
    pub fn with_pan(mut self, pan: Point) -> Self {
        self.pan = pan;
        self
    }

    /// Returns a copy with the given zoom factor.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidZoom`] if `zoom` is not finite or not
    /// strictly positive.
    pub fn with_zoom(mut self, zoom: f32) -> Result<Self, ViewportError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(ViewportError::InvalidZoom(zoom));
        }
        self.zoom = zoom;
        Ok(self)
    }

    /// Returns a copy with the given container size.
    pub fn with_container(mut self, container: Size) -> Self {
        self.container = Some(container);
        self
    }

    /// Projects a diagram-space box (top-left position and size) to screen space.
    pub fn to_screen(&self, position: Point, size: Size) -> Bounds {
        let top_left = position.scale(self.zoom).add_point(self.pan);
        Bounds::new_from_top_left(top_left, size.scale(self.zoom))
    }

    /// Converts a screen-space size to diagram space.
    pub fn size_to_diagram(&self, screen_size: Size) -> Size {
        screen_size.scale(1.0 / self.zoom)
    }

    /// Returns whether a diagram-space box intersects the container.
    ///
    /// Returns `None` when the container size is unknown.
    pub fn is_visible(&self, position: Point, size: Size) -> Option<bool> {
        let container = self.container?;
        Some(self.to_screen(position, size).intersects_area(container))
    }
}
