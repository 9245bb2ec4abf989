//! Geometric primitives for node placement and viewport projection.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate, either in diagram space or screen space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Vantage uses the same orientation for diagram space and screen space:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Diagram space is unscaled. Screen space is diagram space scaled by the
//! viewport zoom and then translated by the viewport pan, see
//! [`Viewport`](crate::viewport::Viewport).

use std::fmt;

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use vantage_core::geometry::Point;
/// let position = Point::new(100.0, 50.0);
/// let offset = Point::new(10.0, -5.0);
///
/// let moved = position.add_point(offset);
/// assert_eq!(moved.x(), 110.0);
/// assert_eq!(moved.y(), 45.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Converts this top-left point and a size into a bounds rectangle
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// A size with zero width and zero height.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Returns true if both dimensions differ from `other` by less than `tolerance`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vantage_core::geometry::Size;
    /// let a = Size::new(50.0, 20.0);
    /// assert!(a.almost_eq(Size::new(50.00001, 20.0), 0.0001));
    /// assert!(!a.almost_eq(Size::new(50.1, 20.0), 0.0001));
    /// ```
    pub fn almost_eq(self, other: Size, tolerance: f32) -> bool {
        (self.width - other.width).abs() < tolerance
            && (self.height - other.height).abs() < tolerance
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangular box with minimum and maximum coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns true if this box overlaps the half-open area `[0, width) x [0, height)`.
    ///
    /// Edges that merely touch the area do not count as overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vantage_core::geometry::{Bounds, Point, Size};
    /// let area = Size::new(800.0, 600.0);
    ///
    /// let inside = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(50.0, 50.0));
    /// assert!(inside.intersects_area(area));
    ///
    /// let touching = Bounds::new_from_top_left(Point::new(800.0, 10.0), Size::new(50.0, 50.0));
    /// assert!(!touching.intersects_area(area));
    /// ```
    pub fn intersects_area(self, area: Size) -> bool {
        self.max_x > 0.0 && self.min_x < area.width && self.max_y > 0.0 && self.min_y < area.height
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::{approx_eq, assert_approx_eq};
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default_is_zero() {
        assert!(Point::default().is_zero());
        assert!(!Point::new(1.0, 0.0).is_zero());
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 4.0);

        let sum = p1.add_point(p2);
        assert_eq!(sum, Point::new(4.0, 6.0));

        let diff = sum.sub_point(p2);
        assert_eq!(diff, p1);
    }

    #[test]
    fn test_point_to_bounds_uses_top_left() {
        let bounds = Point::new(10.0, 20.0).to_bounds(Size::new(30.0, 40.0));
        assert_approx_eq!(f32, bounds.min_x(), 10.0);
        assert_approx_eq!(f32, bounds.min_y(), 20.0);
        assert_approx_eq!(f32, bounds.max_x(), 40.0);
        assert_approx_eq!(f32, bounds.max_y(), 60.0);
    }

    #[test]
    fn test_size_zero() {
        assert!(Size::ZERO.is_zero());
        assert!(Size::default().is_zero());
        assert!(!Size::new(0.0, 1.0).is_zero());
        assert!(!Size::new(1.0, 0.0).is_zero());
    }

    #[test]
    fn test_size_scale() {
        let size = Size::new(100.0, 40.0).scale(0.5);
        assert_approx_eq!(f32, size.width(), 50.0);
        assert_approx_eq!(f32, size.height(), 20.0);
    }

    #[test]
    fn test_size_almost_eq() {
        let size = Size::new(10.0, 10.0);
        assert!(size.almost_eq(size, 0.0001));
        assert!(size.almost_eq(Size::new(10.00005, 9.99995), 0.0001));
        assert!(!size.almost_eq(Size::new(10.001, 10.0), 0.0001));
        assert!(!size.almost_eq(Size::new(10.0, 10.001), 0.0001));
    }

    #[test]
    fn test_bounds_dimensions() {
        let bounds = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(20.0, 10.0));
        assert_approx_eq!(f32, bounds.width(), 20.0);
        assert_approx_eq!(f32, bounds.height(), 10.0);
        assert_eq!(bounds.min_point(), Point::new(5.0, 5.0));
        assert_eq!(bounds.to_size(), Size::new(20.0, 10.0));
    }

    #[test]
    fn test_bounds_intersects_area() {
        let area = Size::new(100.0, 100.0);
        let boxed = |x: f32, y: f32| Bounds::new_from_top_left(Point::new(x, y), Size::new(10.0, 10.0));

        assert!(boxed(0.0, 0.0).intersects_area(area));
        assert!(boxed(-5.0, -5.0).intersects_area(area));
        assert!(boxed(95.0, 95.0).intersects_area(area));

        // Touching edges are outside
        assert!(!boxed(-10.0, 50.0).intersects_area(area));
        assert!(!boxed(50.0, -10.0).intersects_area(area));
        assert!(!boxed(100.0, 50.0).intersects_area(area));
        assert!(!boxed(50.0, 100.0).intersects_area(area));
    }

    #[test]
    fn test_bounds_intersects_empty_area() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        assert!(!bounds.intersects_area(Size::ZERO));
    }

    // ===================
    // Property checks
    // ===================

    fn coord_strategy() -> impl Strategy<Value = f32> {
        -1000.0f32..1000.0f32
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..500.0f32, 0.0f32..500.0f32).prop_map(|(w, h)| Size::new(w, h))
    }

    fn check_bounds_keep_size(x: f32, y: f32, size: Size) -> Result<(), TestCaseError> {
        let bounds = Point::new(x, y).to_bounds(size);
        prop_assert!(approx_eq!(f32, bounds.width(), size.width(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, bounds.height(), size.height(), epsilon = 0.001));
        Ok(())
    }

    fn check_intersection_is_translation_sensitive(
        size: Size,
        area: Size,
    ) -> Result<(), TestCaseError> {
        // A box pushed fully past the right edge never intersects.
        let bounds = Point::new(area.width(), 0.0).to_bounds(size);
        prop_assert!(!bounds.intersects_area(area));
        Ok(())
    }

    proptest! {
        #[test]
        fn bounds_keep_size(x in coord_strategy(), y in coord_strategy(), size in size_strategy()) {
            check_bounds_keep_size(x, y, size)?;
        }

        #[test]
        fn box_past_right_edge_is_outside(size in size_strategy(), area in size_strategy()) {
            check_intersection_is_translation_sensitive(size, area)?;
        }
    }
}
