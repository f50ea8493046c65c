//! Geometric primitives and the logical ↔ preview coordinate mapper.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate, either in logical drawing space or in pixels
//! - [`Size`] - Width and height dimensions
//! - [`Viewport`] - The fixed affine transform between the two spaces
//!
//! # Coordinate Systems
//!
//! Logical coordinates are the ones written in TikZ source: origin-centered,
//! Y increasing upward. Preview coordinates are pixels on the rendering
//! surface: origin at the top-left, Y increasing downward.
//!
//! ```text
//!   logical              preview
//!
//!      +Y                (0,0) ────────► +X
//!       ▲                  │
//!       │                  │
//!   ────┼────► +X          │
//!       │                  ▼
//!                         +Y
//! ```
//!
//! The [`Viewport`] maps between them with a uniform scale and a Y flip.

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use tikzsync_core::geometry::Point;
/// let p1 = Point::new(1.0, 2.0);
/// let p2 = Point::new(3.0, 4.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 4.0);
/// assert_eq!(sum.y(), 6.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
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
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns true if both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }
}

/// The geometry mapper between logical drawing coordinates and preview pixels.
///
/// `pixel_x = origin_x + logical_x * scale` and
/// `pixel_y = origin_y - logical_y * scale`. A viewport is fixed for the
/// lifetime of an editing session; there is no pan or zoom state.
///
/// # Examples
///
/// ```
/// # use tikzsync_core::geometry::{Point, Size, Viewport};
/// let viewport = Viewport::new(Size::new(400.0, 300.0), 50.0);
///
/// let pixel = viewport.to_pixel(Point::new(1.0, 1.0));
/// assert_eq!(pixel, Point::new(250.0, 100.0));
///
/// let logical = viewport.to_logical(pixel);
/// assert_eq!(logical, Point::new(1.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    size: Size,
    origin: Point,
    scale: f64,
}

impl Viewport {
    /// Default preview canvas width in pixels.
    pub const DEFAULT_WIDTH: f64 = 500.0;
    /// Default preview canvas height in pixels.
    pub const DEFAULT_HEIGHT: f64 = 400.0;
    /// Default number of pixels per logical unit.
    pub const DEFAULT_SCALE: f64 = 40.0;

    /// Creates a viewport of the given canvas size with the logical origin at
    /// the canvas center.
    pub fn new(size: Size, scale: f64) -> Self {
        let origin = Point::new(size.width() / 2.0, size.height() / 2.0);
        Self::with_origin(size, origin, scale)
    }

    /// Creates a viewport with an explicit pixel position for the logical origin.
    pub fn with_origin(size: Size, origin: Point, scale: f64) -> Self {
        Self {
            size,
            origin,
            scale,
        }
    }

    /// Returns the canvas size in pixels
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the pixel position of the logical origin
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the number of pixels per logical unit
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a logical point to preview pixels.
    pub fn to_pixel(&self, logical: Point) -> Point {
        Point::new(
            self.origin.x() + logical.x() * self.scale,
            self.origin.y() - logical.y() * self.scale,
        )
    }

    /// Maps a preview pixel back to logical coordinates.
    pub fn to_logical(&self, pixel: Point) -> Point {
        Point::new(
            (pixel.x() - self.origin.x()) / self.scale,
            (self.origin.y() - pixel.y()) / self.scale,
        )
    }

    /// Maps a logical length (a radius, a width) to pixels.
    pub fn to_pixel_length(&self, length: f64) -> f64 {
        length * self.scale
    }

    /// Returns the logical x-range visible on the canvas.
    pub fn logical_x_range(&self) -> (f64, f64) {
        let left = self.to_logical(Point::new(0.0, 0.0)).x();
        let right = self.to_logical(Point::new(self.size.width(), 0.0)).x();
        (left, right)
    }

    /// Returns the logical y-range visible on the canvas, bottom first.
    pub fn logical_y_range(&self) -> (f64, f64) {
        let bottom = self.to_logical(Point::new(0.0, self.size.height())).y();
        let top = self.to_logical(Point::new(0.0, 0.0)).y();
        (bottom, top)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            Size::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            Self::DEFAULT_SCALE,
        )
    }
}
