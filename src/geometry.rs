//! Core geometry types for the drawing kernel
//!
//! This module provides the fundamental geometric primitives used throughout
//! the kernel. Local-space shape geometry uses `f32` coordinates; rasterized
//! output is pixel-snapped to `i32` (see [`crate::raster`]).
//!
//! # Coordinate System
//!
//! The coordinate system has its origin at the top-left corner of the canvas:
//! - Positive X extends to the right
//! - Positive Y extends downward

use std::fmt;

use serde::Serialize;

/// A 2D point in canvas space
///
/// # Examples
///
/// ```
/// use drawkit::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(p.y, 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
  /// X coordinate (horizontal position, increases to the right)
  pub x: f32,
  /// Y coordinate (vertical position, increases downward)
  pub y: f32,
}

impl Point {
  /// The zero point at the origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Rounds both coordinates to the nearest integer pixel
  ///
  /// # Examples
  ///
  /// ```
  /// use drawkit::Point;
  ///
  /// assert_eq!(Point::new(1.4, 2.6).round(), (1, 3));
  /// ```
  pub fn round(self) -> (i32, i32) {
    (self.x.round() as i32, self.y.round() as i32)
  }

  /// Computes the Euclidean distance to another point
  pub fn distance_to(self, other: Point) -> f32 {
    let dx = other.x - self.x;
    let dy = other.y - self.y;
    (dx * dx + dy * dy).sqrt()
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

impl From<(f32, f32)> for Point {
  fn from((x, y): (f32, f32)) -> Self {
    Self { x, y }
  }
}

/// An axis-aligned rectangle in canvas space
///
/// Stored in normalized min/max form so it can be built from any two
/// opposite corners regardless of their order. This is the window type
/// consumed by the clipping routines in [`crate::clip`].
///
/// # Examples
///
/// ```
/// use drawkit::{Point, Rect};
///
/// // Corners may be given in any order
/// let r = Rect::from_corners(Point::new(50.0, 70.0), Point::new(10.0, 20.0));
/// assert_eq!(r.min_x, 10.0);
/// assert_eq!(r.max_y, 70.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
  /// Left edge
  pub min_x: f32,
  /// Top edge
  pub min_y: f32,
  /// Right edge
  pub max_x: f32,
  /// Bottom edge
  pub max_y: f32,
}

impl Rect {
  /// Creates a rectangle from two opposite corners, normalizing their order
  pub fn from_corners(a: Point, b: Point) -> Self {
    Self {
      min_x: a.x.min(b.x),
      min_y: a.y.min(b.y),
      max_x: a.x.max(b.x),
      max_y: a.y.max(b.y),
    }
  }

  /// Returns the width of the rectangle
  pub fn width(&self) -> f32 {
    self.max_x - self.min_x
  }

  /// Returns the height of the rectangle
  pub fn height(&self) -> f32 {
    self.max_y - self.min_y
  }

  /// Returns true if the point lies inside or on the boundary
  pub fn contains(&self, p: Point) -> bool {
    p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
  }
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "[{}, {}]-[{}, {}]",
      self.min_x, self.min_y, self.max_x, self.max_y
    )
  }
}
