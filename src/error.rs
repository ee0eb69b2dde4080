//! Error types for the drawing kernel
//!
//! Validation failures are rejected before any scene mutation, so a failed
//! command never leaves the scene in a partially-mutated state. Unknown shape
//! ids are not errors; the scene operations report them as a `false` return
//! instead. Degenerate geometry (e.g. a collinear three-point circle) is not
//! an error either - it has defined fallback rasterization.

use thiserror::Error;

use crate::color::ColorParseError;

/// Result type alias for drawing kernel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the drawing kernel
#[derive(Error, Debug)]
pub enum Error {
  /// Geometry input rejected before scene mutation
  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),

  /// Color input could not be normalized
  #[error("color error: {0}")]
  Color(#[from] ColorParseError),
}

/// Validation errors for shape construction inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
  /// A curve or polygon was given fewer points than its minimum
  #[error("{kind} requires at least {needed} points, got {got}")]
  TooFewPoints {
    /// Human-readable shape kind name
    kind: &'static str,
    /// Minimum point count for this kind
    needed: usize,
    /// Point count actually supplied
    got: usize,
  },

  /// B-spline order must be at least 2 (degree at least 1)
  #[error("b-spline order must be at least 2, got {0}")]
  InvalidOrder(u32),

  /// Pen width must be at least 1
  #[error("pen width must be at least 1")]
  InvalidPenWidth,
}
