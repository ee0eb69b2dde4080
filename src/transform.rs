//! 2D affine transforms
//!
//! Every shape in the scene carries one [`AffineTransform`] accumulating all
//! edits applied since its creation. Translate/rotate/scale commands never
//! rewrite local geometry; they compose a new factor onto this matrix.
//!
//! Coefficients follow the 2×3 convention:
//!
//! ```text
//! [a c tx]
//! [b d ty]
//! [0 0  1]
//! ```
//!
//! mapping `(x, y) ↦ (a·x + c·y + tx, b·x + d·y + ty)`.
//!
//! All inputs are assumed finite; NaN and infinity propagate silently through
//! `apply` and `compose`, so guarding against them is the caller's
//! responsibility.

use serde::Serialize;

use crate::geometry::Point;

/// A 2×3 affine transform matrix
///
/// # Examples
///
/// ```
/// use drawkit::{AffineTransform, Point};
///
/// let t = AffineTransform::translation(10.0, 5.0);
/// assert_eq!(t.apply(Point::ZERO), Point::new(10.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AffineTransform {
  /// Scale X (m11)
  pub a: f32,
  /// Skew Y (m12)
  pub b: f32,
  /// Skew X (m21)
  pub c: f32,
  /// Scale Y (m22)
  pub d: f32,
  /// Translate X
  pub tx: f32,
  /// Translate Y
  pub ty: f32,
}

impl AffineTransform {
  /// The identity transform (no transformation)
  pub const IDENTITY: Self = Self {
    a: 1.0,
    b: 0.0,
    c: 0.0,
    d: 1.0,
    tx: 0.0,
    ty: 0.0,
  };

  /// Creates the identity transform
  pub fn identity() -> Self {
    Self::IDENTITY
  }

  /// Creates a translation transform
  pub fn translation(dx: f32, dy: f32) -> Self {
    Self {
      a: 1.0,
      b: 0.0,
      c: 0.0,
      d: 1.0,
      tx: dx,
      ty: dy,
    }
  }

  /// Creates a rotation transform
  ///
  /// # Arguments
  ///
  /// * `theta` - Rotation angle in radians, counter-clockwise in a
  ///   y-up frame (and clockwise on a y-down canvas)
  pub fn rotation(theta: f32) -> Self {
    let cos = theta.cos();
    let sin = theta.sin();
    Self {
      a: cos,
      b: sin,
      c: -sin,
      d: cos,
      tx: 0.0,
      ty: 0.0,
    }
  }

  /// Creates a scale transform
  pub fn scale(sx: f32, sy: f32) -> Self {
    Self {
      a: sx,
      b: 0.0,
      c: 0.0,
      d: sy,
      tx: 0.0,
      ty: 0.0,
    }
  }

  /// Applies this transform to a point
  pub fn apply(&self, p: Point) -> Point {
    Point {
      x: self.a * p.x + self.c * p.y + self.tx,
      y: self.b * p.x + self.d * p.y + self.ty,
    }
  }

  /// Composes two transforms (matrix product `self ∘ other`)
  ///
  /// The result represents applying `other` first, then `self`. Composition
  /// is associative but not commutative.
  ///
  /// # Examples
  ///
  /// ```
  /// use drawkit::{AffineTransform, Point};
  ///
  /// let scale = AffineTransform::scale(2.0, 2.0);
  /// let shift = AffineTransform::translation(10.0, 0.0);
  /// // Scale first, then shift
  /// let combined = shift.compose(&scale);
  /// assert_eq!(combined.apply(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
  /// ```
  #[allow(clippy::suspicious_operation_groupings)]
  pub fn compose(&self, other: &AffineTransform) -> AffineTransform {
    // Standard 2D affine matrix multiplication:
    // [a c tx]   [a' c' tx']   [a*a'+c*b'  a*c'+c*d'  a*tx'+c*ty'+tx]
    // [b d ty] * [b' d' ty'] = [b*a'+d*b'  b*c'+d*d'  b*tx'+d*ty'+ty]
    // [0 0  1]   [0  0   1 ]   [0          0          1             ]
    AffineTransform {
      a: self.a * other.a + self.c * other.b,
      b: self.b * other.a + self.d * other.b,
      c: self.a * other.c + self.c * other.d,
      d: self.b * other.c + self.d * other.d,
      tx: self.a * other.tx + self.c * other.ty + self.tx,
      ty: self.b * other.tx + self.d * other.ty + self.ty,
    }
  }

  /// Check if this is the identity transform
  pub fn is_identity(&self) -> bool {
    *self == Self::IDENTITY
  }
}

impl Default for AffineTransform {
  fn default() -> Self {
    Self::IDENTITY
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_point_close(a: Point, b: Point) {
    assert!((a.x - b.x).abs() < 1e-3, "{} vs {}", a, b);
    assert!((a.y - b.y).abs() < 1e-3, "{} vs {}", a, b);
  }

  #[test]
  fn test_identity_apply() {
    let p = Point::new(3.5, -7.25);
    assert_eq!(AffineTransform::identity().apply(p), p);
  }

  #[test]
  fn test_translation() {
    let t = AffineTransform::translation(5.0, -2.0);
    assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(6.0, -1.0));
  }

  #[test]
  fn test_rotation_quarter_turn() {
    let t = AffineTransform::rotation(std::f32::consts::FRAC_PI_2);
    assert_point_close(t.apply(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
  }

  #[test]
  fn test_scale() {
    let t = AffineTransform::scale(2.0, 3.0);
    assert_eq!(t.apply(Point::new(2.0, 2.0)), Point::new(4.0, 6.0));
  }

  #[test]
  fn test_compose_order_matters() {
    let scale = AffineTransform::scale(2.0, 2.0);
    let shift = AffineTransform::translation(10.0, 0.0);
    let scale_then_shift = shift.compose(&scale);
    let shift_then_scale = scale.compose(&shift);
    let p = Point::new(1.0, 0.0);
    assert_eq!(scale_then_shift.apply(p), Point::new(12.0, 0.0));
    assert_eq!(shift_then_scale.apply(p), Point::new(22.0, 0.0));
  }

  #[test]
  fn test_compose_associative() {
    let a = AffineTransform::rotation(0.3);
    let b = AffineTransform::scale(1.5, 0.75);
    let c = AffineTransform::translation(-4.0, 9.0);
    let left = a.compose(&b).compose(&c);
    let right = a.compose(&b.compose(&c));
    for p in [
      Point::ZERO,
      Point::new(1.0, 1.0),
      Point::new(-17.0, 42.5),
      Point::new(300.0, -120.0),
    ] {
      assert_point_close(left.apply(p), right.apply(p));
    }
  }

  #[test]
  fn test_identity_is_neutral() {
    let t = AffineTransform::rotation(1.0).compose(&AffineTransform::translation(3.0, 4.0));
    assert_eq!(t.compose(&AffineTransform::IDENTITY), t);
    assert_eq!(AffineTransform::IDENTITY.compose(&t), t);
  }
}
