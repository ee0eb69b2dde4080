//! Parametric curve evaluation: Bézier and B-spline
//!
//! Both evaluators commute with affine maps (de Casteljau and the B-spline
//! basis are convex combinations of control points), so callers transform
//! control points to world space once and evaluate there instead of
//! transforming every sampled point.

use crate::geometry::Point;

/// Linear interpolation between two points
fn lerp(a: Point, b: Point, t: f32) -> Point {
  Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Evaluates a Bézier curve of arbitrary degree at parameter `t` via
/// repeated linear interpolation (de Casteljau)
pub fn bezier_point(control: &[Point], t: f32) -> Point {
  debug_assert!(control.len() >= 2);
  let mut work = control.to_vec();
  let mut n = work.len();
  while n > 1 {
    for i in 0..n - 1 {
      work[i] = lerp(work[i], work[i + 1], t);
    }
    n -= 1;
  }
  work[0]
}

/// Samples a Bézier curve at evenly spaced parameters in [0, 1]
///
/// Sample count is `max(32, 50·control_count)`, dense enough that rounding
/// the samples yields a gap-free pixel path at canvas scale.
pub fn sample_bezier(control: &[Point]) -> Vec<Point> {
  let samples = (control.len() * 50).max(32);
  (0..samples)
    .map(|i| {
      let t = (i as f32) / ((samples - 1) as f32);
      bezier_point(control, t)
    })
    .collect()
}

/// Builds the clamped uniform knot vector for `control_count` points of the
/// given degree
///
/// The vector has length `control_count + degree + 1`; the first and last
/// `degree + 1` knots are clamped to 0 and 1, interior knots are evenly
/// spaced. Clamping makes the curve interpolate its first and last control
/// points.
pub fn clamped_knot_vector(control_count: usize, degree: usize) -> Vec<f32> {
  let len = control_count + degree + 1;
  let interior = control_count - degree;
  let mut knots = Vec::with_capacity(len);
  for i in 0..len {
    if i <= degree {
      knots.push(0.0);
    } else if i >= control_count {
      knots.push(1.0);
    } else {
      knots.push((i - degree) as f32 / interior as f32);
    }
  }
  knots
}

/// Cox-de Boor recursive basis function `N_{i,p}(t)`
fn basis(i: usize, p: usize, t: f32, knots: &[f32]) -> f32 {
  if p == 0 {
    // Half-open span, except the final span which closes at t = 1
    return if (knots[i] <= t && t < knots[i + 1])
      || (t >= 1.0 && knots[i] < knots[i + 1] && knots[i + 1] >= 1.0)
    {
      1.0
    } else {
      0.0
    };
  }

  let mut value = 0.0;
  let left_den = knots[i + p] - knots[i];
  if left_den > 0.0 {
    value += (t - knots[i]) / left_den * basis(i, p - 1, t, knots);
  }
  let right_den = knots[i + p + 1] - knots[i + 1];
  if right_den > 0.0 {
    value += (knots[i + p + 1] - t) / right_den * basis(i + 1, p - 1, t, knots);
  }
  value
}

/// Evaluates a clamped uniform B-spline at parameter `t`
///
/// The position is the weighted sum of control points under the Cox-de Boor
/// basis functions. Requires `control.len() > degree`, which shape
/// validation guarantees.
pub fn bspline_point(control: &[Point], degree: usize, knots: &[f32], t: f32) -> Point {
  let mut x = 0.0;
  let mut y = 0.0;
  for (i, p) in control.iter().enumerate() {
    let w = basis(i, degree, t, knots);
    x += w * p.x;
    y += w * p.y;
  }
  Point::new(x, y)
}

/// Samples a clamped uniform B-spline at evenly spaced parameters in [0, 1]
///
/// Sample count is `max(64, 50·control_count)`.
pub fn sample_bspline(control: &[Point], degree: usize) -> Vec<Point> {
  let knots = clamped_knot_vector(control.len(), degree);
  let samples = (control.len() * 50).max(64);
  (0..samples)
    .map(|i| {
      let t = (i as f32) / ((samples - 1) as f32);
      bspline_point(control, degree, &knots, t)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn close(a: Point, b: Point) -> bool {
    a.distance_to(b) < 1e-3
  }

  #[test]
  fn test_bezier_endpoints() {
    let control = [
      Point::new(0.0, 0.0),
      Point::new(10.0, 20.0),
      Point::new(30.0, -5.0),
    ];
    assert!(close(bezier_point(&control, 0.0), control[0]));
    assert!(close(bezier_point(&control, 1.0), control[2]));
  }

  #[test]
  fn test_bezier_linear_is_lerp() {
    let control = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
    assert!(close(bezier_point(&control, 0.5), Point::new(5.0, 5.0)));
  }

  #[test]
  fn test_quadratic_midpoint() {
    // B(0.5) = 0.25·P0 + 0.5·P1 + 0.25·P2
    let control = [
      Point::new(0.0, 0.0),
      Point::new(4.0, 8.0),
      Point::new(8.0, 0.0),
    ];
    assert!(close(bezier_point(&control, 0.5), Point::new(4.0, 4.0)));
  }

  #[test]
  fn test_sample_counts() {
    let two = [Point::ZERO, Point::new(1.0, 0.0)];
    assert_eq!(sample_bezier(&two).len(), 100);
    assert_eq!(sample_bspline(&two, 1).len(), 100);
  }

  #[test]
  fn test_clamped_knot_vector() {
    // 4 control points, degree 3: all knots clamped
    assert_eq!(
      clamped_knot_vector(4, 3),
      vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]
    );
    // 6 control points, degree 2: two evenly spaced interior knots
    let knots = clamped_knot_vector(6, 2);
    assert_eq!(knots.len(), 9);
    assert_eq!(&knots[..3], &[0.0, 0.0, 0.0]);
    assert!((knots[3] - 0.25).abs() < 1e-6);
    assert!((knots[4] - 0.5).abs() < 1e-6);
    assert!((knots[5] - 0.75).abs() < 1e-6);
    assert_eq!(&knots[6..], &[1.0, 1.0, 1.0]);
  }

  #[test]
  fn test_basis_partition_of_unity() {
    let control = [
      Point::new(0.0, 0.0),
      Point::new(1.0, 2.0),
      Point::new(3.0, 2.0),
      Point::new(4.0, 0.0),
      Point::new(6.0, 1.0),
    ];
    let degree = 3;
    let knots = clamped_knot_vector(control.len(), degree);
    for t in [0.0, 0.1, 0.33, 0.5, 0.77, 0.99, 1.0] {
      let sum: f32 = (0..control.len()).map(|i| basis(i, degree, t, &knots)).sum();
      assert!((sum - 1.0).abs() < 1e-4, "sum at t={} was {}", t, sum);
    }
  }

  #[test]
  fn test_endpoint_basis_with_interior_knots() {
    // 5 control points at degree 3 puts one interior knot in the vector;
    // at t = 1 only the final span may contribute
    let control = [
      Point::new(0.0, 0.0),
      Point::new(1.0, 2.0),
      Point::new(3.0, 2.0),
      Point::new(4.0, 0.0),
      Point::new(6.0, 1.0),
    ];
    let degree = 3;
    let knots = clamped_knot_vector(control.len(), degree);
    let sum: f32 = (0..control.len())
      .map(|i| basis(i, degree, 1.0, &knots))
      .sum();
    assert!((sum - 1.0).abs() < 1e-4, "sum at t=1 was {}", sum);
    assert!(close(
      bspline_point(&control, degree, &knots, 1.0),
      control[4]
    ));
  }

  #[test]
  fn test_bspline_clamped_endpoints() {
    let control = [
      Point::new(0.0, 0.0),
      Point::new(1.0, 2.0),
      Point::new(3.0, 2.0),
      Point::new(4.0, 0.0),
    ];
    let samples = sample_bspline(&control, 3);
    assert!(close(samples[0], control[0]));
    assert!(close(*samples.last().unwrap(), control[3]));
  }

  #[test]
  fn test_degree_one_bspline_is_polyline() {
    let control = [
      Point::new(0.0, 0.0),
      Point::new(10.0, 0.0),
      Point::new(10.0, 10.0),
    ];
    let knots = clamped_knot_vector(control.len(), 1);
    // Midpoint of the first span
    assert!(close(
      bspline_point(&control, 1, &knots, 0.25),
      Point::new(5.0, 0.0)
    ));
  }
}
