//! Circumcircle and arc sampling
//!
//! Circles and arcs are defined by three boundary points. The circumcenter
//! is solved with the standard determinant formula; collinear input makes
//! the determinant vanish and is handled by the caller with a line fallback
//! (degenerate geometry is never an error).

use std::f32::consts::TAU;

use crate::geometry::Point;

/// Determinant magnitude below which three points count as collinear
pub const COLLINEAR_EPS: f32 = 1e-9;

/// Sampling bounds for circle and arc outlines
const MIN_SAMPLES: u32 = 16;
const MAX_SAMPLES: u32 = 2000;

/// Solves the circumcircle of three points
///
/// Returns the center and radius of the unique circle through the points,
/// or `None` when they are collinear (or coincident).
///
/// # Examples
///
/// ```
/// use drawkit::raster::circle::circumcircle;
/// use drawkit::Point;
///
/// let (c, r) = circumcircle(
///   Point::new(1.0, 0.0),
///   Point::new(0.0, 1.0),
///   Point::new(-1.0, 0.0),
/// )
/// .unwrap();
/// assert!((c.x.abs()) < 1e-5 && (c.y.abs()) < 1e-5);
/// assert!((r - 1.0).abs() < 1e-5);
/// ```
pub fn circumcircle(p0: Point, p1: Point, p2: Point) -> Option<(Point, f32)> {
  let (x1, y1) = (p0.x, p0.y);
  let (x2, y2) = (p1.x, p1.y);
  let (x3, y3) = (p2.x, p2.y);

  let d = 2.0 * (x1 * (y2 - y3) + x2 * (y3 - y1) + x3 * (y1 - y2));
  if d.abs() < COLLINEAR_EPS {
    return None;
  }

  let sq1 = x1 * x1 + y1 * y1;
  let sq2 = x2 * x2 + y2 * y2;
  let sq3 = x3 * x3 + y3 * y3;
  let cx = (sq1 * (y2 - y3) + sq2 * (y3 - y1) + sq3 * (y1 - y2)) / d;
  let cy = (sq1 * (x3 - x2) + sq2 * (x1 - x3) + sq3 * (x2 - x1)) / d;
  let center = Point::new(cx, cy);

  Some((center, center.distance_to(p0)))
}

/// Number of outline samples for an angular span of `sweep` radians at
/// radius `r`, proportional to arc length and clamped to [16, 2000]
fn sample_count(sweep: f32, r: f32) -> u32 {
  ((sweep.abs() * r).round() as u32).clamp(MIN_SAMPLES, MAX_SAMPLES)
}

/// Samples a full circle outline evenly in local space
pub fn sample_circle(center: Point, r: f32) -> Vec<Point> {
  let n = sample_count(TAU, r);
  (0..n)
    .map(|i| {
      let angle = TAU * (i as f32) / (n as f32);
      Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
    })
    .collect()
}

/// Normalizes an angle to [0, 2π)
fn normalize_angle(a: f32) -> f32 {
  let a = a % TAU;
  if a < 0.0 {
    a + TAU
  } else {
    a
  }
}

/// Samples the directed arc from `start` through `through` to `end` on the
/// circle `(center, r)`
///
/// The sweep direction is chosen so the arc passes through the middle point:
/// when `through` lies on the counter-clockwise path from `start` to `end`,
/// the arc sweeps counter-clockwise; otherwise it sweeps the complementary
/// negative direction. Both endpoints are always included.
pub fn sample_arc(center: Point, r: f32, start: Point, through: Point, end: Point) -> Vec<Point> {
  let a_start = normalize_angle((start.y - center.y).atan2(start.x - center.x));
  let a_through = normalize_angle((through.y - center.y).atan2(through.x - center.x));
  let a_end = normalize_angle((end.y - center.y).atan2(end.x - center.x));

  let ccw_to_end = normalize_angle(a_end - a_start);
  let ccw_to_through = normalize_angle(a_through - a_start);

  let sweep = if ccw_to_through <= ccw_to_end {
    ccw_to_end
  } else {
    ccw_to_end - TAU
  };

  let n = sample_count(sweep, r);
  (0..=n)
    .map(|i| {
      let angle = a_start + sweep * (i as f32) / (n as f32);
      Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_circumcircle_unit() {
    let (c, r) = circumcircle(
      Point::new(1.0, 0.0),
      Point::new(0.0, 1.0),
      Point::new(-1.0, 0.0),
    )
    .unwrap();
    assert!(c.x.abs() < 1e-5);
    assert!(c.y.abs() < 1e-5);
    assert!((r - 1.0).abs() < 1e-5);
  }

  #[test]
  fn test_circumcircle_collinear() {
    assert!(circumcircle(
      Point::new(0.0, 0.0),
      Point::new(1.0, 1.0),
      Point::new(2.0, 2.0)
    )
    .is_none());
  }

  #[test]
  fn test_sample_circle_on_radius() {
    let center = Point::new(10.0, -4.0);
    let pts = sample_circle(center, 30.0);
    assert!(pts.len() >= 16);
    for p in &pts {
      assert!((center.distance_to(*p) - 30.0).abs() < 1e-3);
    }
  }

  #[test]
  fn test_sample_count_clamped() {
    assert_eq!(sample_count(TAU, 0.5), 16);
    assert_eq!(sample_count(TAU, 1e6), 2000);
  }

  #[test]
  fn test_arc_passes_through_middle() {
    let center = Point::ZERO;
    let start = Point::new(1.0, 0.0);
    let through = Point::new(0.0, 1.0);
    let end = Point::new(-1.0, 0.0);
    let pts = sample_arc(center, 1.0, start, through, end);
    // Endpoints included
    assert!(start.distance_to(pts[0]) < 1e-4);
    assert!(end.distance_to(*pts.last().unwrap()) < 1e-4);
    // The through point lies on the sampled path
    let min_dist = pts
      .iter()
      .map(|p| through.distance_to(*p))
      .fold(f32::INFINITY, f32::min);
    assert!(min_dist < 0.25);
  }

  #[test]
  fn test_arc_sweeps_other_way_when_through_is_clockwise() {
    let center = Point::ZERO;
    let start = Point::new(1.0, 0.0);
    let through = Point::new(0.0, -1.0);
    let end = Point::new(-1.0, 0.0);
    let pts = sample_arc(center, 1.0, start, through, end);
    // All samples stay on the lower half plane path through (0, -1)
    let min_dist = pts
      .iter()
      .map(|p| through.distance_to(*p))
      .fold(f32::INFINITY, f32::min);
    assert!(min_dist < 0.25);
    // And the upper pole is never visited
    let top = Point::new(0.0, 1.0);
    let top_dist = pts
      .iter()
      .map(|p| top.distance_to(*p))
      .fold(f32::INFINITY, f32::min);
    assert!(top_dist > 0.5);
  }
}
