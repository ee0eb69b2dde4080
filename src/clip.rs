//! Clipping against an axis-aligned rectangle
//!
//! Two stateless routines consumed by the scene's clip command:
//!
//! - [`sutherland_hodgman`] clips a polygon ring against the window by
//!   clipping sequentially against its four half-planes
//! - [`liang_barsky`] clips a single segment parametrically
//!
//! Both operate on world-space points; the scene maps a shape's geometry to
//! world space before clipping and stores the result with an identity
//! transform.

use crate::geometry::{Point, Rect};

/// One of the four clip window half-planes
#[derive(Debug, Clone, Copy, PartialEq)]
enum Edge {
  Left,
  Right,
  Bottom,
  Top,
}

impl Edge {
  fn inside(self, p: Point, rect: &Rect) -> bool {
    match self {
      Edge::Left => p.x >= rect.min_x,
      Edge::Right => p.x <= rect.max_x,
      Edge::Bottom => p.y >= rect.min_y,
      Edge::Top => p.y <= rect.max_y,
    }
  }

  /// Intersection of segment `a -> b` with this half-plane boundary
  ///
  /// Only called when `a` and `b` straddle the boundary, so the denominator
  /// is never zero.
  fn intersect(self, a: Point, b: Point, rect: &Rect) -> Point {
    match self {
      Edge::Left => {
        let t = (rect.min_x - a.x) / (b.x - a.x);
        Point::new(rect.min_x, a.y + t * (b.y - a.y))
      }
      Edge::Right => {
        let t = (rect.max_x - a.x) / (b.x - a.x);
        Point::new(rect.max_x, a.y + t * (b.y - a.y))
      }
      Edge::Bottom => {
        let t = (rect.min_y - a.y) / (b.y - a.y);
        Point::new(a.x + t * (b.x - a.x), rect.min_y)
      }
      Edge::Top => {
        let t = (rect.max_y - a.y) / (b.y - a.y);
        Point::new(a.x + t * (b.x - a.x), rect.max_y)
      }
    }
  }
}

/// Clips a polygon ring against a rectangle (Sutherland-Hodgman)
///
/// The input is treated as a closed ring. The returned ring may be empty
/// when the polygon lies entirely outside the window.
///
/// # Examples
///
/// ```
/// use drawkit::clip::sutherland_hodgman;
/// use drawkit::{Point, Rect};
///
/// let window = Rect::from_corners(Point::ZERO, Point::new(10.0, 10.0));
/// let tri = [
///   Point::new(2.0, 2.0),
///   Point::new(8.0, 2.0),
///   Point::new(5.0, 8.0),
/// ];
/// // Fully inside: unchanged
/// assert_eq!(sutherland_hodgman(&tri, &window), tri.to_vec());
/// ```
pub fn sutherland_hodgman(points: &[Point], rect: &Rect) -> Vec<Point> {
  let mut output = points.to_vec();
  for edge in [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top] {
    let input = std::mem::take(&mut output);
    let Some(&last) = input.last() else {
      break;
    };
    let mut prev = last;
    for &cur in &input {
      let cur_in = edge.inside(cur, rect);
      let prev_in = edge.inside(prev, rect);
      if cur_in {
        if !prev_in {
          output.push(edge.intersect(prev, cur, rect));
        }
        output.push(cur);
      } else if prev_in {
        output.push(edge.intersect(prev, cur, rect));
      }
      prev = cur;
    }
  }
  output
}

/// Clips the segment `p0 -> p1` against a rectangle (Liang-Barsky)
///
/// Returns the surviving sub-segment, or `None` when the segment lies
/// entirely outside the window.
pub fn liang_barsky(p0: Point, p1: Point, rect: &Rect) -> Option<(Point, Point)> {
  let dx = p1.x - p0.x;
  let dy = p1.y - p0.y;

  let mut t0: f32 = 0.0;
  let mut t1: f32 = 1.0;

  // (p, q) per window edge: p is the direction component against the edge,
  // q the distance from the start point to the edge
  let checks = [
    (-dx, p0.x - rect.min_x),
    (dx, rect.max_x - p0.x),
    (-dy, p0.y - rect.min_y),
    (dy, rect.max_y - p0.y),
  ];

  for (p, q) in checks {
    if p == 0.0 {
      if q < 0.0 {
        // Parallel to this edge and outside it
        return None;
      }
      continue;
    }
    let r = q / p;
    if p < 0.0 {
      if r > t1 {
        return None;
      }
      if r > t0 {
        t0 = r;
      }
    } else {
      if r < t0 {
        return None;
      }
      if r < t1 {
        t1 = r;
      }
    }
  }

  Some((
    Point::new(p0.x + t0 * dx, p0.y + t0 * dy),
    Point::new(p0.x + t1 * dx, p0.y + t1 * dy),
  ))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn window() -> Rect {
    Rect::from_corners(Point::ZERO, Point::new(10.0, 10.0))
  }

  #[test]
  fn test_polygon_fully_inside_unchanged() {
    let tri = [
      Point::new(1.0, 1.0),
      Point::new(9.0, 1.0),
      Point::new(5.0, 9.0),
    ];
    assert_eq!(sutherland_hodgman(&tri, &window()), tri.to_vec());
  }

  #[test]
  fn test_polygon_fully_outside_empty() {
    let tri = [
      Point::new(20.0, 20.0),
      Point::new(30.0, 20.0),
      Point::new(25.0, 30.0),
    ];
    assert!(sutherland_hodgman(&tri, &window()).is_empty());
  }

  #[test]
  fn test_polygon_straddling_is_cut() {
    // Square half inside the window on the right edge
    let square = [
      Point::new(5.0, 2.0),
      Point::new(15.0, 2.0),
      Point::new(15.0, 8.0),
      Point::new(5.0, 8.0),
    ];
    let clipped = sutherland_hodgman(&square, &window());
    assert!(!clipped.is_empty());
    for p in &clipped {
      assert!(window().contains(*p));
    }
    // The cut runs along x = 10
    assert!(clipped.iter().any(|p| (p.x - 10.0).abs() < 1e-5));
  }

  #[test]
  fn test_segment_fully_inside() {
    let (a, b) = liang_barsky(Point::new(1.0, 1.0), Point::new(9.0, 9.0), &window()).unwrap();
    assert_eq!(a, Point::new(1.0, 1.0));
    assert_eq!(b, Point::new(9.0, 9.0));
  }

  #[test]
  fn test_segment_fully_outside() {
    assert!(liang_barsky(Point::new(11.0, 0.0), Point::new(20.0, 9.0), &window()).is_none());
    assert!(liang_barsky(Point::new(-5.0, -1.0), Point::new(5.0, -1.0), &window()).is_none());
  }

  #[test]
  fn test_segment_crossing_is_trimmed() {
    let (a, b) = liang_barsky(Point::new(-5.0, 5.0), Point::new(15.0, 5.0), &window()).unwrap();
    assert_eq!(a, Point::new(0.0, 5.0));
    assert_eq!(b, Point::new(10.0, 5.0));
  }

  #[test]
  fn test_degenerate_segment_inside() {
    let p = Point::new(5.0, 5.0);
    assert_eq!(liang_barsky(p, p, &window()), Some((p, p)));
  }
}
