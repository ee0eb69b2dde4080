//! Bresenham integer line rasterization

/// Rasterizes the segment from `a` to `b` with Bresenham's midpoint
/// algorithm
///
/// Deterministic, works in every octant, and always includes both endpoints.
///
/// # Examples
///
/// ```
/// use drawkit::raster::line::bresenham;
///
/// let pts = bresenham((0, 0), (5, 0));
/// assert_eq!(pts, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
/// ```
pub fn bresenham(a: (i32, i32), b: (i32, i32)) -> Vec<(i32, i32)> {
  let (mut x, mut y) = a;
  let (x2, y2) = b;
  let dx = (x2 - x).abs();
  let dy = (y2 - y).abs();
  let sx = if x < x2 { 1 } else { -1 };
  let sy = if y < y2 { 1 } else { -1 };
  let mut err = dx - dy;

  let mut pts = Vec::with_capacity((dx.max(dy) + 1) as usize);
  loop {
    pts.push((x, y));
    if x == x2 && y == y2 {
      break;
    }
    let e2 = 2 * err;
    if e2 > -dy {
      err -= dy;
      x += sx;
    }
    if e2 < dx {
      err += dx;
      y += sy;
    }
  }
  pts
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_horizontal_complete() {
    let pts = bresenham((0, 0), (5, 0));
    assert_eq!(pts.len(), 6);
    for (i, p) in pts.iter().enumerate() {
      assert_eq!(*p, (i as i32, 0));
    }
  }

  #[test]
  fn test_single_point() {
    assert_eq!(bresenham((3, 3), (3, 3)), vec![(3, 3)]);
  }

  #[test]
  fn test_vertical_and_reverse() {
    assert_eq!(bresenham((0, 0), (0, 3)), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
    assert_eq!(bresenham((0, 3), (0, 0)), vec![(0, 3), (0, 2), (0, 1), (0, 0)]);
  }

  #[test]
  fn test_diagonal() {
    assert_eq!(
      bresenham((0, 0), (3, 3)),
      vec![(0, 0), (1, 1), (2, 2), (3, 3)]
    );
  }

  #[test]
  fn test_endpoints_always_included() {
    for &(a, b) in &[
      ((0, 0), (7, 3)),
      ((-4, 2), (9, -11)),
      ((5, 5), (-5, 6)),
      ((0, 0), (1, 100)),
    ] {
      let pts = bresenham(a, b);
      assert_eq!(*pts.first().unwrap(), a);
      assert_eq!(*pts.last().unwrap(), b);
      // No duplicates and no gaps: consecutive points are 8-neighbors
      for w in pts.windows(2) {
        let (dx, dy) = (w[1].0 - w[0].0, w[1].1 - w[0].1);
        assert!(dx.abs() <= 1 && dy.abs() <= 1);
        assert!((dx, dy) != (0, 0));
      }
    }
  }
}
