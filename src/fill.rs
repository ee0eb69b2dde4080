//! Scanline region fill
//!
//! Two pure fill variants parameterized over a caller-supplied pixel-color
//! reader, so the result can be wrapped into any shape representation (the
//! command surface bakes it into a pixel-blob shape). Neither variant
//! mutates a canvas.
//!
//! The span engine pops a seed, extends left and right along its row over
//! fillable unvisited pixels, emits the whole span, then scans the rows
//! above and below for contiguous fillable sub-spans and pushes their left
//! end, midpoint and right end as new seeds. Neighbor rows are deliberately
//! not pre-marked visited: the redundant seeding bounds stack growth while
//! letting each seed re-extend past its parent span when it is popped.

use rustc_hash::FxHashSet;

use crate::color::Rgba;

/// Pixel neighborhood used when growing a filled region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
  /// Orthogonal neighbors only
  Four,
  /// Orthogonal and diagonal neighbors
  Eight,
}

/// Flood fill: replaces the seed's connected region of matching color
///
/// Returns every pixel 4- (or 8-) connected to the seed whose color matches
/// the seed's original color within `tol`. Returns an empty list when the
/// seed lies outside `[0,width)×[0,height)` or its color already matches
/// `new_color` within `tol`.
///
/// # Examples
///
/// ```
/// use drawkit::fill::{scanline_flood_fill, Connectivity};
/// use drawkit::Rgba;
///
/// // A 4x4 canvas that is entirely white
/// let read = |_x: i32, _y: i32| Rgba::WHITE;
/// let pixels = scanline_flood_fill(1, 1, read, 4, 4, Rgba::RED, Connectivity::Four, 0);
/// assert_eq!(pixels.len(), 16);
/// ```
pub fn scanline_flood_fill(
  seed_x: i32,
  seed_y: i32,
  mut read: impl FnMut(i32, i32) -> Rgba,
  width: i32,
  height: i32,
  new_color: Rgba,
  connectivity: Connectivity,
  tol: u8,
) -> Vec<(i32, i32)> {
  if seed_x < 0 || seed_x >= width || seed_y < 0 || seed_y >= height {
    return Vec::new();
  }
  let target = read(seed_x, seed_y);
  if target.matches(new_color, tol) {
    return Vec::new();
  }
  fill_spans(
    (seed_x, seed_y),
    width,
    height,
    connectivity,
    |x, y| read(x, y).matches(target, tol),
  )
}

/// Boundary fill: fills until a boundary-colored pixel is reached
///
/// Same span engine as [`scanline_flood_fill`] with the inverted predicate:
/// a pixel is fillable when it is neither the boundary color nor the
/// replacement color within `tol`.
pub fn scanline_boundary_fill(
  seed_x: i32,
  seed_y: i32,
  mut read: impl FnMut(i32, i32) -> Rgba,
  width: i32,
  height: i32,
  boundary_color: Rgba,
  new_color: Rgba,
  tol: u8,
) -> Vec<(i32, i32)> {
  let mut inside = move |x: i32, y: i32| {
    let c = read(x, y);
    !c.matches(boundary_color, tol) && !c.matches(new_color, tol)
  };
  if seed_x < 0 || seed_x >= width || seed_y < 0 || seed_y >= height || !inside(seed_x, seed_y) {
    return Vec::new();
  }
  fill_spans((seed_x, seed_y), width, height, Connectivity::Four, inside)
}

/// Span-extension engine shared by both fill variants
///
/// The initial seed must already be known fillable; seeds pushed internally
/// are verified before pushing.
fn fill_spans(
  seed: (i32, i32),
  width: i32,
  height: i32,
  connectivity: Connectivity,
  mut fillable: impl FnMut(i32, i32) -> bool,
) -> Vec<(i32, i32)> {
  let mut visited: FxHashSet<(i32, i32)> = FxHashSet::default();
  let mut out = Vec::new();
  let mut stack = vec![seed];

  while let Some((x, y)) = stack.pop() {
    if visited.contains(&(x, y)) {
      continue;
    }

    // Extend the span left and right over fillable unvisited pixels
    let mut xl = x;
    while xl > 0 && !visited.contains(&(xl - 1, y)) && fillable(xl - 1, y) {
      xl -= 1;
    }
    let mut xr = x;
    while xr + 1 < width && !visited.contains(&(xr + 1, y)) && fillable(xr + 1, y) {
      xr += 1;
    }

    for xx in xl..=xr {
      visited.insert((xx, y));
      out.push((xx, y));
    }

    // Re-seed from fillable sub-spans of the rows above and below
    for ny in [y - 1, y + 1] {
      if ny < 0 || ny >= height {
        continue;
      }
      let mut xx = xl;
      while xx <= xr {
        while xx <= xr && (visited.contains(&(xx, ny)) || !fillable(xx, ny)) {
          xx += 1;
        }
        if xx > xr {
          break;
        }
        let sl = xx;
        while xx <= xr && !visited.contains(&(xx, ny)) && fillable(xx, ny) {
          xx += 1;
        }
        let sr = xx - 1;
        let mid = (sl + sr) / 2;
        stack.push((sl, ny));
        stack.push((mid, ny));
        stack.push((sr, ny));
      }
    }

    // Diagonal probes off the span ends reach regions that only touch
    // corner-to-corner
    if connectivity == Connectivity::Eight {
      for (sx, sy) in [
        (xl - 1, y - 1),
        (xl - 1, y + 1),
        (xr + 1, y - 1),
        (xr + 1, y + 1),
      ] {
        if sx >= 0
          && sx < width
          && sy >= 0
          && sy < height
          && !visited.contains(&(sx, sy))
          && fillable(sx, sy)
        {
          stack.push((sx, sy));
        }
      }
    }
  }

  out
}
