//! Pixel-level rasterization primitives
//!
//! Every shape variant ultimately reduces its geometry to a list of
//! [`PixelRecord`]s through the algorithms in this module: Bresenham lines
//! ([`line`]), circumcircle/arc sampling ([`circle`]) and parametric curve
//! evaluation ([`curve`]).
//!
//! Rasterized output is deduplicated by (x, y) with first-seen-wins
//! semantics, handled by [`PixelSink`].

pub mod circle;
pub mod curve;
pub mod line;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::color::Rgba;
use crate::scene::ShapeId;

/// One rasterized pixel as emitted to callers
///
/// This is the wire-visible output record of the kernel: integer canvas
/// coordinates plus the owning shape's color, id and pen width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRecord {
  /// X pixel coordinate
  pub x: i32,
  /// Y pixel coordinate
  pub y: i32,
  /// Pixel color
  pub color: Rgba,
  /// Owning shape id
  pub id: ShapeId,
  /// Pen width of the owning shape (≥ 1)
  pub w: u32,
}

/// Order-preserving pixel collector deduplicating by (x, y)
///
/// The first pixel emitted for a coordinate wins; later emissions for the
/// same coordinate are dropped. Insertion order is preserved in the output.
#[derive(Debug, Default)]
pub struct PixelSink {
  seen: FxHashSet<(i32, i32)>,
  pixels: Vec<PixelRecord>,
}

impl PixelSink {
  /// Creates an empty sink
  pub fn new() -> Self {
    Self::default()
  }

  /// Emits one pixel unless its coordinate was already emitted
  pub fn push(&mut self, x: i32, y: i32, color: Rgba, id: ShapeId, w: u32) {
    if self.seen.insert((x, y)) {
      self.pixels.push(PixelRecord { x, y, color, id, w });
    }
  }

  /// Emits every pixel of an integer point run under one style
  pub fn extend_points(
    &mut self,
    points: impl IntoIterator<Item = (i32, i32)>,
    color: Rgba,
    id: ShapeId,
    w: u32,
  ) {
    for (x, y) in points {
      self.push(x, y, color, id, w);
    }
  }

  /// Consumes the sink, returning the collected pixels
  pub fn into_pixels(self) -> Vec<PixelRecord> {
    self.pixels
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sink_dedupes_first_seen_wins() {
    let mut sink = PixelSink::new();
    sink.push(1, 1, Rgba::RED, ShapeId(1), 1);
    sink.push(2, 1, Rgba::RED, ShapeId(1), 1);
    sink.push(1, 1, Rgba::BLACK, ShapeId(2), 3);
    let pixels = sink.into_pixels();
    assert_eq!(pixels.len(), 2);
    assert_eq!(pixels[0].color, Rgba::RED);
    assert_eq!(pixels[0].id, ShapeId(1));
  }
}
