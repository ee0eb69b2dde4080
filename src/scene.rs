//! The mutable scene aggregate
//!
//! A [`Scene`] owns a collection of shapes keyed by identity, plus undo/redo
//! history and a batched-transform session mode. History is kept as full
//! deep snapshots of the shape map: every mutating operation pushes a
//! pre-mutation snapshot onto the undo stack and clears the redo stack,
//! unless a batch session is active, in which case only the session entry
//! snapshots (so an entire drag undoes as one step).
//!
//! The scene holds no global state; callers own their `Scene` instances and
//! must serialize concurrent access themselves.

use std::fmt;

use log::debug;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::clip::{liang_barsky, sutherland_hodgman};
use crate::color::Rgba;
use crate::error::ValidationError;
use crate::geometry::{Point, Rect};
use crate::raster::curve::sample_bezier;
use crate::raster::PixelRecord;
use crate::shape::{Geometry, Shape, ShapeState};

/// Process-unique shape identifier
///
/// Assigned from a per-scene counter at creation, never reused after
/// deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Serializable snapshot of the whole scene (debug/introspection view)
#[derive(Debug, Clone, Serialize)]
pub struct SceneState {
  /// One entry per shape, in scene iteration order
  pub shapes: Vec<ShapeState>,
}

/// An editable scene of shapes with snapshot-based undo/redo
#[derive(Debug, Default)]
pub struct Scene {
  shapes: FxHashMap<ShapeId, Shape>,
  undo_stack: Vec<FxHashMap<ShapeId, Shape>>,
  redo_stack: Vec<FxHashMap<ShapeId, Shape>>,
  batch_active: bool,
  next_id: u64,
}

impl Scene {
  /// Creates an empty scene
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of shapes currently in the scene
  pub fn len(&self) -> usize {
    self.shapes.len()
  }

  /// Returns true when the scene holds no shapes
  pub fn is_empty(&self) -> bool {
    self.shapes.is_empty()
  }

  /// Borrow a shape by id
  pub fn get(&self, id: ShapeId) -> Option<&Shape> {
    self.shapes.get(&id)
  }

  fn alloc_id(&mut self) -> ShapeId {
    self.next_id += 1;
    ShapeId(self.next_id)
  }

  /// Pushes a pre-mutation snapshot unless a batch session suppresses it
  fn snapshot(&mut self) {
    if !self.batch_active {
      self.undo_stack.push(self.shapes.clone());
    }
  }

  /// Validates and inserts a new shape, returning its id
  ///
  /// Validation happens before the snapshot, so a rejected shape leaves
  /// both the scene and its history untouched.
  pub fn add(
    &mut self,
    geometry: Geometry,
    color: Rgba,
    pen_width: u32,
  ) -> Result<ShapeId, ValidationError> {
    geometry.validate()?;
    let id = self.alloc_id();
    let shape = Shape::new(id, geometry, color, pen_width)?;
    self.snapshot();
    debug!("add {} ({})", id, shape.geometry.kind());
    self.shapes.insert(id, shape);
    self.redo_stack.clear();
    Ok(id)
  }

  /// Removes a shape; false when the id is absent (no history entry taken)
  pub fn remove(&mut self, id: ShapeId) -> bool {
    if !self.shapes.contains_key(&id) {
      return false;
    }
    self.snapshot();
    debug!("remove {}", id);
    self.shapes.remove(&id);
    self.redo_stack.clear();
    true
  }

  /// Empties the scene; no-op when already empty
  pub fn clear(&mut self) {
    if self.shapes.is_empty() {
      return;
    }
    self.snapshot();
    debug!("clear {} shapes", self.shapes.len());
    self.shapes.clear();
    self.redo_stack.clear();
  }

  /// Translates a shape in world space
  ///
  /// Returns false when the id is absent or the offset is zero.
  pub fn translate(&mut self, id: ShapeId, dx: f32, dy: f32) -> bool {
    if !self.shapes.contains_key(&id) || (dx == 0.0 && dy == 0.0) {
      return false;
    }
    self.snapshot();
    if let Some(shape) = self.shapes.get_mut(&id) {
      shape.translate(dx, dy);
    }
    self.redo_stack.clear();
    true
  }

  /// Rotates a shape by `theta` radians about the pivot `(cx, cy)`
  pub fn rotate(&mut self, id: ShapeId, theta: f32, cx: f32, cy: f32) -> bool {
    if !self.shapes.contains_key(&id) || theta == 0.0 {
      return false;
    }
    self.snapshot();
    if let Some(shape) = self.shapes.get_mut(&id) {
      shape.rotate(theta, cx, cy);
    }
    self.redo_stack.clear();
    true
  }

  /// Scales a shape by `(sx, sy)` about the pivot `(cx, cy)`
  pub fn scale(&mut self, id: ShapeId, sx: f32, sy: f32, cx: f32, cy: f32) -> bool {
    if !self.shapes.contains_key(&id) || (sx == 1.0 && sy == 1.0) {
      return false;
    }
    self.snapshot();
    if let Some(shape) = self.shapes.get_mut(&id) {
      shape.scale(sx, sy, cx, cy);
    }
    self.redo_stack.clear();
    true
  }

  /// Enters a batched-transform session
  ///
  /// The session entry snapshots once; every mutation until
  /// [`Scene::end_batch`] skips its own snapshot, so the whole session
  /// undoes as a single step. Re-entrant calls are no-ops.
  pub fn begin_batch(&mut self) {
    if self.batch_active {
      return;
    }
    self.undo_stack.push(self.shapes.clone());
    self.batch_active = true;
    debug!("batch session start");
  }

  /// Leaves the batched-transform session
  pub fn end_batch(&mut self) {
    if self.batch_active {
      self.batch_active = false;
      debug!("batch session end");
    }
  }

  /// Restores the previous snapshot; no-op on empty history
  pub fn undo(&mut self) {
    if let Some(prev) = self.undo_stack.pop() {
      let current = std::mem::replace(&mut self.shapes, prev);
      self.redo_stack.push(current);
      debug!("undo -> {} shapes", self.shapes.len());
    }
  }

  /// Reinstates the last undone snapshot; no-op on empty redo stack
  pub fn redo(&mut self) {
    if let Some(next) = self.redo_stack.pop() {
      let current = std::mem::replace(&mut self.shapes, next);
      self.undo_stack.push(current);
      debug!("redo -> {} shapes", self.shapes.len());
    }
  }

  /// Rasterizes every shape into one flat pixel list
  ///
  /// Pixels are concatenated in scene iteration order; order across shapes
  /// is unspecified and must not be relied upon except for final-state
  /// equality checks.
  pub fn flatten(&self) -> Vec<PixelRecord> {
    let mut pixels = Vec::new();
    for shape in self.shapes.values() {
      pixels.extend(shape.rasterize());
    }
    pixels
  }

  /// Structured per-shape dump for debugging and state sync
  ///
  /// Not used by rasterization.
  pub fn dump_state(&self) -> SceneState {
    SceneState {
      shapes: self.shapes.values().map(Shape::dump).collect(),
    }
  }

  /// Clips a shape against an axis-aligned rectangle
  ///
  /// Corners may be given in any order. The effect depends on the shape
  /// variant: polygons, lines, rectangles, circles and Béziers get their
  /// geometry replaced by the world-space clipped result (and deleted when
  /// nothing survives); other variants are untouched. Returns whether the
  /// scene changed; the pre-clip snapshot is only taken when it did.
  pub fn clip(&mut self, id: ShapeId, x1: f32, y1: f32, x2: f32, y2: f32) -> bool {
    let window = Rect::from_corners(Point::new(x1, y1), Point::new(x2, y2));
    let Some(shape) = self.shapes.get(&id) else {
      return false;
    };

    let outcome = match &shape.geometry {
      Geometry::Polygon { points, closed } => {
        let world: Vec<Point> = points.iter().map(|p| shape.transform.apply(*p)).collect();
        clip_ring(&world, *closed, &window)
      }
      Geometry::Line { p0, p1 } => {
        let a = shape.transform.apply(*p0);
        let b = shape.transform.apply(*p1);
        match liang_barsky(a, b, &window) {
          Some((a, b)) => ClipOutcome::Replace(Geometry::Line { p0: a, p1: b }),
          None => ClipOutcome::Delete,
        }
      }
      Geometry::Rectangle { p0, p1 } => {
        let r = Rect::from_corners(*p0, *p1);
        let world: Vec<Point> = [
          Point::new(r.min_x, r.min_y),
          Point::new(r.max_x, r.min_y),
          Point::new(r.max_x, r.max_y),
          Point::new(r.min_x, r.max_y),
        ]
        .iter()
        .map(|p| shape.transform.apply(*p))
        .collect();
        clip_ring(&world, true, &window)
      }
      Geometry::Circle { .. } => {
        // The outline approximation becomes the ring; after this, the
        // shape is a polygon, not an implicit circle
        let ring: Vec<Point> = shape
          .rasterize()
          .iter()
          .map(|p| Point::new(p.x as f32, p.y as f32))
          .collect();
        clip_ring(&ring, true, &window)
      }
      Geometry::Bezier { points } => {
        let control: Vec<Point> = points.iter().map(|p| shape.transform.apply(*p)).collect();
        clip_polyline(&sample_bezier(&control), &window)
      }
      // Arcs, B-splines and baked blobs are left unmodified
      Geometry::Arc { .. } | Geometry::BSpline { .. } | Geometry::PixelBlob { .. } => {
        return false;
      }
    };

    match outcome {
      ClipOutcome::Replace(geometry) => {
        self.snapshot();
        debug!("clip {} -> {}", id, geometry.kind());
        if let Some(shape) = self.shapes.get_mut(&id) {
          shape.geometry = geometry;
          shape.transform = crate::transform::AffineTransform::IDENTITY;
        }
        self.redo_stack.clear();
        true
      }
      ClipOutcome::Delete => {
        self.snapshot();
        debug!("clip {} -> deleted", id);
        self.shapes.remove(&id);
        self.redo_stack.clear();
        true
      }
    }
  }
}

/// Result of clipping one shape
enum ClipOutcome {
  Replace(Geometry),
  Delete,
}

/// Clips a world-space ring with Sutherland-Hodgman and rounds the result
///
/// Deletes the shape when too few points survive to form the polygon again.
fn clip_ring(world: &[Point], closed: bool, window: &Rect) -> ClipOutcome {
  let clipped = sutherland_hodgman(world, window);
  let rounded: Vec<Point> = clipped
    .iter()
    .map(|p| {
      let (x, y) = p.round();
      Point::new(x as f32, y as f32)
    })
    .collect();
  let needed = if closed { 3 } else { 2 };
  if rounded.len() < needed {
    ClipOutcome::Delete
  } else {
    ClipOutcome::Replace(Geometry::Polygon {
      points: rounded,
      closed,
    })
  }
}

/// Clips a sampled world-space polyline segment by segment
///
/// Surviving sub-segments are concatenated into one open polygon; gaps are
/// not split into separate shapes.
fn clip_polyline(samples: &[Point], window: &Rect) -> ClipOutcome {
  let mut points: Vec<Point> = Vec::new();
  for pair in samples.windows(2) {
    if let Some((a, b)) = liang_barsky(pair[0], pair[1], window) {
      if points.last() != Some(&a) {
        points.push(a);
      }
      points.push(b);
    }
  }
  if points.len() < 2 {
    ClipOutcome::Delete
  } else {
    ClipOutcome::Replace(Geometry::Polygon {
      points,
      closed: false,
    })
  }
}
