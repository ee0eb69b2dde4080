//! Validated command surface over a [`Scene`]
//!
//! [`SceneService`] is the seam the surrounding request-handling layer
//! calls: it normalizes boundary inputs (colors, pen widths), validates
//! geometry before any scene mutation, and returns the flattened pixel list
//! the display layer consumes. Protocol framing (HTTP, sockets, tool
//! invocation) is owned by the caller, not by this crate.

use rustc_hash::FxHashMap;

use crate::color::{ColorInput, Rgba};
use crate::error::Result;
use crate::fill::{scanline_boundary_fill, scanline_flood_fill, Connectivity};
use crate::geometry::Point;
use crate::raster::PixelRecord;
use crate::scene::{Scene, SceneState, ShapeId};
use crate::shape::Geometry;

/// Pen width bounds applied to all boundary inputs
const MAX_PEN_WIDTH: u32 = 64;

/// Result of a bucket-fill command
#[derive(Debug, Clone)]
pub struct FillOutcome {
  /// The whole scene's flattened pixels after the fill
  pub points: Vec<PixelRecord>,
  /// Id of the baked fill shape, or `None` when the fill produced nothing
  pub fill_id: Option<ShapeId>,
  /// The pixels of the new fill shape alone
  pub pixels: Vec<PixelRecord>,
}

/// The command surface of the drawing kernel
///
/// Owns one [`Scene`]; callers needing multiple collaborator sessions own
/// one service per session.
///
/// # Examples
///
/// ```
/// use drawkit::SceneService;
///
/// let mut svc = SceneService::new();
/// let pixels = svc.add_line(0.0, 0.0, 5.0, 0.0, None, None).unwrap();
/// assert_eq!(pixels.len(), 6);
/// ```
#[derive(Debug, Default)]
pub struct SceneService {
  scene: Scene,
}

impl SceneService {
  /// Creates a service over an empty scene
  pub fn new() -> Self {
    Self::default()
  }

  /// Borrow the underlying scene
  pub fn scene(&self) -> &Scene {
    &self.scene
  }

  fn pick_color(color: Option<ColorInput>) -> Result<Rgba> {
    match color {
      Some(input) => Ok(input.resolve()?),
      None => Ok(Rgba::RED),
    }
  }

  fn pick_width(width: Option<u32>) -> u32 {
    width.unwrap_or(1).clamp(1, MAX_PEN_WIDTH)
  }

  fn create(
    &mut self,
    geometry: Geometry,
    color: Option<ColorInput>,
    width: Option<u32>,
  ) -> Result<Vec<PixelRecord>> {
    let color = Self::pick_color(color)?;
    let width = Self::pick_width(width);
    self.scene.add(geometry, color, width)?;
    Ok(self.scene.flatten())
  }

  /// Creates a line between two endpoints
  #[allow(clippy::too_many_arguments)]
  pub fn add_line(
    &mut self,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    color: Option<ColorInput>,
    width: Option<u32>,
  ) -> Result<Vec<PixelRecord>> {
    self.create(
      Geometry::Line {
        p0: Point::new(x1, y1),
        p1: Point::new(x2, y2),
      },
      color,
      width,
    )
  }

  /// Creates an axis-aligned rectangle from two opposite corners
  #[allow(clippy::too_many_arguments)]
  pub fn add_rect(
    &mut self,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    color: Option<ColorInput>,
    width: Option<u32>,
  ) -> Result<Vec<PixelRecord>> {
    self.create(
      Geometry::Rectangle {
        p0: Point::new(x1, y1),
        p1: Point::new(x2, y2),
      },
      color,
      width,
    )
  }

  /// Creates the circumcircle through three boundary points
  #[allow(clippy::too_many_arguments)]
  pub fn add_circle(
    &mut self,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    x3: f32,
    y3: f32,
    color: Option<ColorInput>,
    width: Option<u32>,
  ) -> Result<Vec<PixelRecord>> {
    self.create(
      Geometry::Circle {
        p0: Point::new(x1, y1),
        p1: Point::new(x2, y2),
        p2: Point::new(x3, y3),
      },
      color,
      width,
    )
  }

  /// Creates a circle from its center and radius
  ///
  /// Convenience mapping to three boundary points at angles 0, 90 and 180
  /// degrees.
  pub fn add_circle_center(
    &mut self,
    cx: f32,
    cy: f32,
    r: f32,
    color: Option<ColorInput>,
    width: Option<u32>,
  ) -> Result<Vec<PixelRecord>> {
    self.add_circle(cx + r, cy, cx, cy + r, cx - r, cy, color, width)
  }

  /// Creates a circular arc from start through a point on the arc to end
  #[allow(clippy::too_many_arguments)]
  pub fn add_arc(
    &mut self,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    x3: f32,
    y3: f32,
    color: Option<ColorInput>,
    width: Option<u32>,
  ) -> Result<Vec<PixelRecord>> {
    self.create(
      Geometry::Arc {
        start: Point::new(x1, y1),
        through: Point::new(x2, y2),
        end: Point::new(x3, y3),
      },
      color,
      width,
    )
  }

  /// Creates a Bézier curve from its control points (at least 2)
  pub fn add_bezier(
    &mut self,
    points: Vec<Point>,
    color: Option<ColorInput>,
    width: Option<u32>,
  ) -> Result<Vec<PixelRecord>> {
    self.create(Geometry::Bezier { points }, color, width)
  }

  /// Creates a clamped uniform B-spline
  ///
  /// `degree` defaults to 3 (a cubic). Requires at least `degree + 1`
  /// control points; fewer is a validation failure and mutates nothing.
  pub fn add_bspline(
    &mut self,
    points: Vec<Point>,
    degree: Option<u32>,
    color: Option<ColorInput>,
    width: Option<u32>,
  ) -> Result<Vec<PixelRecord>> {
    let order = degree.unwrap_or(3) + 1;
    self.create(Geometry::BSpline { points, order }, color, width)
  }

  /// Creates a polygon (closed needs at least 3 points, open at least 2)
  pub fn add_polygon(
    &mut self,
    points: Vec<Point>,
    closed: bool,
    color: Option<ColorInput>,
    width: Option<u32>,
  ) -> Result<Vec<PixelRecord>> {
    self.create(Geometry::Polygon { points, closed }, color, width)
  }

  /// The whole scene, rasterized
  pub fn points(&self) -> Vec<PixelRecord> {
    self.scene.flatten()
  }

  /// Structured per-shape scene dump
  pub fn scene_state(&self) -> SceneState {
    self.scene.dump_state()
  }

  /// Translates a shape and returns the updated pixel list
  pub fn translate(&mut self, id: ShapeId, dx: f32, dy: f32) -> Vec<PixelRecord> {
    self.scene.translate(id, dx, dy);
    self.scene.flatten()
  }

  /// Rotates a shape by `theta` radians about the pivot `(cx, cy)`
  pub fn rotate(&mut self, id: ShapeId, theta: f32, cx: f32, cy: f32) -> bool {
    self.scene.rotate(id, theta, cx, cy)
  }

  /// Scales a shape by `(sx, sy)` about the pivot `(cx, cy)`
  pub fn scale(&mut self, id: ShapeId, sx: f32, sy: f32, cx: f32, cy: f32) -> bool {
    self.scene.scale(id, sx, sy, cx, cy)
  }

  /// Removes a shape from the scene
  pub fn remove(&mut self, id: ShapeId) -> bool {
    self.scene.remove(id)
  }

  /// Starts a drag-style transform session undoing as one step
  pub fn begin_transform_session(&mut self) {
    self.scene.begin_batch();
  }

  /// Ends the current transform session
  pub fn end_transform_session(&mut self) {
    self.scene.end_batch();
  }

  /// Clips a shape against a rectangle (corners in any order) and returns
  /// the updated pixel list
  pub fn clip_rect(&mut self, id: ShapeId, x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<PixelRecord> {
    self.scene.clip(id, x1, y1, x2, y2);
    self.scene.flatten()
  }

  /// Undoes the last mutation and returns the updated pixel list
  pub fn undo(&mut self) -> Vec<PixelRecord> {
    self.scene.undo();
    self.scene.flatten()
  }

  /// Reinstates the last undone mutation and returns the updated pixel list
  pub fn redo(&mut self) -> Vec<PixelRecord> {
    self.scene.redo();
    self.scene.flatten()
  }

  /// Clears the scene and returns the (empty) pixel list
  pub fn clear(&mut self) -> Vec<PixelRecord> {
    self.scene.clear();
    self.scene.flatten()
  }

  /// Builds a pixel reader over the current flattened scene
  ///
  /// Later shapes overwrite earlier ones at shared coordinates, matching
  /// canvas paint order; unpainted pixels read as `background`. Ids are
  /// allocated monotonically, so sorting by id reproduces creation order.
  fn canvas_reader(&self, background: Rgba) -> impl FnMut(i32, i32) -> Rgba {
    let mut flat = self.scene.flatten();
    flat.sort_by_key(|p| p.id);
    let mut canvas: FxHashMap<(i32, i32), Rgba> = FxHashMap::default();
    for p in flat {
      canvas.insert((p.x, p.y), p.color);
    }
    move |x, y| canvas.get(&(x, y)).copied().unwrap_or(background)
  }

  /// Flood-fills the region around a seed pixel and bakes it into a new
  /// pixel-blob shape
  ///
  /// An empty fill (seed out of bounds, or already the fill color) adds
  /// nothing and reports `fill_id: None`.
  #[allow(clippy::too_many_arguments)]
  pub fn bucket_fill(
    &mut self,
    x: i32,
    y: i32,
    color: ColorInput,
    canvas_width: i32,
    canvas_height: i32,
    connectivity: Connectivity,
    tol: u8,
    background: Option<ColorInput>,
  ) -> Result<FillOutcome> {
    let fill_color = color.resolve()?;
    let background = Self::pick_color(background.or(Some(Rgba::WHITE.into())))?;

    let read = self.canvas_reader(background);
    let region = scanline_flood_fill(
      x,
      y,
      read,
      canvas_width,
      canvas_height,
      fill_color,
      connectivity,
      tol,
    );
    self.bake_fill(region, fill_color)
  }

  /// Boundary-fills until `boundary` colored pixels are reached and bakes
  /// the result like [`SceneService::bucket_fill`]
  #[allow(clippy::too_many_arguments)]
  pub fn boundary_fill(
    &mut self,
    x: i32,
    y: i32,
    boundary: ColorInput,
    color: ColorInput,
    canvas_width: i32,
    canvas_height: i32,
    tol: u8,
    background: Option<ColorInput>,
  ) -> Result<FillOutcome> {
    let boundary_color = boundary.resolve()?;
    let fill_color = color.resolve()?;
    let background = Self::pick_color(background.or(Some(Rgba::WHITE.into())))?;

    let read = self.canvas_reader(background);
    let region = scanline_boundary_fill(
      x,
      y,
      read,
      canvas_width,
      canvas_height,
      boundary_color,
      fill_color,
      tol,
    );
    self.bake_fill(region, fill_color)
  }

  fn bake_fill(&mut self, region: Vec<(i32, i32)>, fill_color: Rgba) -> Result<FillOutcome> {
    if region.is_empty() {
      return Ok(FillOutcome {
        points: self.scene.flatten(),
        fill_id: None,
        pixels: Vec::new(),
      });
    }

    let pixels: Vec<(i32, i32, Rgba)> =
      region.iter().map(|&(x, y)| (x, y, fill_color)).collect();
    let id = self
      .scene
      .add(Geometry::PixelBlob { pixels }, fill_color, 1)?;
    let blob_pixels = self
      .scene
      .get(id)
      .map(|s| s.rasterize())
      .unwrap_or_default();

    Ok(FillOutcome {
      points: self.scene.flatten(),
      fill_id: Some(id),
      pixels: blob_pixels,
    })
  }
}
