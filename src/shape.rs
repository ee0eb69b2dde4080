//! Shape variants and their rasterization dispatch
//!
//! A [`Shape`] owns a local-space [`Geometry`] definition, a color, a pen
//! width and one accumulated [`AffineTransform`]. Edits never rewrite local
//! geometry in place; they compose new factors onto the transform. The one
//! exception is clipping, which replaces the geometry wholesale (see
//! [`crate::scene`]).
//!
//! The variant set is closed and dispatched exhaustively - no open-ended
//! trait objects, since the kernel's shape vocabulary is fixed.

use log::warn;
use serde::Serialize;

use crate::color::Rgba;
use crate::error::ValidationError;
use crate::geometry::Point;
use crate::raster::circle::{circumcircle, sample_arc, sample_circle};
use crate::raster::curve::{sample_bezier, sample_bspline};
use crate::raster::line::bresenham;
use crate::raster::{PixelRecord, PixelSink};
use crate::scene::ShapeId;
use crate::transform::AffineTransform;

/// Local-space geometry of a shape variant
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
  /// A segment between two endpoints
  Line { p0: Point, p1: Point },
  /// An axis-aligned rectangle given by two opposite corners
  Rectangle { p0: Point, p1: Point },
  /// The circumcircle through three boundary points
  Circle { p0: Point, p1: Point, p2: Point },
  /// A directed circular arc from `start` to `end` passing through `through`
  Arc {
    start: Point,
    through: Point,
    end: Point,
  },
  /// A Bézier curve of degree `points.len() - 1`
  Bezier { points: Vec<Point> },
  /// A clamped uniform B-spline of order `order` (degree `order - 1`)
  BSpline { points: Vec<Point>, order: u32 },
  /// A polyline, optionally closed into a ring
  Polygon { points: Vec<Point>, closed: bool },
  /// Baked absolute pixels (produced by flood fill), each with its own color
  PixelBlob { pixels: Vec<(i32, i32, Rgba)> },
}

impl Geometry {
  /// Validates variant-specific constraints
  ///
  /// Called before any scene mutation so a rejected shape never leaves a
  /// trace in the scene or its history.
  pub fn validate(&self) -> Result<(), ValidationError> {
    match self {
      Geometry::Bezier { points } => {
        if points.len() < 2 {
          return Err(ValidationError::TooFewPoints {
            kind: "bezier",
            needed: 2,
            got: points.len(),
          });
        }
      }
      Geometry::BSpline { points, order } => {
        if *order < 2 {
          return Err(ValidationError::InvalidOrder(*order));
        }
        if points.len() < *order as usize {
          return Err(ValidationError::TooFewPoints {
            kind: "b-spline",
            needed: *order as usize,
            got: points.len(),
          });
        }
      }
      Geometry::Polygon { points, closed } => {
        let needed = if *closed { 3 } else { 2 };
        if points.len() < needed {
          return Err(ValidationError::TooFewPoints {
            kind: if *closed { "closed polygon" } else { "open polygon" },
            needed,
            got: points.len(),
          });
        }
      }
      _ => {}
    }
    Ok(())
  }

  /// Type tag used by the scene state dump
  pub fn kind(&self) -> &'static str {
    match self {
      Geometry::Line { .. } => "Line",
      Geometry::Rectangle { .. } => "Rectangle",
      Geometry::Circle { .. } => "Circle",
      Geometry::Arc { .. } => "Arc",
      Geometry::Bezier { .. } => "Bezier",
      Geometry::BSpline { .. } => "BSpline",
      Geometry::Polygon { .. } => "Polygon",
      Geometry::PixelBlob { .. } => "PixelBlob",
    }
  }
}

/// One editable shape in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
  /// Process-unique identifier, immutable for the shape's lifetime
  pub id: ShapeId,
  /// Stroke color
  pub color: Rgba,
  /// Pen width (≥ 1)
  pub pen_width: u32,
  /// Accumulated world transform
  pub transform: AffineTransform,
  /// Local-space geometry definition
  pub geometry: Geometry,
}

impl Shape {
  /// Creates a shape after validating its geometry and pen width
  pub fn new(
    id: ShapeId,
    geometry: Geometry,
    color: Rgba,
    pen_width: u32,
  ) -> Result<Self, ValidationError> {
    if pen_width == 0 {
      return Err(ValidationError::InvalidPenWidth);
    }
    geometry.validate()?;
    Ok(Self {
      id,
      color,
      pen_width,
      transform: AffineTransform::IDENTITY,
      geometry,
    })
  }

  /// Composes a world-space translation onto the accumulated transform
  pub fn translate(&mut self, dx: f32, dy: f32) {
    self.transform = AffineTransform::translation(dx, dy).compose(&self.transform);
  }

  /// Composes a rotation about the pivot `(cx, cy)` onto the transform
  pub fn rotate(&mut self, theta: f32, cx: f32, cy: f32) {
    let pivot = AffineTransform::translation(cx, cy)
      .compose(&AffineTransform::rotation(theta))
      .compose(&AffineTransform::translation(-cx, -cy));
    self.transform = pivot.compose(&self.transform);
  }

  /// Composes a scale about the pivot `(cx, cy)` onto the transform
  pub fn scale(&mut self, sx: f32, sy: f32, cx: f32, cy: f32) {
    let pivot = AffineTransform::translation(cx, cy)
      .compose(&AffineTransform::scale(sx, sy))
      .compose(&AffineTransform::translation(-cx, -cy));
    self.transform = pivot.compose(&self.transform);
  }

  /// Maps a local-space point to world space
  fn world(&self, p: Point) -> Point {
    self.transform.apply(p)
  }

  /// Converts local geometry to deduplicated integer pixels
  ///
  /// Curves whose evaluation commutes with affine maps (Bézier, B-spline)
  /// transform their control points once and evaluate in world space;
  /// sampled outlines (circle, arc) evaluate in local space and map every
  /// sample.
  pub fn rasterize(&self) -> Vec<PixelRecord> {
    let mut sink = PixelSink::new();
    match &self.geometry {
      Geometry::Line { p0, p1 } => {
        self.stroke_segment(*p0, *p1, &mut sink);
      }
      Geometry::Rectangle { p0, p1 } => {
        let r = crate::geometry::Rect::from_corners(*p0, *p1);
        let corners = [
          Point::new(r.min_x, r.min_y),
          Point::new(r.max_x, r.min_y),
          Point::new(r.max_x, r.max_y),
          Point::new(r.min_x, r.max_y),
        ];
        for i in 0..4 {
          self.stroke_segment(corners[i], corners[(i + 1) % 4], &mut sink);
        }
      }
      Geometry::Circle { p0, p1, p2 } => match circumcircle(*p0, *p1, *p2) {
        Some((center, radius)) => {
          self.emit_world_samples(sample_circle(center, radius), &mut sink);
        }
        None => {
          // Collinear input: chaining both segments covers the full
          // collinear extent regardless of the points' order
          warn!(
            "circle {} has collinear points, falling back to a line",
            self.id
          );
          self.stroke_segment(*p0, *p1, &mut sink);
          self.stroke_segment(*p1, *p2, &mut sink);
        }
      },
      Geometry::Arc {
        start,
        through,
        end,
      } => match circumcircle(*start, *through, *end) {
        Some((center, radius)) => {
          self.emit_world_samples(sample_arc(center, radius, *start, *through, *end), &mut sink);
        }
        None => {
          warn!(
            "arc {} has collinear points, falling back to chained segments",
            self.id
          );
          self.stroke_segment(*start, *through, &mut sink);
          self.stroke_segment(*through, *end, &mut sink);
        }
      },
      Geometry::Bezier { points } => {
        let control: Vec<Point> = points.iter().map(|p| self.world(*p)).collect();
        for p in sample_bezier(&control) {
          let (x, y) = p.round();
          sink.push(x, y, self.color, self.id, self.pen_width);
        }
      }
      Geometry::BSpline { points, order } => {
        let control: Vec<Point> = points.iter().map(|p| self.world(*p)).collect();
        let degree = (*order - 1) as usize;
        for p in sample_bspline(&control, degree) {
          let (x, y) = p.round();
          sink.push(x, y, self.color, self.id, self.pen_width);
        }
      }
      Geometry::Polygon { points, closed } => {
        let n = points.len();
        let edges = if *closed { n } else { n.saturating_sub(1) };
        for i in 0..edges {
          self.stroke_segment(points[i], points[(i + 1) % n], &mut sink);
        }
      }
      Geometry::PixelBlob { pixels } => {
        for (x, y, color) in pixels {
          let (wx, wy) = self.world(Point::new(*x as f32, *y as f32)).round();
          sink.push(wx, wy, *color, self.id, self.pen_width);
        }
      }
    }
    sink.into_pixels()
  }

  /// Bresenham between two transformed local points
  fn stroke_segment(&self, a: Point, b: Point, sink: &mut PixelSink) {
    let pts = bresenham(self.world(a).round(), self.world(b).round());
    sink.extend_points(pts, self.color, self.id, self.pen_width);
  }

  /// Transforms samples to world space and emits rounded pixels
  fn emit_world_samples(&self, samples: Vec<Point>, sink: &mut PixelSink) {
    for p in samples {
      let (x, y) = self.world(p).round();
      sink.push(x, y, self.color, self.id, self.pen_width);
    }
  }

  /// Structured introspection view of this shape
  pub fn dump(&self) -> ShapeState {
    ShapeState {
      id: self.id,
      kind: self.geometry.kind(),
      color: self.color,
      pen_width: self.pen_width,
      geometry: GeometryState::from(&self.geometry),
      transform: self.transform,
    }
  }
}

/// Serializable snapshot of one shape (see [`crate::scene::Scene::dump_state`])
#[derive(Debug, Clone, Serialize)]
pub struct ShapeState {
  /// Shape id
  pub id: ShapeId,
  /// Variant type tag
  pub kind: &'static str,
  /// Stroke color in canonical hex form
  pub color: Rgba,
  /// Pen width
  pub pen_width: u32,
  /// Local geometry fields, listed explicitly per variant
  pub geometry: GeometryState,
  /// The 6 accumulated transform coefficients
  pub transform: AffineTransform,
}

/// Explicit per-variant geometry serialization
///
/// Lists exactly the fields meaningful for each variant; baked fill blobs
/// report their pixel count rather than the full pixel list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GeometryState {
  /// Two-point variants (line, rectangle)
  TwoPoint { p0: Point, p1: Point },
  /// Three-point variants (circle, arc)
  ThreePoint { p0: Point, p1: Point, p2: Point },
  /// Control-point curve (Bézier)
  ControlPoints { points: Vec<Point> },
  /// Control-point curve with an order (B-spline)
  OrderedControlPoints { points: Vec<Point>, order: u32 },
  /// Polyline with closed flag
  Polyline { points: Vec<Point>, closed: bool },
  /// Baked pixel blob
  Baked { pixel_count: usize },
}

impl From<&Geometry> for GeometryState {
  fn from(g: &Geometry) -> Self {
    match g {
      Geometry::Line { p0, p1 } | Geometry::Rectangle { p0, p1 } => {
        GeometryState::TwoPoint { p0: *p0, p1: *p1 }
      }
      Geometry::Circle { p0, p1, p2 } => GeometryState::ThreePoint {
        p0: *p0,
        p1: *p1,
        p2: *p2,
      },
      Geometry::Arc {
        start,
        through,
        end,
      } => GeometryState::ThreePoint {
        p0: *start,
        p1: *through,
        p2: *end,
      },
      Geometry::Bezier { points } => GeometryState::ControlPoints {
        points: points.clone(),
      },
      Geometry::BSpline { points, order } => GeometryState::OrderedControlPoints {
        points: points.clone(),
        order: *order,
      },
      Geometry::Polygon { points, closed } => GeometryState::Polyline {
        points: points.clone(),
        closed: *closed,
      },
      Geometry::PixelBlob { pixels } => GeometryState::Baked {
        pixel_count: pixels.len(),
      },
    }
  }
}
