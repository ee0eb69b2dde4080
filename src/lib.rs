pub mod clip;
pub mod color;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod raster;
pub mod scene;
pub mod service;
pub mod shape;
pub mod transform;

pub use color::{ColorInput, ColorParseError, Rgba};
pub use error::{Error, Result, ValidationError};
pub use fill::Connectivity;
pub use geometry::{Point, Rect};
pub use raster::PixelRecord;
pub use scene::{Scene, SceneState, ShapeId};
pub use service::{FillOutcome, SceneService};
pub use shape::{Geometry, Shape, ShapeState};
pub use transform::AffineTransform;
