//! # BoardCAM Geometry
//!
//! 2D solid geometry model and operations for toolpath planning:
//! - Shape set model: polygons (with holes) and open polylines
//! - Bounding box and convex hull computation
//! - Buffering (outward/inward offsetting) via `cavalier_contours`
//! - Boolean union and difference, including clipping of open paths
//!
//! Operations are pure and return new shape sets, with one exception:
//! [`Geometry::subtract_polygon`] performs the in-place boolean update the
//! cutout planner requests on an owned object.

pub mod error;
pub mod geometry;
pub mod shapes;

pub use error::{GeometryError, GeometryResult};
pub use geometry::Geometry;
pub use shapes::{signed_area, Bounds, PathLine, Point, Polygon, Shape};
