//! # BoardCAM CAM Tools
//!
//! CAM operations that transform geometry objects into manufacturing-ready
//! geometry:
//!
//! - **Object collection**: the named registry of CAM objects (Gerber,
//!   Excellon, Geometry) that operations resolve their sources from
//! - **Cutout planner**: freeform and rectangular PCB cutouts with
//!   bridge/gap placement so the finished board stays tacked to the stock

pub mod cutout;
pub mod error;
pub mod objects;

pub use cutout::{CutoutDefaults, CutoutRequest, CutoutTool, FreeformGaps, RectGaps};
pub use error::{CamToolError, CamToolResult};
pub use objects::{CamObject, ObjectCollection, ObjectKind};
