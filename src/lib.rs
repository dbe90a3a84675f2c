//! # BoardCAM
//!
//! Toolpath and G-code generation core for preparing 2D PCB manufacturing
//! jobs: isolation milling, drilling and board cutout.
//!
//! ## Architecture
//!
//! BoardCAM is organized as a workspace with multiple crates:
//!
//! 1. **boardcam-core** - Units, numeric input parsing, user-facing messages
//! 2. **boardcam-geometry** - 2D solid geometry model and operations
//!    (bounds, convex hull, buffering, booleans)
//! 3. **boardcam-camtools** - CAM object collection and the cutout planner
//!    (freeform and rectangular bridge/gap placement)
//! 4. **boardcam-postprocessors** - Toolpath parameter context, the
//!    postprocessor dialect protocol and the G-code job builder
//!
//! The GUI, scripting console and file import layers of the application live
//! outside this workspace; they supply geometry objects and consume the
//! emitted G-code text.

pub use boardcam_camtools as camtools;
pub use boardcam_core as core;
pub use boardcam_geometry as geometry;
pub use boardcam_postprocessors as postprocessors;

pub use boardcam_camtools::{CamObject, CamToolError, CutoutTool, ObjectCollection};
pub use boardcam_core::{MessageLevel, MessageLog, MessageSink, Units};
pub use boardcam_geometry::{Geometry, GeometryError, Point};
pub use boardcam_postprocessors::{
    postprocessor_by_name, GcodeBuilder, Postprocessor, PostprocessorError, ToolpathContext,
};
