//! # BoardCAM Postprocessors
//!
//! Renders abstract toolpaths into machine-controller G-code dialects:
//!
//! - **Toolpath parameter context**: the per-job bag of position, tool, feed
//!   and Z-level state threaded through every code-emission call
//! - **Postprocessor protocol**: the fixed capability set every dialect
//!   implements, dispatched by name at job-configuration time
//! - **Dialects**: `default`, `grbl_11` and `line_xyz`
//! - **Job builder**: assembles a complete G-code program by invoking the
//!   protocol entry points in the required order
//!
//! A postprocessor error aborts the whole job; partial G-code is never
//! returned.

pub mod builder;
pub mod context;
pub mod dialects;
pub mod error;
pub mod postprocessor;

pub use builder::{GcodeBuilder, ToolJob};
pub use context::{JobKind, JobOptions, ToolSummary, ToolpathContext};
pub use error::{PostprocessorError, PostprocessorResult};
pub use postprocessor::{available_postprocessors, postprocessor_by_name, Postprocessor};
