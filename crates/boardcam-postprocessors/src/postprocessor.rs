//! The postprocessor protocol and dialect registry.
//!
//! A postprocessor is a named, stateless strategy exposing a fixed set of
//! code-emission entry points. Each entry point reads the parameter context
//! and returns a G-code fragment (possibly empty) to append to the
//! accumulating program; all per-job state lives in the context. Dialects
//! are resolved by name at job-configuration time.

use crate::context::ToolpathContext;
use crate::dialects::{default::DefaultPostprocessor, grbl_11::Grbl11Postprocessor, line_xyz::LineXyzPostprocessor};
use crate::error::{PostprocessorError, PostprocessorResult};

/// The capability set every machine dialect implements.
///
/// For a full job the builder invokes these in a fixed order: `start_code`,
/// `startz_code` (when a start height is configured), then per tool
/// [`toolchange_code`, `spindle_code`, `dwell_code`], per path the travel
/// (`lift_code`, `rapid_code`) and cutting (`z_feedrate_code`, `down_code`,
/// `feedrate_code`, `linear_code`) fragments, and finally
/// `spindle_stop_code` and `end_code`.
pub trait Postprocessor: std::fmt::Debug {
    /// Registry name of the dialect.
    fn name(&self) -> &'static str;

    /// Job preamble: header comment block, unit declaration (`G20`/`G21`),
    /// absolute positioning and feedrate mode.
    fn start_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Move to the configured start height; empty when none is configured.
    fn startz_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Raise the tool to the travel height.
    fn lift_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Plunge to the cut depth.
    fn down_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Feed up to Z zero (stock surface).
    fn up_to_zero_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Pause for a tool swap, positioning at the toolchange location.
    fn toolchange_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// The current XY position as formatted coordinate fields.
    fn position_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Rapid travel move to the current position.
    fn rapid_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Cutting move to the current position.
    fn linear_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Job epilogue: retract to the end height.
    fn end_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Declare the cutting feedrate.
    fn feedrate_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Declare the plunge feedrate.
    fn z_feedrate_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Spindle on, with speed when configured.
    fn spindle_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Post-spindle-start dwell; empty when no dwell time is configured.
    fn dwell_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;

    /// Spindle off.
    fn spindle_stop_code(&self, p: &ToolpathContext) -> PostprocessorResult<String>;
}

/// Names of all registered dialects.
pub fn available_postprocessors() -> Vec<&'static str> {
    vec!["default", "grbl_11", "line_xyz"]
}

/// Resolves a dialect by its registry name.
pub fn postprocessor_by_name(name: &str) -> PostprocessorResult<Box<dyn Postprocessor>> {
    match name {
        "default" => Ok(Box::new(DefaultPostprocessor)),
        "grbl_11" => Ok(Box::new(Grbl11Postprocessor)),
        "line_xyz" => Ok(Box::new(LineXyzPostprocessor)),
        _ => Err(PostprocessorError::UnknownPostprocessor {
            name: name.to_string(),
        }),
    }
}
