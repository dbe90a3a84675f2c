//! G-code job assembly.
//!
//! Walks the toolpaths of an export job and invokes the dialect entry
//! points in the required order: preamble, optional start height, then per
//! tool the toolchange/spindle/dwell block, per path the travel and cutting
//! fragments (repeated per multi-depth pass), and finally spindle stop and
//! the epilogue. The first entry-point error aborts the whole job.

use crate::context::ToolpathContext;
use crate::error::PostprocessorResult;
use crate::postprocessor::Postprocessor;
use boardcam_geometry::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The toolpaths cut with one tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolJob {
    /// Tool number, 1-based in export order.
    pub tool: u32,
    /// Diameter of the tool.
    pub tool_dia: f64,
    /// Point chains to cut; single-point paths are plunge-only (drills).
    pub paths: Vec<Vec<Point>>,
}

/// Assembles a complete G-code program from tool jobs.
pub struct GcodeBuilder<'a> {
    postprocessor: &'a dyn Postprocessor,
    context: ToolpathContext,
}

impl<'a> GcodeBuilder<'a> {
    /// The builder takes ownership of the context for the duration of the
    /// job; position and tool fields are updated between entry-point calls.
    pub fn new(postprocessor: &'a dyn Postprocessor, context: ToolpathContext) -> Self {
        Self {
            postprocessor,
            context,
        }
    }

    /// Builds the whole program. Nothing is returned on error; partial
    /// G-code must never reach a machine.
    pub fn build(mut self, jobs: &[ToolJob]) -> PostprocessorResult<String> {
        debug!(
            dialect = self.postprocessor.name(),
            tools = jobs.len(),
            "assembling G-code job"
        );
        let pp = self.postprocessor;
        let mut gcode = String::new();

        append(&mut gcode, pp.start_code(&self.context)?);
        if self.context.startz.is_some() {
            append(&mut gcode, pp.startz_code(&self.context)?);
        }

        for job in jobs {
            self.context.tool = job.tool;
            self.context.tool_dia = job.tool_dia;
            append(&mut gcode, pp.toolchange_code(&self.context)?);
            append(&mut gcode, pp.spindle_code(&self.context)?);
            if self.context.dwelltime.is_some() {
                append(&mut gcode, pp.dwell_code(&self.context)?);
            }

            let passes = if self.context.multidepth {
                self.context.depth_passes()?
            } else {
                1
            };
            let target_depth = self.context.z_cut;
            let step = if self.context.multidepth {
                self.context.depth_per_cut()?
            } else {
                target_depth.abs()
            };

            for path in &job.paths {
                let first = match path.first() {
                    Some(&p) => p,
                    None => continue,
                };
                for pass in 1..=passes {
                    self.context.z_cut = pass_depth(target_depth, step, pass);

                    self.move_to(first);
                    append(&mut gcode, pp.lift_code(&self.context)?);
                    append(&mut gcode, pp.rapid_code(&self.context)?);

                    append(&mut gcode, pp.z_feedrate_code(&self.context)?);
                    append(&mut gcode, pp.down_code(&self.context)?);
                    append(&mut gcode, pp.feedrate_code(&self.context)?);
                    for &point in &path[1..] {
                        self.move_to(point);
                        append(&mut gcode, pp.linear_code(&self.context)?);
                    }
                }
                self.context.z_cut = target_depth;
            }
        }

        append(&mut gcode, pp.spindle_stop_code(&self.context)?);
        append(&mut gcode, pp.end_code(&self.context)?);
        Ok(gcode)
    }

    fn move_to(&mut self, p: Point) {
        self.context.oldx = self.context.x;
        self.context.oldy = self.context.y;
        self.context.x = p.x;
        self.context.y = p.y;
    }
}

/// Cut depth for the given 1-based pass; the final pass always lands
/// exactly on the target depth.
fn pass_depth(target_depth: f64, step: f64, pass: u32) -> f64 {
    let depth = step * pass as f64;
    if depth >= target_depth.abs() {
        target_depth
    } else {
        target_depth.signum() * depth
    }
}

fn append(gcode: &mut String, fragment: String) {
    if !fragment.is_empty() {
        gcode.push_str(&fragment);
        gcode.push('\n');
    }
}
