//! The toolpath parameter context.
//!
//! A structured bag of per-operation state constructed once per export job
//! from the current tool/application settings plus the geometry bounds. The
//! job builder owns the instance and updates position and tool fields
//! between calls; inside a postprocessor entry point the context is
//! read-only. Validation of numeric inputs happens earlier, in the CAM
//! layer; this type only guarantees basic type coherence.

use crate::error::{PostprocessorError, PostprocessorResult};
use boardcam_core::Units;
use boardcam_geometry::Bounds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of job is being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    /// Isolation milling of a copper layer.
    Gerber,
    /// Drilling job.
    Excellon,
    /// Milling of derived geometry (outlines, cutouts).
    Geometry,
    /// Geometry milled out of a drill pattern (e.g. slots).
    ExcellonGeometry,
}

impl JobKind {
    /// Drilling jobs report drill counts and default the toolchange
    /// position to the previous location.
    pub fn is_drilling(&self) -> bool {
        matches!(self, JobKind::Excellon)
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Gerber => write!(f, "Gerber"),
            JobKind::Excellon => write!(f, "Excellon"),
            JobKind::Geometry => write!(f, "Geometry"),
            JobKind::ExcellonGeometry => write!(f, "Excellon Geometry"),
        }
    }
}

/// Per-tool summary carried along with a drilling job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolSummary {
    pub tool: u32,
    pub dia: f64,
    pub drill_count: u32,
}

/// Job metadata shared by every entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOptions {
    pub kind: JobKind,
    /// Bounds of the exported geometry.
    pub bounds: Bounds,
    /// Diameter of the job's (first) tool, for the header comment.
    pub tool_dia: f64,
    /// Per-tool drill counts; populated for drilling jobs.
    pub tools_in_use: Vec<ToolSummary>,
    /// Name the dialect was resolved under, echoed in the header.
    pub postprocessor_name: String,
    /// Arc approximation resolution, echoed in the header.
    pub steps_per_circle: u32,
}

/// The structured per-job parameter set threaded through postprocessor
/// calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolpathContext {
    pub units: Units,
    /// Decimal places for coordinate values.
    pub coords_decimals: usize,
    /// Decimal places for feedrate values.
    pub fr_decimals: usize,

    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Position before the current move; drilling toolchanges default here.
    pub oldx: f64,
    pub oldy: f64,

    /// Current tool number, 1-based in export order.
    pub tool: u32,
    /// Diameter of the current tool.
    pub tool_dia: f64,

    pub feedrate: f64,
    pub z_feedrate: f64,
    pub feedrate_rapid: f64,

    pub z_cut: f64,
    pub z_move: f64,
    pub z_toolchange: f64,
    /// Explicit toolchange location; when absent the dialect falls back to
    /// the current (milling) or previous (drilling) position.
    pub xy_toolchange: Option<(f64, f64)>,
    /// Optional start height; also used as the first tool's toolchange Z.
    pub startz: Option<f64>,
    pub z_end: f64,

    pub multidepth: bool,
    /// Depth removed per pass when `multidepth` is set.
    pub z_depthpercut: Option<f64>,

    pub spindlespeed: Option<u32>,
    pub dwelltime: Option<f64>,
    /// Plunge back to `z_move` right after a toolchange.
    pub f_plunge: bool,

    pub options: JobOptions,
}

impl ToolpathContext {
    /// A context at the origin with everything else taken from defaults;
    /// the export collaborator fills in the job-specific fields.
    pub fn new(units: Units, options: JobOptions) -> Self {
        Self {
            units,
            coords_decimals: 4,
            fr_decimals: 2,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            oldx: 0.0,
            oldy: 0.0,
            tool: 1,
            tool_dia: options.tool_dia,
            feedrate: 120.0,
            z_feedrate: 60.0,
            feedrate_rapid: 1500.0,
            z_cut: -0.1,
            z_move: 2.0,
            z_toolchange: 15.0,
            xy_toolchange: None,
            startz: None,
            z_end: 15.0,
            multidepth: false,
            z_depthpercut: None,
            spindlespeed: None,
            dwelltime: None,
            f_plunge: false,
            options,
        }
    }

    /// Formats a coordinate value with the configured decimal count.
    pub fn coord(&self, value: f64) -> String {
        format!("{:.*}", self.coords_decimals, value)
    }

    /// Formats a feedrate value with the configured decimal count.
    pub fn feed(&self, value: f64) -> String {
        format!("{:.*}", self.fr_decimals, value)
    }

    /// Machine-unit declaration emitted at job start.
    pub fn unit_code(&self) -> &'static str {
        match self.units {
            Units::MM => "G21",
            Units::IN => "G20",
        }
    }

    /// Tool diameter for the human-readable toolchange comment: fixed
    /// 2 decimals for millimeter jobs and 4 for inch jobs, independent of
    /// `coords_decimals`.
    pub fn toolchange_dia(&self) -> String {
        match self.units {
            Units::MM => format!("{:.2}", self.tool_dia),
            Units::IN => format!("{:.4}", self.tool_dia),
        }
    }

    /// Toolchange Z level; the first tool uses the start height when one is
    /// configured.
    pub fn toolchange_z(&self) -> f64 {
        if self.tool == 1 {
            if let Some(startz) = self.startz {
                return startz;
            }
        }
        self.z_toolchange
    }

    /// Toolchange XY location: the configured override, or the previous
    /// position for drilling jobs and the current position otherwise.
    pub fn toolchange_xy(&self) -> (f64, f64) {
        match self.xy_toolchange {
            Some(xy) => xy,
            None if self.options.kind.is_drilling() => (self.oldx, self.oldy),
            None => (self.x, self.y),
        }
    }

    /// Drill count of the current tool on a drilling job.
    pub fn drill_count(&self) -> PostprocessorResult<u32> {
        self.options
            .tools_in_use
            .iter()
            .find(|t| t.tool == self.tool)
            .map(|t| t.drill_count)
            .ok_or(PostprocessorError::MissingParameter {
                param: "tools_in_use",
            })
    }

    /// Per-pass depth; required whenever `multidepth` is set.
    pub fn depth_per_cut(&self) -> PostprocessorResult<f64> {
        self.z_depthpercut
            .ok_or(PostprocessorError::MissingParameter {
                param: "z_depthpercut",
            })
    }

    /// Number of multi-depth passes needed to reach `z_cut`.
    pub fn depth_passes(&self) -> PostprocessorResult<u32> {
        let step = self.depth_per_cut()?;
        if step <= 0.0 {
            return Err(PostprocessorError::MissingParameter {
                param: "z_depthpercut",
            });
        }
        Ok((self.z_cut.abs() / step).ceil().max(1.0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(kind: JobKind) -> ToolpathContext {
        ToolpathContext::new(
            Units::MM,
            JobOptions {
                kind,
                bounds: Bounds::new(0.0, 0.0, 10.0, 10.0),
                tool_dia: 0.8,
                tools_in_use: vec![ToolSummary {
                    tool: 1,
                    dia: 0.8,
                    drill_count: 24,
                }],
                postprocessor_name: "default".to_string(),
                steps_per_circle: 64,
            },
        )
    }

    #[test]
    fn test_coordinate_formatting_uses_decimals() {
        let mut p = context(JobKind::Geometry);
        assert_eq!(p.coord(1.23456789), "1.2346");
        p.coords_decimals = 2;
        assert_eq!(p.coord(1.23456789), "1.23");
        assert_eq!(p.feed(120.0), "120.00");
    }

    #[test]
    fn test_unit_code() {
        let mut p = context(JobKind::Geometry);
        assert_eq!(p.unit_code(), "G21");
        p.units = Units::IN;
        assert_eq!(p.unit_code(), "G20");
    }

    #[test]
    fn test_toolchange_dia_precision_is_fixed() {
        let mut p = context(JobKind::Geometry);
        p.tool_dia = 0.84723;
        p.coords_decimals = 6;
        assert_eq!(p.toolchange_dia(), "0.85");
        p.units = Units::IN;
        assert_eq!(p.toolchange_dia(), "0.8472");
    }

    #[test]
    fn test_first_tool_uses_start_height() {
        let mut p = context(JobKind::Geometry);
        p.z_toolchange = 15.0;
        p.startz = Some(20.0);
        p.tool = 1;
        assert_eq!(p.toolchange_z(), 20.0);
        p.tool = 2;
        assert_eq!(p.toolchange_z(), 15.0);
        p.startz = None;
        p.tool = 1;
        assert_eq!(p.toolchange_z(), 15.0);
    }

    #[test]
    fn test_toolchange_xy_defaults() {
        let mut p = context(JobKind::Geometry);
        p.x = 3.0;
        p.y = 4.0;
        p.oldx = 1.0;
        p.oldy = 2.0;
        assert_eq!(p.toolchange_xy(), (3.0, 4.0));

        let mut p = context(JobKind::Excellon);
        p.x = 3.0;
        p.y = 4.0;
        p.oldx = 1.0;
        p.oldy = 2.0;
        assert_eq!(p.toolchange_xy(), (1.0, 2.0));

        p.xy_toolchange = Some((9.0, 9.0));
        assert_eq!(p.toolchange_xy(), (9.0, 9.0));
    }

    #[test]
    fn test_drill_count_lookup() {
        let mut p = context(JobKind::Excellon);
        assert_eq!(p.drill_count().unwrap(), 24);
        p.tool = 7;
        assert_eq!(
            p.drill_count(),
            Err(PostprocessorError::MissingParameter {
                param: "tools_in_use"
            })
        );
    }

    #[test]
    fn test_depth_passes() {
        let mut p = context(JobKind::Geometry);
        p.multidepth = true;
        p.z_cut = -1.2;
        p.z_depthpercut = Some(0.5);
        assert_eq!(p.depth_passes().unwrap(), 3);
        p.z_depthpercut = Some(0.6);
        assert_eq!(p.depth_passes().unwrap(), 2);
        p.z_depthpercut = None;
        assert_eq!(
            p.depth_passes(),
            Err(PostprocessorError::MissingParameter {
                param: "z_depthpercut"
            })
        );
    }
}
