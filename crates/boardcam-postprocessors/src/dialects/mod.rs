//! Machine dialect implementations.
//!
//! Every dialect emits the same job header comment block; they differ in how
//! motion lines are phrased (`line_xyz` carries X, Y and Z on every line,
//! `grbl_11` pauses without `M6`).

pub mod default;
pub mod grbl_11;
pub mod line_xyz;

use crate::context::{JobKind, ToolpathContext};
use crate::error::PostprocessorResult;

/// The parenthesized job header shared by all dialects: tool and feed
/// summary, Z levels, toolchange location, geometry ranges and spindle
/// speed.
pub(crate) fn job_header(p: &ToolpathContext) -> PostprocessorResult<String> {
    let units = p.units.to_string();
    let opts = &p.options;
    let mut lines: Vec<String> = Vec::new();

    if opts.kind == JobKind::Geometry {
        lines.push(format!("(TOOL DIAMETER: {} {})", opts.tool_dia, units));
    }
    lines.push(format!("(Feedrate: {} {}/min)", p.feedrate, units));
    if opts.kind == JobKind::Geometry {
        lines.push(format!("(Feedrate_Z: {} {}/min)", p.z_feedrate, units));
    }
    lines.push(format!("(Feedrate rapids {} {}/min)", p.feedrate_rapid, units));
    lines.push(String::new());
    lines.push(format!("(Z_Cut: {} {})", p.z_cut, units));
    if opts.kind == JobKind::Geometry && p.multidepth {
        lines.push(format!(
            "(DepthPerCut: {} {} <=>{} passes)",
            p.depth_per_cut()?,
            units,
            p.depth_passes()?
        ));
    }
    lines.push(format!("(Z_Move: {} {})", p.z_move, units));
    lines.push(format!("(Z Toolchange: {} {})", p.z_toolchange, units));
    match p.xy_toolchange {
        Some((x, y)) => lines.push(format!("(X,Y Toolchange: {:.4}, {:.4} {})", x, y, units)),
        None => lines.push(format!("(X,Y Toolchange: None {})", units)),
    }
    match p.startz {
        Some(z) => lines.push(format!("(Z Start: {} {})", z, units)),
        None => lines.push(format!("(Z Start: None {})", units)),
    }
    lines.push(format!("(Z End: {} {})", p.z_end, units));
    lines.push(format!("(Steps per circle: {})", opts.steps_per_circle));
    if matches!(opts.kind, JobKind::Excellon | JobKind::ExcellonGeometry) {
        lines.push(format!(
            "(Postprocessor Excellon: {})",
            opts.postprocessor_name
        ));
    } else {
        lines.push(format!(
            "(Postprocessor Geometry: {})",
            opts.postprocessor_name
        ));
        lines.push(String::new());
    }

    let (xmin, ymin, xmax, ymax) = opts.bounds.as_tuple();
    lines.push(format!(
        "(X range: {:>9} ... {:>9} {})",
        p.coord(xmin),
        p.coord(xmax),
        units
    ));
    lines.push(format!(
        "(Y range: {:>9} ... {:>9} {})",
        p.coord(ymin),
        p.coord(ymax),
        units
    ));
    lines.push(String::new());
    match p.spindlespeed {
        Some(speed) => lines.push(format!("(Spindle Speed: {} RPM)", speed)),
        None => lines.push("(Spindle Speed: None RPM)".to_string()),
    }

    Ok(lines.join("\n"))
}
