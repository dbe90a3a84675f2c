//! GRBL 1.1 dialect.
//!
//! Same motion model as the default dialect, but GRBL has no automatic tool
//! changer support: the toolchange sequence stops the spindle, parks, and
//! pauses on `M0` with an `(MSG, ...)` the sender surfaces to the operator.
//! No `M6` is emitted.

use super::job_header;
use crate::context::ToolpathContext;
use crate::error::PostprocessorResult;
use crate::postprocessor::Postprocessor;

#[derive(Debug)]
pub struct Grbl11Postprocessor;

impl Postprocessor for Grbl11Postprocessor {
    fn name(&self) -> &'static str {
        "grbl_11"
    }

    fn start_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        let mut gcode = job_header(p)?;
        gcode.push('\n');
        gcode.push_str(p.unit_code());
        gcode.push_str("\nG90\nG94");
        Ok(gcode)
    }

    fn startz_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(match p.startz {
            Some(z) => format!("G00 Z{}", p.coord(z)),
            None => String::new(),
        })
    }

    fn lift_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!("G00 Z{}", p.coord(p.z_move)))
    }

    fn down_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!("G01 Z{}", p.coord(p.z_cut)))
    }

    fn up_to_zero_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        let _ = p;
        Ok("G01 Z0".to_string())
    }

    fn toolchange_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        let (x, y) = p.toolchange_xy();
        let z = p.toolchange_z();
        let mut lines = vec![
            "M5".to_string(),
            format!("G00 Z{}", p.coord(z)),
            format!("G00 X{} Y{}", p.coord(x), p.coord(y)),
            format!("T{}", p.tool),
        ];
        if p.options.kind.is_drilling() {
            lines.push(format!(
                "(MSG, Change to Tool Dia = {} ||| Total drills for tool T{} = {})",
                p.toolchange_dia(),
                p.tool,
                p.drill_count()?
            ));
        } else {
            lines.push(format!("(MSG, Change to Tool Dia = {})", p.toolchange_dia()));
        }
        lines.push("M0".to_string());
        if p.f_plunge {
            lines.push(format!("G00 Z{}", p.coord(p.z_move)));
        }
        Ok(lines.join("\n"))
    }

    fn position_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!("X{} Y{}", p.coord(p.x), p.coord(p.y)))
    }

    fn rapid_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!("G00 {}", self.position_code(p)?))
    }

    fn linear_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!("G01 {}", self.position_code(p)?))
    }

    fn end_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        let mut gcode = format!("G00 Z{}", p.coord(p.z_end));
        if let Some((x, y)) = p.xy_toolchange {
            gcode.push_str(&format!("\nG00 X{} Y{}", p.coord(x), p.coord(y)));
        }
        Ok(gcode)
    }

    fn feedrate_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!("G01 F{}", p.feed(p.feedrate)))
    }

    fn z_feedrate_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!("G01 F{}", p.feed(p.z_feedrate)))
    }

    fn spindle_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(match p.spindlespeed {
            Some(speed) => format!("M03 S{}", speed),
            None => "M03".to_string(),
        })
    }

    fn dwell_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(match p.dwelltime {
            Some(time) => format!("G4 P{}", time),
            None => String::new(),
        })
    }

    fn spindle_stop_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        let _ = p;
        Ok("M05".to_string())
    }
}
