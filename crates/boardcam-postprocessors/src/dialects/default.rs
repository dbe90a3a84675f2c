//! The default milling/drilling dialect.
//!
//! Z moves are emitted on their own lines; travel and cutting moves carry
//! XY only. This is the dialect most hobby controllers accept unchanged.

use super::job_header;
use crate::context::ToolpathContext;
use crate::error::PostprocessorResult;
use crate::postprocessor::Postprocessor;

#[derive(Debug)]
pub struct DefaultPostprocessor;

impl Postprocessor for DefaultPostprocessor {
    fn name(&self) -> &'static str {
        "default"
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
            "M6".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::JobKind;
    use crate::dialects::testutil::test_context;
    use boardcam_core::Units;

    #[test]
    fn test_start_code_unit_sequence() {
        let pp = DefaultPostprocessor;
        let mut p = test_context(JobKind::Geometry);
        let gcode = pp.start_code(&p).unwrap();
        let motion_lines: Vec<&str> = gcode
            .lines()
            .filter(|l| l.starts_with('G'))
            .collect();
        assert_eq!(motion_lines, vec!["G21", "G90", "G94"]);

        p.units = Units::IN;
        let gcode = pp.start_code(&p).unwrap();
        assert!(gcode.contains("G20\nG90\nG94"));
    }

    #[test]
    fn test_motion_lines_are_xy_only() {
        let pp = DefaultPostprocessor;
        let mut p = test_context(JobKind::Geometry);
        p.x = 1.5;
        p.y = 2.5;
        assert_eq!(pp.rapid_code(&p).unwrap(), "G00 X1.5000 Y2.5000");
        assert_eq!(pp.linear_code(&p).unwrap(), "G01 X1.5000 Y2.5000");
        assert_eq!(pp.lift_code(&p).unwrap(), "G00 Z2.0000");
        assert_eq!(pp.down_code(&p).unwrap(), "G01 Z-0.1000");
    }

    #[test]
    fn test_toolchange_reports_drill_count() {
        let pp = DefaultPostprocessor;
        let mut p = test_context(JobKind::Excellon);
        p.oldx = 7.0;
        p.oldy = 8.0;
        let gcode = pp.toolchange_code(&p).unwrap();
        assert!(gcode.contains("Total drills for tool T1 = 12"));
        // No override configured: drilling defaults to the prior position.
        assert!(gcode.contains("G00 X7.0000 Y8.0000"));
        assert!(gcode.ends_with("M0"));
    }

    #[test]
    fn test_toolchange_missing_drill_count_fails() {
        let pp = DefaultPostprocessor;
        let mut p = test_context(JobKind::Excellon);
        p.tool = 9;
        assert!(pp.toolchange_code(&p).is_err());
    }

    #[test]
    fn test_toolchange_f_plunge_appends_travel_height() {
        let pp = DefaultPostprocessor;
        let mut p = test_context(JobKind::Geometry);
        p.f_plunge = true;
        let gcode = pp.toolchange_code(&p).unwrap();
        assert!(gcode.ends_with("G00 Z2.0000"));
    }

    #[test]
    fn test_spindle_and_dwell() {
        let pp = DefaultPostprocessor;
        let mut p = test_context(JobKind::Geometry);
        assert_eq!(pp.spindle_code(&p).unwrap(), "M03");
        p.spindlespeed = Some(10000);
        assert_eq!(pp.spindle_code(&p).unwrap(), "M03 S10000");
        assert_eq!(pp.dwell_code(&p).unwrap(), "");
        p.dwelltime = Some(0.5);
        assert_eq!(pp.dwell_code(&p).unwrap(), "G4 P0.5");
        assert_eq!(pp.spindle_stop_code(&p).unwrap(), "M05");
    }

    #[test]
    fn test_up_to_zero_feeds_to_stock_surface() {
        let pp = DefaultPostprocessor;
        let p = test_context(JobKind::Geometry);
        assert_eq!(pp.up_to_zero_code(&p).unwrap(), "G01 Z0");
        assert_eq!(pp.position_code(&p).unwrap(), "X0.0000 Y0.0000");
    }

    #[test]
    fn test_end_code_moves_to_toolchange_location() {
        let pp = DefaultPostprocessor;
        let mut p = test_context(JobKind::Geometry);
        assert_eq!(pp.end_code(&p).unwrap(), "G00 Z15.0000");
        p.xy_toolchange = Some((0.0, 0.0));
        assert_eq!(
            pp.end_code(&p).unwrap(),
            "G00 Z15.0000\nG00 X0.0000 Y0.0000"
        );
    }
}
