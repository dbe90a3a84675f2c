//! Dialect for controllers that want X, Y and Z on every motion line.

use super::job_header;
use crate::context::ToolpathContext;
use crate::error::PostprocessorResult;
use crate::postprocessor::Postprocessor;

#[derive(Debug)]
pub struct LineXyzPostprocessor;

impl Postprocessor for LineXyzPostprocessor {
    fn name(&self) -> &'static str {
        "line_xyz"
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
            Some(z) => format!(
                "G00 X{} Y{} Z{}",
                p.coord(p.x),
                p.coord(p.y),
                p.coord(z)
            ),
            None => String::new(),
        })
    }

    fn lift_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!(
            "G00 X{} Y{} Z{}",
            p.coord(p.x),
            p.coord(p.y),
            p.coord(p.z_move)
        ))
    }

    fn down_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!(
            "G01 X{} Y{} Z{}",
            p.coord(p.x),
            p.coord(p.y),
            p.coord(p.z_cut)
        ))
    }

    fn up_to_zero_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!("G01 X{} Y{} Z0", p.coord(p.x), p.coord(p.y)))
    }

    fn toolchange_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        let (x, y) = p.toolchange_xy();
        let z = p.toolchange_z();
        let mut lines = vec![
            "M5".to_string(),
            format!("G00 X{} Y{} Z{}", p.coord(x), p.coord(y), p.coord(z)),
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
            lines.push(format!(
                "G00 X{} Y{} Z{}",
                p.coord(x),
                p.coord(y),
                p.coord(p.z_move)
            ));
        }
        Ok(lines.join("\n"))
    }

    fn position_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!("X{} Y{}", p.coord(p.x), p.coord(p.y)))
    }

    fn rapid_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!(
            "G00 {} Z{}",
            self.position_code(p)?,
            p.coord(p.z_move)
        ))
    }

    fn linear_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        Ok(format!(
            "G01 {} Z{}",
            self.position_code(p)?,
            p.coord(p.z_cut)
        ))
    }

    fn end_code(&self, p: &ToolpathContext) -> PostprocessorResult<String> {
        let (x, y) = match p.xy_toolchange {
            Some(xy) => xy,
            None => (p.x, p.y),
        };
        Ok(format!(
            "G00 X{} Y{} Z{}",
            p.coord(x),
            p.coord(y),
            p.coord(p.z_end)
        ))
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

    #[test]
    fn test_every_motion_line_carries_xyz() {
        let pp = LineXyzPostprocessor;
        let mut p = test_context(JobKind::Geometry);
        p.x = 1.0;
        p.y = 2.0;
        for fragment in [
            pp.lift_code(&p).unwrap(),
            pp.down_code(&p).unwrap(),
            pp.rapid_code(&p).unwrap(),
            pp.linear_code(&p).unwrap(),
            pp.end_code(&p).unwrap(),
        ] {
            assert!(fragment.contains("X1.0000"), "{}", fragment);
            assert!(fragment.contains("Y2.0000"), "{}", fragment);
            assert!(fragment.contains('Z'), "{}", fragment);
        }
    }

    #[test]
    fn test_rapid_travels_at_move_height() {
        let pp = LineXyzPostprocessor;
        let mut p = test_context(JobKind::Geometry);
        p.x = 5.0;
        p.y = 0.0;
        assert_eq!(
            pp.rapid_code(&p).unwrap(),
            "G00 X5.0000 Y0.0000 Z2.0000"
        );
        assert_eq!(
            pp.linear_code(&p).unwrap(),
            "G01 X5.0000 Y0.0000 Z-0.1000"
        );
    }

    #[test]
    fn test_toolchange_positions_on_one_line() {
        let pp = LineXyzPostprocessor;
        let mut p = test_context(JobKind::Geometry);
        p.x = 3.0;
        p.y = 4.0;
        p.startz = Some(20.0);
        let gcode = pp.toolchange_code(&p).unwrap();
        // First tool, start height configured: toolchange at the start
        // height, at the current position.
        assert!(gcode.contains("G00 X3.0000 Y4.0000 Z20.0000"));
    }

    #[test]
    fn test_end_code_prefers_toolchange_location() {
        let pp = LineXyzPostprocessor;
        let mut p = test_context(JobKind::Geometry);
        p.x = 3.0;
        p.y = 4.0;
        assert_eq!(pp.end_code(&p).unwrap(), "G00 X3.0000 Y4.0000 Z15.0000");
        p.xy_toolchange = Some((1.0, 1.0));
        assert_eq!(pp.end_code(&p).unwrap(), "G00 X1.0000 Y1.0000 Z15.0000");
    }
}
