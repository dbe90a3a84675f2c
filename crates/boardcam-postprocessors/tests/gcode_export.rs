//! Full-job G-code export across dialects and unit systems.

use anyhow::Result;
use boardcam_core::Units;
use boardcam_geometry::{Bounds, Point};
use boardcam_postprocessors::{
    available_postprocessors, postprocessor_by_name, GcodeBuilder, JobKind, JobOptions,
    PostprocessorError, ToolJob, ToolSummary, ToolpathContext,
};

fn context(units: Units, kind: JobKind) -> ToolpathContext {
    let mut p = ToolpathContext::new(
        units,
        JobOptions {
            kind,
            bounds: Bounds::new(0.0, 0.0, 20.0, 10.0),
            tool_dia: 1.5,
            tools_in_use: vec![ToolSummary {
                tool: 1,
                dia: 1.5,
                drill_count: 4,
            }],
            postprocessor_name: "default".to_string(),
            steps_per_circle: 64,
        },
    );
    p.spindlespeed = Some(12000);
    p
}

fn outline_job() -> Vec<ToolJob> {
    vec![ToolJob {
        tool: 1,
        tool_dia: 1.5,
        paths: vec![vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
        ]],
    }]
}

/// First motion-mode line of a program (skipping comments and blanks).
fn first_motion_line(gcode: &str) -> &str {
    gcode
        .lines()
        .find(|l| !l.is_empty() && !l.starts_with('('))
        .unwrap()
}

#[test]
fn millimeter_jobs_declare_g21_first() -> Result<()> {
    for name in available_postprocessors() {
        let pp = postprocessor_by_name(name)?;
        let gcode = GcodeBuilder::new(pp.as_ref(), context(Units::MM, JobKind::Geometry))
            .build(&outline_job())?;
        assert_eq!(first_motion_line(&gcode), "G21", "dialect {}", name);
    }
    Ok(())
}

#[test]
fn inch_jobs_declare_g20_first() -> Result<()> {
    for name in available_postprocessors() {
        let pp = postprocessor_by_name(name)?;
        let gcode = GcodeBuilder::new(pp.as_ref(), context(Units::IN, JobKind::Geometry))
            .build(&outline_job())?;
        assert_eq!(first_motion_line(&gcode), "G20", "dialect {}", name);
    }
    Ok(())
}

#[test]
fn program_is_ascii_with_paren_comments() -> Result<()> {
    let pp = postprocessor_by_name("default")?;
    let gcode = GcodeBuilder::new(pp.as_ref(), context(Units::MM, JobKind::Geometry))
        .build(&outline_job())?;

    assert!(gcode.is_ascii());
    for line in gcode.lines() {
        if line.starts_with('(') {
            assert!(line.ends_with(')'), "unterminated comment: {}", line);
        }
        // No checksums or line numbers.
        assert!(!line.starts_with('N'));
        assert!(!line.contains('*'));
    }
    assert!(gcode.contains("(Spindle Speed: 12000 RPM)"));
    Ok(())
}

#[test]
fn drilling_export_defaults_toolchange_to_prior_position() -> Result<()> {
    let pp = postprocessor_by_name("default")?;
    let mut p = context(Units::MM, JobKind::Excellon);
    p.oldx = 3.0;
    p.oldy = 7.0;
    let jobs = vec![ToolJob {
        tool: 1,
        tool_dia: 1.5,
        paths: vec![vec![Point::new(5.0, 5.0)]],
    }];
    let gcode = GcodeBuilder::new(pp.as_ref(), p).build(&jobs)?;
    assert!(gcode.contains("G00 X3.0000 Y7.0000"));
    assert!(gcode.contains("Total drills for tool T1 = 4"));
    Ok(())
}

#[test]
fn missing_drill_counts_abort_the_whole_job() -> Result<()> {
    let pp = postprocessor_by_name("default")?;
    let mut p = context(Units::MM, JobKind::Excellon);
    p.options.tools_in_use.clear();
    let jobs = vec![ToolJob {
        tool: 1,
        tool_dia: 1.5,
        paths: vec![vec![Point::new(5.0, 5.0)]],
    }];
    let err = GcodeBuilder::new(pp.as_ref(), p).build(&jobs).unwrap_err();
    assert_eq!(
        err,
        PostprocessorError::MissingParameter {
            param: "tools_in_use"
        }
    );
    Ok(())
}

#[test]
fn inch_toolchange_comment_uses_four_decimals() -> Result<()> {
    let pp = postprocessor_by_name("default")?;
    let mut p = context(Units::IN, JobKind::Geometry);
    p.coords_decimals = 2;
    let gcode = GcodeBuilder::new(pp.as_ref(), p).build(&outline_job())?;
    // The comment precision is fixed per unit system, independent of the
    // coordinate decimals.
    assert!(gcode.contains("(MSG, Change to Tool Dia = 1.5000)"));
    Ok(())
}

#[test]
fn startz_feeds_the_first_toolchange() -> Result<()> {
    let pp = postprocessor_by_name("line_xyz")?;
    let mut p = context(Units::MM, JobKind::Geometry);
    p.startz = Some(25.0);
    p.z_toolchange = 15.0;
    let gcode = GcodeBuilder::new(pp.as_ref(), p).build(&outline_job())?;
    // Tool 1 parks at the start height, not the configured toolchange Z.
    assert!(gcode.contains("Z25.0000\nT1"));
    Ok(())
}
