//! PCB cutout planner.
//!
//! Cuts a board free from the surrounding stock while leaving small uncut
//! bridges ("gaps") so the piece stays tacked in place. Two algorithms:
//!
//! - **Freeform**: follows the board shape. Outline-only sources (Gerber)
//!   first get a cutout boundary derived as the buffered convex hull;
//!   Geometry sources are mutated in place. Bridges are produced by
//!   boolean-subtracting rectangles from the solid geometry.
//! - **Rectangular**: the cutout is the bounding rectangle of the object,
//!   built directly as open line chains with notches at the side midpoints.
//!
//! Every precondition is validated before any state is touched; failures are
//! reported through the message sink and the collection is left unmodified.

use crate::error::{CamToolError, CamToolResult};
use crate::objects::{ObjectCollection, ObjectKind};
use boardcam_core::{parse_user_float, MessageLevel, MessageSink};
use boardcam_geometry::{Bounds, Geometry, PathLine, Point, Shape};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Gap layouts for the freeform cutout.
///
/// `TwoLR`/`TwoTB` double the bridges on the respective axis; `Eight` is the
/// union of both doubled layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreeformGaps {
    /// One bridge left, one right.
    LR,
    /// One bridge top, one bottom.
    TB,
    /// One bridge on each of the four sides.
    Four,
    /// Two bridges left, two right.
    TwoLR,
    /// Two bridges top, two bottom.
    TwoTB,
    /// Two bridges on each of the four sides.
    Eight,
}

impl FreeformGaps {
    pub const ALLOWED: &'static str = "'lr', 'tb', '2lr', '2tb', '4', '8'";

    /// Number of bridge rectangles the layout subtracts.
    pub fn bridge_count(&self) -> usize {
        match self {
            FreeformGaps::LR | FreeformGaps::TB => 1,
            FreeformGaps::Four | FreeformGaps::TwoLR | FreeformGaps::TwoTB => 2,
            FreeformGaps::Eight => 4,
        }
    }
}

impl fmt::Display for FreeformGaps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FreeformGaps::LR => "lr",
            FreeformGaps::TB => "tb",
            FreeformGaps::Four => "4",
            FreeformGaps::TwoLR => "2lr",
            FreeformGaps::TwoTB => "2tb",
            FreeformGaps::Eight => "8",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for FreeformGaps {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lr" => Ok(FreeformGaps::LR),
            "tb" => Ok(FreeformGaps::TB),
            "4" => Ok(FreeformGaps::Four),
            "2lr" => Ok(FreeformGaps::TwoLR),
            "2tb" => Ok(FreeformGaps::TwoTB),
            "8" => Ok(FreeformGaps::Eight),
            _ => Err(()),
        }
    }
}

/// Gap layouts for the rectangular cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RectGaps {
    /// One gap top, one bottom.
    TB,
    /// One gap left, one right.
    LR,
    /// One gap on each of the four sides.
    Four,
}

impl RectGaps {
    pub const ALLOWED: &'static str = "'tb', 'lr', '4'";

    /// Number of notches the layout leaves in the rectangle boundary.
    pub fn notch_count(&self) -> usize {
        match self {
            RectGaps::TB | RectGaps::LR => 2,
            RectGaps::Four => 4,
        }
    }
}

impl fmt::Display for RectGaps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RectGaps::TB => "tb",
            RectGaps::LR => "lr",
            RectGaps::Four => "4",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for RectGaps {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tb" => Ok(RectGaps::TB),
            "lr" => Ok(RectGaps::LR),
            "4" => Ok(RectGaps::Four),
            _ => Err(()),
        }
    }
}

/// Cutout settings carried by the application, passed in explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutoutDefaults {
    /// Diameter of the cutout tool.
    pub tool_dia: f64,
    /// Extra distance between the board border and the cut.
    pub margin: f64,
    /// Width of the uncut bridges.
    pub gap_size: f64,
    /// Default gap layout selector.
    pub gaps: String,
}

impl Default for CutoutDefaults {
    fn default() -> Self {
        Self {
            tool_dia: 2.4,
            margin: 0.1,
            gap_size: 4.0,
            gaps: "4".to_string(),
        }
    }
}

/// One cutout request as it arrives from the user.
///
/// Numeric fields are kept as the raw entry strings; parsing (with the
/// comma-decimal fallback) happens inside the planner so malformed input can
/// be reported per field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutoutRequest {
    /// Name of the source object.
    pub object: String,
    pub tool_dia: String,
    pub margin: String,
    pub gap_size: String,
    /// Gap layout selector; interpretation depends on the algorithm.
    pub gaps: String,
}

impl CutoutRequest {
    /// Request for `object` filled from the application defaults.
    pub fn from_defaults(object: impl Into<String>, defaults: &CutoutDefaults) -> Self {
        Self {
            object: object.into(),
            tool_dia: defaults.tool_dia.to_string(),
            margin: defaults.margin.to_string(),
            gap_size: defaults.gap_size.to_string(),
            gaps: defaults.gaps.clone(),
        }
    }
}

/// The cutout planner.
pub struct CutoutTool;

impl CutoutTool {
    pub fn new() -> Self {
        Self
    }

    /// Freeform cutout: bridges are subtracted from the solid geometry so
    /// the cut follows the board shape.
    ///
    /// Geometry sources are mutated in place and renamed `<name>_cutout`;
    /// any other kind derives a new geometry object of that name whose solid
    /// is the buffered convex hull of the source. Returns the name of the
    /// produced object.
    pub fn freeform_cutout(
        &self,
        objects: &mut ObjectCollection,
        inform: &dyn MessageSink,
        request: &CutoutRequest,
    ) -> CamToolResult<String> {
        debug!(object = %request.object, gaps = %request.gaps, "freeform cutout requested");

        let source = match objects.get_by_name(&request.object) {
            Some(obj) => obj,
            None => {
                inform.emit(
                    MessageLevel::Error,
                    &format!("Could not retrieve object: {}", request.object),
                );
                return Err(CamToolError::ObjectNotFound {
                    name: request.object.clone(),
                });
            }
        };

        let dia = parse_field(inform, "tool_dia", "Tool diameter", &request.tool_dia)?;
        let margin = parse_field(inform, "margin", "Margin", &request.margin)?;
        let gap_size = parse_field(inform, "gap_size", "Gap size", &request.gap_size)?;

        let gaps: FreeformGaps = request.gaps.parse().map_err(|_| {
            inform.emit(
                MessageLevel::Warning,
                &format!(
                    "Gaps value can be only one of: {}. Fill in a correct value and retry.",
                    FreeformGaps::ALLOWED
                ),
            );
            CamToolError::UnknownGapLayout {
                value: request.gaps.clone(),
                allowed: FreeformGaps::ALLOWED,
            }
        })?;

        if dia <= 0.0 {
            inform.emit(
                MessageLevel::Warning,
                "Tool diameter must be a positive value. Change it and retry.",
            );
            return Err(CamToolError::NonPositiveToolDia { value: dia });
        }

        if source.multigeo {
            inform.emit(
                MessageLevel::Error,
                "Cutout operation cannot be done on a multi-geometry object.\n\
                 Optionally, it can be converted to a single-geometry object first.",
            );
            return Err(CamToolError::MultiGeometry {
                name: source.name.clone(),
            });
        }

        let bounds = match source.bounds() {
            Ok(b) => b,
            Err(e) => {
                inform.emit(
                    MessageLevel::Error,
                    &format!("Object has no usable geometry: {}", e),
                );
                return Err(e.into());
            }
        };

        // Bridge placement works off the margin-expanded bounds: the center
        // is shifted by the margin and the spans grow by twice of it.
        let (cx, cy) = bounds.center();
        let px = cx + margin;
        let py = cy + margin;
        let length_x = bounds.width() + 2.0 * margin;
        let length_y = bounds.height() + 2.0 * margin;
        let half_gap = gap_size / 2.0 + dia / 2.0;

        let span = bounds.expand(margin + half_gap);

        let target_name = if source.kind == ObjectKind::Geometry {
            let new_name = format!("{}_cutout", source.name);
            objects.rename(&request.object, &new_name)?;
            new_name
        } else {
            let hull = match source.solid_geometry.convex_hull() {
                Ok(h) => h,
                Err(e) => {
                    inform.emit(
                        MessageLevel::Error,
                        &format!("Object has no usable geometry: {}", e),
                    );
                    return Err(e.into());
                }
            };
            let boundary =
                Geometry::from_polygon(hull).buffer(margin + (dia / 2.0).abs())?;
            let out_name = format!("{}_cutout", source.name);
            objects.new_object(ObjectKind::Geometry, &out_name, move |obj| {
                obj.solid_geometry = boundary;
                Ok(())
            })?;
            out_name
        };

        let target = objects
            .get_by_name_mut(&target_name)
            .ok_or_else(|| CamToolError::ObjectNotFound {
                name: target_name.clone(),
            })?;

        let mut subtract_rectangle = |x0: f64, y0: f64, x1: f64, y1: f64| -> CamToolResult<()> {
            let pts = [
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ];
            target.subtract_polygon(&pts)?;
            Ok(())
        };

        if matches!(gaps, FreeformGaps::Eight | FreeformGaps::TwoLR) {
            subtract_rectangle(
                span.min_x,
                py - half_gap + length_y / 4.0,
                span.max_x,
                py + half_gap + length_y / 4.0,
            )?;
            subtract_rectangle(
                span.min_x,
                py - half_gap - length_y / 4.0,
                span.max_x,
                py + half_gap - length_y / 4.0,
            )?;
        }
        if matches!(gaps, FreeformGaps::Eight | FreeformGaps::TwoTB) {
            subtract_rectangle(
                px - half_gap + length_x / 4.0,
                span.min_y,
                px + half_gap + length_x / 4.0,
                span.max_y,
            )?;
            subtract_rectangle(
                px - half_gap - length_x / 4.0,
                span.min_y,
                px + half_gap - length_x / 4.0,
                span.max_y,
            )?;
        }
        if matches!(gaps, FreeformGaps::Four | FreeformGaps::LR) {
            subtract_rectangle(span.min_x, py - half_gap, span.max_x, py + half_gap)?;
        }
        if matches!(gaps, FreeformGaps::Four | FreeformGaps::TB) {
            subtract_rectangle(px - half_gap, span.min_y, px + half_gap, span.max_y)?;
        }

        inform.emit(MessageLevel::Success, "Any form CutOut operation finished.");
        Ok(target_name)
    }

    /// Rectangular cutout: the cut is the expanded bounding rectangle of the
    /// object, built as open line chains with notches at the side midpoints.
    ///
    /// The source is never mutated; a new geometry object named
    /// `<name>_cutout` is registered. Returns its name.
    pub fn rectangular_cutout(
        &self,
        objects: &mut ObjectCollection,
        inform: &dyn MessageSink,
        request: &CutoutRequest,
    ) -> CamToolResult<String> {
        debug!(object = %request.object, gaps = %request.gaps, "rectangular cutout requested");

        let source = match objects.get_by_name(&request.object) {
            Some(obj) => obj,
            None => {
                inform.emit(
                    MessageLevel::Error,
                    &format!("Could not retrieve object: {}", request.object),
                );
                return Err(CamToolError::ObjectNotFound {
                    name: request.object.clone(),
                });
            }
        };

        let dia = parse_field(inform, "tool_dia", "Tool diameter", &request.tool_dia)?;
        let margin = parse_field(inform, "margin", "Margin", &request.margin)?;
        let gap_size = parse_field(inform, "gap_size", "Gap size", &request.gap_size)?;

        let gaps: RectGaps = request.gaps.parse().map_err(|_| {
            inform.emit(
                MessageLevel::Warning,
                &format!(
                    "Gaps value can be only one of: {}. Fill in a correct value and retry.",
                    RectGaps::ALLOWED
                ),
            );
            CamToolError::UnknownGapLayout {
                value: request.gaps.clone(),
                allowed: RectGaps::ALLOWED,
            }
        })?;

        if dia <= 0.0 {
            inform.emit(
                MessageLevel::Error,
                "Tool diameter must be a positive value. Change it and retry.",
            );
            return Err(CamToolError::NonPositiveToolDia { value: dia });
        }

        if source.multigeo {
            inform.emit(
                MessageLevel::Error,
                "Cutout operation cannot be done on a multi-geometry object.\n\
                 Optionally, it can be converted to a single-geometry object first.",
            );
            return Err(CamToolError::MultiGeometry {
                name: source.name.clone(),
            });
        }

        let bounds = match source.bounds() {
            Ok(b) => b,
            Err(e) => {
                inform.emit(
                    MessageLevel::Error,
                    &format!("Object has no usable geometry: {}", e),
                );
                return Err(e.into());
            }
        };

        let chains = rectangular_chains(&bounds, dia, margin, gap_size, gaps);

        let out_name = format!("{}_cutout", source.name);
        objects.new_object(ObjectKind::Geometry, &out_name, move |obj| {
            obj.solid_geometry = Geometry::from_shapes(
                chains
                    .into_iter()
                    .map(|chain| Shape::Path(PathLine::new(chain)))
                    .collect(),
            );
            Ok(())
        })?;

        inform.emit(
            MessageLevel::Success,
            "Rectangular CutOut operation finished.",
        );
        Ok(out_name)
    }
}

impl Default for CutoutTool {
    fn default() -> Self {
        Self::new()
    }
}

/// The open chains of the rectangular cutout boundary.
///
/// Twelve points trace the expanded rectangle with notches of width
/// `gap_size + dia` at the side midpoints; the layout selects which chain
/// grouping is kept. Every corner lies inside exactly one chain, so the
/// boundary is continuous everywhere except at the notches themselves.
fn rectangular_chains(
    bounds: &Bounds,
    dia: f64,
    margin: f64,
    gap_size: f64,
    gaps: RectGaps,
) -> Vec<Vec<Point>> {
    let real_margin = margin + dia / 2.0;
    let real_gap_size = gap_size + dia;

    let rect = bounds.expand(real_margin);
    let (min_x, min_y, max_x, max_y) = rect.as_tuple();
    let (mid_x, mid_y) = rect.center();
    let hgap = 0.5 * real_gap_size;

    let pts = [
        Point::new(mid_x - hgap, max_y),
        Point::new(min_x, max_y),
        Point::new(min_x, mid_y + hgap),
        Point::new(min_x, mid_y - hgap),
        Point::new(min_x, min_y),
        Point::new(mid_x - hgap, min_y),
        Point::new(mid_x + hgap, min_y),
        Point::new(max_x, min_y),
        Point::new(max_x, mid_y - hgap),
        Point::new(max_x, mid_y + hgap),
        Point::new(max_x, max_y),
        Point::new(mid_x + hgap, max_y),
    ];
    let chain = |indices: &[usize]| indices.iter().map(|&i| pts[i]).collect::<Vec<_>>();

    match gaps {
        RectGaps::TB => vec![chain(&[0, 1, 4, 5]), chain(&[6, 7, 10, 11])],
        RectGaps::LR => vec![chain(&[9, 10, 1, 2]), chain(&[3, 4, 7, 8])],
        RectGaps::Four => vec![
            chain(&[0, 1, 2]),
            chain(&[3, 4, 5]),
            chain(&[6, 7, 8]),
            chain(&[9, 10, 11]),
        ],
    }
}

/// Parses one user-entered numeric field, reporting a warning through the
/// sink when it is unusable.
fn parse_field(
    inform: &dyn MessageSink,
    field: &'static str,
    label: &str,
    input: &str,
) -> CamToolResult<f64> {
    parse_user_float(input).map_err(|_| {
        inform.emit(
            MessageLevel::Warning,
            &format!("{} value is missing or wrong format. Add it and retry.", label),
        );
        CamToolError::InvalidValue {
            field,
            input: input.to_string(),
        }
    })
}
