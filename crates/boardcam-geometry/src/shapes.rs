//! Shape primitives for the geometry model.
//!
//! A shape set holds closed polygons (solid regions, possibly with holes)
//! and open polylines (toolpath lines). Polygons keep a fixed winding
//! convention: exteriors counter-clockwise, holes clockwise. The convention
//! is normalized on construction so boolean and offset results can never
//! carry a reversed winding.

use serde::{Deserialize, Serialize};

const DUP_EPS: f64 = 1e-9;

/// Represents a 2D point with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds of a point list, `None` when it is empty.
    pub fn of_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            if p.x < bounds.min_x {
                bounds.min_x = p.x;
            }
            if p.x > bounds.max_x {
                bounds.max_x = p.x;
            }
            if p.y < bounds.min_y {
                bounds.min_y = p.y;
            }
            if p.y > bounds.max_y {
                bounds.max_y = p.y;
            }
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Midpoint of the box.
    pub fn center(&self) -> (f64, f64) {
        (
            0.5 * (self.min_x + self.max_x),
            0.5 * (self.min_y + self.max_y),
        )
    }

    /// Grows (or shrinks, for negative `margin`) the box on all sides.
    pub fn expand(&self, margin: f64) -> Bounds {
        Bounds::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    /// Smallest box covering both.
    pub fn merge(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Whether the two boxes overlap (shared edges count).
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Returns the box as the `(xmin, ymin, xmax, ymax)` tuple used by
    /// export collaborators.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Signed area of a ring (shoelace). Positive for counter-clockwise winding.
pub fn signed_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let p1 = ring[i];
        let p2 = ring[(i + 1) % ring.len()];
        sum += p1.x * p2.y - p2.x * p1.y;
    }
    0.5 * sum
}

fn normalize_ring(mut ring: Vec<Point>, counter_clockwise: bool) -> Vec<Point> {
    // Drop an explicit closing vertex; rings are implicitly closed.
    while ring.len() > 1 {
        let first = ring[0];
        let last = ring[ring.len() - 1];
        if first.distance_to(&last) < DUP_EPS {
            ring.pop();
        } else {
            break;
        }
    }
    if (signed_area(&ring) > 0.0) != counter_clockwise {
        ring.reverse();
    }
    ring
}

/// A closed polygon with optional holes.
///
/// The exterior ring winds counter-clockwise and holes wind clockwise;
/// construction normalizes both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    exterior: Vec<Point>,
    holes: Vec<Vec<Point>>,
}

impl Polygon {
    pub fn new(exterior: Vec<Point>, holes: Vec<Vec<Point>>) -> Self {
        Self {
            exterior: normalize_ring(exterior, true),
            holes: holes
                .into_iter()
                .map(|h| normalize_ring(h, false))
                .filter(|h| h.len() >= 3)
                .collect(),
        }
    }

    /// Axis-aligned rectangle spanning the two corners.
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self::new(
            vec![
                Point::new(min_x, min_y),
                Point::new(max_x, min_y),
                Point::new(max_x, max_y),
                Point::new(min_x, max_y),
            ],
            Vec::new(),
        )
    }

    pub fn exterior(&self) -> &[Point] {
        &self.exterior
    }

    pub fn holes(&self) -> &[Vec<Point>] {
        &self.holes
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(&self.exterior)
    }

    /// Net enclosed area (exterior minus holes).
    pub fn area(&self) -> f64 {
        let mut area = signed_area(&self.exterior).abs();
        for hole in &self.holes {
            area -= signed_area(hole).abs();
        }
        area
    }

    /// Ray-cast containment test against the exterior and holes.
    pub fn contains_point(&self, p: Point) -> bool {
        if !ring_contains(&self.exterior, p) {
            return false;
        }
        !self.holes.iter().any(|hole| ring_contains(hole, p))
    }
}

/// Ray-cast point-in-ring test; the ring winding does not matter.
pub(crate) fn ring_contains(ring: &[Point], p: Point) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// An open polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLine {
    pub points: Vec<Point>,
}

impl PathLine {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(&self.points)
    }

    /// Total polyline length.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}

/// A single member of a shape set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Polygon(Polygon),
    Path(PathLine),
}

impl Shape {
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Shape::Polygon(p) => p.bounds(),
            Shape::Path(p) => p.bounds(),
        }
    }

    /// All vertices of the shape, holes included.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Shape::Polygon(p) => {
                let mut pts = p.exterior().to_vec();
                for hole in p.holes() {
                    pts.extend_from_slice(hole);
                }
                pts
            }
            Shape::Path(p) => p.points.clone(),
        }
    }
}
