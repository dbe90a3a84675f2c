//! The shape set and its operations.
//!
//! Operations return new shape sets except [`Geometry::subtract_polygon`],
//! the explicit in-place boolean update used by the cutout planner. Closed
//! rings go through `cavalier_contours` for offsetting and booleans; open
//! paths are clipped with a parametric convex-region test, which covers
//! every current clip site (axis-aligned bridge rectangles).

use crate::error::{GeometryError, GeometryResult};
use crate::shapes::{ring_contains, signed_area, Bounds, PathLine, Point, Polygon, Shape};
use cavalier_contours::polyline::{
    BooleanOp, PlineSource, PlineSourceMut, PlineVertex, Polyline,
};
use serde::{Deserialize, Serialize};

const EPS: f64 = 1e-9;

/// A set of 2D shapes: solid polygons and open toolpath lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    shapes: Vec<Shape>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    pub fn from_polygon(polygon: Polygon) -> Self {
        Self {
            shapes: vec![Shape::Polygon(polygon)],
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.iter().all(|s| s.points().is_empty())
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Polygon(p) => Some(p),
            Shape::Path(_) => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathLine> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Path(p) => Some(p),
            Shape::Polygon(_) => None,
        })
    }

    /// Bounding box of the whole shape set.
    ///
    /// Fails with [`GeometryError::EmptyGeometry`] when the set holds no
    /// points at all.
    pub fn bounds(&self) -> GeometryResult<Bounds> {
        let mut acc: Option<Bounds> = None;
        for shape in &self.shapes {
            if let Some(b) = shape.bounds() {
                acc = Some(match acc {
                    Some(prev) => prev.merge(&b),
                    None => b,
                });
            }
        }
        acc.ok_or(GeometryError::EmptyGeometry)
    }

    /// Convex hull polygon over every point of the shape set.
    pub fn convex_hull(&self) -> GeometryResult<Polygon> {
        let mut points: Vec<Point> = self.shapes.iter().flat_map(|s| s.points()).collect();
        if points.is_empty() {
            return Err(GeometryError::EmptyGeometry);
        }
        points.sort_by(|a, b| {
            a.x.partial_cmp(&b.x)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
        });
        points.dedup_by(|a, b| a.distance_to(b) < EPS);
        if points.len() < 3 {
            return Err(GeometryError::Degenerate {
                reason: "convex hull needs at least 3 distinct points".to_string(),
            });
        }

        let hull = monotone_chain(&points);
        if hull.len() < 3 {
            return Err(GeometryError::Degenerate {
                reason: "all points are collinear".to_string(),
            });
        }
        Ok(Polygon::new(hull, Vec::new()))
    }

    /// Returns the geometry offset by `distance`: positive expands, negative
    /// shrinks. Exterior rings grow while holes shrink (and are dropped when
    /// they collapse). Open paths pass through unchanged.
    pub fn buffer(&self, distance: f64) -> GeometryResult<Geometry> {
        if self.shapes.is_empty() {
            return Err(GeometryError::EmptyGeometry);
        }
        if distance == 0.0 {
            return Ok(self.clone());
        }

        let mut out: Vec<Shape> = Vec::new();
        for shape in &self.shapes {
            match shape {
                Shape::Path(path) => out.push(Shape::Path(path.clone())),
                Shape::Polygon(poly) => {
                    // Exteriors are counter-clockwise; a positive cavalier
                    // offset moves inward, so expanding means negating.
                    let exteriors = ring_to_pline(poly.exterior()).parallel_offset(-distance);

                    let mut hole_rings: Vec<Vec<Point>> = Vec::new();
                    for hole in poly.holes() {
                        let mut ccw = hole.clone();
                        ccw.reverse();
                        for offset in ring_to_pline(&ccw).parallel_offset(distance) {
                            let ring = pline_to_ring(&offset);
                            if ring.len() >= 3 {
                                hole_rings.push(ring);
                            }
                        }
                    }

                    let mut remaining = hole_rings;
                    for exterior in &exteriors {
                        let ring = pline_to_ring(exterior);
                        if ring.len() < 3 {
                            continue;
                        }
                        let (inside, rest): (Vec<_>, Vec<_>) = remaining
                            .into_iter()
                            .partition(|h| ring_contains(&ring, h[0]));
                        remaining = rest;
                        out.push(Shape::Polygon(Polygon::new(ring, inside)));
                    }
                }
            }
        }
        Ok(Geometry::from_shapes(out))
    }

    /// Union of two shape sets. Overlapping solids merge through a closed
    /// polyline boolean OR; open paths are concatenated.
    pub fn union(&self, other: &Geometry) -> Geometry {
        let mut pending: Vec<Polygon> = self
            .polygons()
            .chain(other.polygons())
            .cloned()
            .collect();
        let mut merged: Vec<Polygon> = Vec::new();

        while let Some(mut poly) = pending.pop() {
            let mut i = 0;
            while i < merged.len() {
                let overlaps = match (poly.bounds(), merged[i].bounds()) {
                    (Some(a), Some(b)) => a.intersects(&b),
                    _ => false,
                };
                if overlaps {
                    let a = ring_to_pline(poly.exterior());
                    let b = ring_to_pline(merged[i].exterior());
                    let result = a.boolean(&b, BooleanOp::Or);
                    if result.pos_plines.len() == 1 {
                        let absorbed = merged.remove(i);
                        let mut holes: Vec<Vec<Point>> = poly.holes().to_vec();
                        holes.extend(absorbed.holes().iter().cloned());
                        for neg in &result.neg_plines {
                            holes.push(pline_to_ring(&neg.pline));
                        }
                        poly = Polygon::new(pline_to_ring(&result.pos_plines[0].pline), holes);
                        // Restart the scan; the grown polygon may now touch
                        // earlier members.
                        i = 0;
                        continue;
                    }
                }
                i += 1;
            }
            merged.push(poly);
        }

        let mut shapes: Vec<Shape> = merged.into_iter().map(Shape::Polygon).collect();
        shapes.extend(self.paths().cloned().map(Shape::Path));
        shapes.extend(other.paths().cloned().map(Shape::Path));
        Geometry::from_shapes(shapes)
    }

    /// In-place boolean difference of the solid geometry with one closed
    /// polygon.
    ///
    /// Holes and disjoint sub-regions already present are preserved; a clip
    /// region that does not overlap a shape leaves that shape untouched, and
    /// one fully inside a polygon becomes a new hole. Open paths lose the
    /// segments inside the region, which therefore must be convex (true of
    /// every call site: axis-aligned bridge rectangles).
    pub fn subtract_polygon(&mut self, clip: &[Point]) -> GeometryResult<()> {
        let clip_ring = orient_ccw(dedup_ring(clip));
        if clip_ring.len() < 3 {
            return Err(GeometryError::InvalidClipRegion {
                reason: "fewer than 3 distinct points".to_string(),
            });
        }
        if !is_convex(&clip_ring) && self.paths().next().is_some() {
            return Err(GeometryError::InvalidClipRegion {
                reason: "open paths can only be clipped against a convex region".to_string(),
            });
        }
        let clip_bounds = Bounds::of_points(&clip_ring).expect("ring has points");
        let clip_pline = ring_to_pline(&clip_ring);

        let shapes = std::mem::take(&mut self.shapes);
        let mut out: Vec<Shape> = Vec::new();
        for shape in shapes {
            match shape {
                Shape::Polygon(poly) => {
                    let overlaps = poly
                        .bounds()
                        .map(|b| b.intersects(&clip_bounds))
                        .unwrap_or(false);
                    if !overlaps {
                        out.push(Shape::Polygon(poly));
                        continue;
                    }
                    subtract_from_polygon(&poly, &clip_pline, &mut out);
                }
                Shape::Path(path) => {
                    for piece in clip_path_outside(&path.points, &clip_ring) {
                        out.push(Shape::Path(PathLine::new(piece)));
                    }
                }
            }
        }
        self.shapes = out;
        Ok(())
    }
}

/// Difference of one polygon with the clip ring, pushing the resulting
/// polygons (with surviving and newly created holes) onto `out`.
fn subtract_from_polygon(poly: &Polygon, clip_pline: &Polyline<f64>, out: &mut Vec<Shape>) {
    let exterior = ring_to_pline(poly.exterior());
    let result = exterior.boolean(clip_pline, BooleanOp::Not);

    // A hole survives as hole-minus-clip; the part of it under the clip
    // region was removed along with the surrounding material.
    let mut holes: Vec<Vec<Point>> = Vec::new();
    for hole in poly.holes() {
        let mut ccw = hole.clone();
        ccw.reverse();
        let clipped = ring_to_pline(&ccw).boolean(clip_pline, BooleanOp::Not);
        for piece in &clipped.pos_plines {
            let ring = pline_to_ring(&piece.pline);
            if ring.len() >= 3 {
                holes.push(ring);
            }
        }
    }
    // A clip region fully inside the exterior comes back as a negative loop.
    for neg in &result.neg_plines {
        let ring = pline_to_ring(&neg.pline);
        if ring.len() >= 3 {
            holes.push(ring);
        }
    }

    let mut remaining = holes;
    for pos in &result.pos_plines {
        let ring = pline_to_ring(&pos.pline);
        if ring.len() < 3 {
            continue;
        }
        let (inside, rest): (Vec<_>, Vec<_>) = remaining
            .into_iter()
            .partition(|h| ring_contains(&ring, h[0]));
        remaining = rest;
        out.push(Shape::Polygon(Polygon::new(ring, inside)));
    }
}

fn ring_to_pline(ring: &[Point]) -> Polyline<f64> {
    let mut pline = Polyline::new();
    for p in ring {
        pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    pline.set_is_closed(true);
    pline
}

/// Segments used to approximate a full circle when flattening arcs.
const ARC_STEPS_PER_CIRCLE: usize = 64;

/// Converts a cavalier polyline back to a line-only ring, flattening any arc
/// (bulge) vertices produced by offsetting.
fn pline_to_ring(pline: &Polyline<f64>) -> Vec<Point> {
    let verts = &pline.vertex_data;
    let mut ring: Vec<Point> = Vec::with_capacity(verts.len());
    for (i, v) in verts.iter().enumerate() {
        let start = Point::new(v.x, v.y);
        ring.push(start);
        if v.bulge.abs() < EPS {
            continue;
        }
        let next = verts[(i + 1) % verts.len()];
        let end = Point::new(next.x, next.y);
        ring.extend(flatten_arc(start, end, v.bulge));
    }
    ring
}

/// Intermediate points of the arc from `p1` to `p2` with the given bulge
/// (`tan(sweep/4)`, positive sweeping counter-clockwise). Endpoints are not
/// included.
fn flatten_arc(p1: Point, p2: Point, bulge: f64) -> Vec<Point> {
    let chord_x = p2.x - p1.x;
    let chord_y = p2.y - p1.y;
    let chord = (chord_x * chord_x + chord_y * chord_y).sqrt();
    if chord < EPS {
        return Vec::new();
    }
    let sweep = 4.0 * bulge.atan();
    let radius = chord / (2.0 * (sweep.abs() / 2.0).sin());
    // Center sits across the chord from the bulge direction.
    let k = (1.0 - bulge * bulge) / (4.0 * bulge);
    let cx = 0.5 * (p1.x + p2.x) + chord_y * k;
    let cy = 0.5 * (p1.y + p2.y) - chord_x * k;

    let start_angle = (p1.y - cy).atan2(p1.x - cx);
    let steps = ((sweep.abs() / (2.0 * std::f64::consts::PI)) * ARC_STEPS_PER_CIRCLE as f64)
        .ceil()
        .max(1.0) as usize;
    (1..steps)
        .map(|i| {
            let angle = start_angle + sweep * (i as f64 / steps as f64);
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

fn dedup_ring(ring: &[Point]) -> Vec<Point> {
    let mut cleaned: Vec<Point> = Vec::with_capacity(ring.len());
    for p in ring {
        if cleaned.last().map(|l| l.distance_to(p) >= EPS).unwrap_or(true) {
            cleaned.push(*p);
        }
    }
    while cleaned.len() > 1 && cleaned[0].distance_to(cleaned.last().unwrap()) < EPS {
        cleaned.pop();
    }
    cleaned
}

fn orient_ccw(mut ring: Vec<Point>) -> Vec<Point> {
    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }
    ring
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn is_convex(ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    ring.iter().enumerate().all(|(i, _)| {
        cross(ring[i], ring[(i + 1) % n], ring[(i + 2) % n]) >= -EPS
    })
}

/// Andrew's monotone chain over points already sorted by (x, y).
fn monotone_chain(points: &[Point]) -> Vec<Point> {
    let mut lower: Vec<Point> = Vec::new();
    for &p in points {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= EPS {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Point> = Vec::new();
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= EPS {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Splits an open path into the pieces lying outside the convex clip ring.
///
/// Each segment's inside interval is found parametrically against the ring's
/// half-planes; kept pieces are re-chained so a path crossing the region
/// once yields two open paths.
fn clip_path_outside(points: &[Point], clip_ccw: &[Point]) -> Vec<Vec<Point>> {
    let mut pieces: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    let mut push_point = |chain: &mut Vec<Point>, p: Point| {
        if chain.last().map(|l| l.distance_to(&p) >= EPS).unwrap_or(true) {
            chain.push(p);
        }
    };

    for seg in points.windows(2) {
        let (p0, p1) = (seg[0], seg[1]);
        match inside_interval(p0, p1, clip_ccw) {
            None => {
                // Entirely outside; extend the current chain.
                push_point(&mut current, p0);
                push_point(&mut current, p1);
            }
            Some((t_enter, t_exit)) => {
                if t_enter > EPS {
                    push_point(&mut current, p0);
                    push_point(&mut current, lerp(p0, p1, t_enter));
                }
                if current.len() >= 2 {
                    pieces.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                if t_exit < 1.0 - EPS {
                    push_point(&mut current, lerp(p0, p1, t_exit));
                    push_point(&mut current, p1);
                }
            }
        }
    }
    if current.len() >= 2 {
        pieces.push(current);
    }
    pieces
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

/// Parametric interval of `p0 -> p1` inside the convex CCW ring, or `None`
/// when the segment never enters it.
fn inside_interval(p0: Point, p1: Point, clip_ccw: &[Point]) -> Option<(f64, f64)> {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let mut t_lo: f64 = 0.0;
    let mut t_hi: f64 = 1.0;
    let n = clip_ccw.len();
    for i in 0..n {
        let a = clip_ccw[i];
        let b = clip_ccw[(i + 1) % n];
        let ex = b.x - a.x;
        let ey = b.y - a.y;
        // Inside the CCW ring means left of every edge: cross(e, p - a) >= 0.
        let c0 = ex * (p0.y - a.y) - ey * (p0.x - a.x);
        let c1 = ex * dy - ey * dx;
        if c1.abs() < EPS {
            if c0 < 0.0 {
                return None;
            }
        } else {
            let t = -c0 / c1;
            if c1 > 0.0 {
                t_lo = t_lo.max(t);
            } else {
                t_hi = t_hi.min(t);
            }
            if t_lo >= t_hi {
                return None;
            }
        }
    }
    Some((t_lo, t_hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Polygon {
        Polygon::rectangle(0.0, 0.0, size, size)
    }

    #[test]
    fn test_bounds_of_empty_set() {
        assert_eq!(Geometry::new().bounds(), Err(GeometryError::EmptyGeometry));
    }

    #[test]
    fn test_bounds_spans_all_shapes() {
        let mut geo = Geometry::from_polygon(square(10.0));
        geo.push(Shape::Path(PathLine::new(vec![
            Point::new(-5.0, 2.0),
            Point::new(20.0, 3.0),
        ])));
        assert_eq!(geo.bounds().unwrap().as_tuple(), (-5.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_convex_hull_of_square_with_interior_point() {
        let mut geo = Geometry::from_polygon(square(10.0));
        geo.push(Shape::Path(PathLine::new(vec![Point::new(5.0, 5.0)])));
        let hull = geo.convex_hull().unwrap();
        assert_eq!(hull.exterior().len(), 4);
        assert!((hull.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_convex_hull_rejects_collinear() {
        let geo = Geometry::from_shapes(vec![Shape::Path(PathLine::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ]))]);
        assert!(matches!(
            geo.convex_hull(),
            Err(GeometryError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_buffer_expands_bounds() {
        let geo = Geometry::from_polygon(square(10.0));
        let grown = geo.buffer(2.0).unwrap();
        let b = grown.bounds().unwrap();
        assert!((b.min_x - -2.0).abs() < 1e-6);
        assert!((b.max_x - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_buffer_round_trip_bounds() {
        let geo = Geometry::from_polygon(square(10.0));
        let round = geo.buffer(3.0).unwrap().buffer(-3.0).unwrap();
        let b = round.bounds().unwrap();
        let (min_x, min_y, max_x, max_y) = b.as_tuple();
        assert!((min_x - 0.0).abs() < 1e-6);
        assert!((min_y - 0.0).abs() < 1e-6);
        assert!((max_x - 10.0).abs() < 1e-6);
        assert!((max_y - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_buffer_keeps_winding() {
        let geo = Geometry::from_polygon(Polygon::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(20.0, 0.0),
                Point::new(20.0, 20.0),
                Point::new(0.0, 20.0),
            ],
            vec![vec![
                Point::new(8.0, 8.0),
                Point::new(12.0, 8.0),
                Point::new(12.0, 12.0),
                Point::new(8.0, 12.0),
            ]],
        ));
        let grown = geo.buffer(1.0).unwrap();
        let poly = grown.polygons().next().unwrap();
        assert!(signed_area(poly.exterior()) > 0.0);
        // The hole shrank but is still there, still clockwise.
        assert_eq!(poly.holes().len(), 1);
        assert!(signed_area(&poly.holes()[0]) < 0.0);
    }

    #[test]
    fn test_buffer_empty_fails() {
        assert_eq!(
            Geometry::new().buffer(1.0),
            Err(GeometryError::EmptyGeometry)
        );
    }

    #[test]
    fn test_subtract_non_overlapping_is_noop() {
        let mut geo = Geometry::from_polygon(square(10.0));
        let before = geo.bounds().unwrap();
        geo.subtract_polygon(&[
            Point::new(20.0, 20.0),
            Point::new(30.0, 20.0),
            Point::new(30.0, 30.0),
            Point::new(20.0, 30.0),
        ])
        .unwrap();
        assert_eq!(geo.bounds().unwrap(), before);
        assert_eq!(geo.polygons().count(), 1);
    }

    #[test]
    fn test_subtract_splits_polygon() {
        let mut geo = Geometry::from_polygon(square(10.0));
        // A band across the middle splits the square in two.
        geo.subtract_polygon(&[
            Point::new(-1.0, 4.0),
            Point::new(11.0, 4.0),
            Point::new(11.0, 6.0),
            Point::new(-1.0, 6.0),
        ])
        .unwrap();
        assert_eq!(geo.polygons().count(), 2);
        let total: f64 = geo.polygons().map(|p| p.area()).sum();
        assert!((total - 80.0).abs() < 1e-6);
    }

    #[test]
    fn test_subtract_interior_region_becomes_hole() {
        let mut geo = Geometry::from_polygon(square(10.0));
        geo.subtract_polygon(&[
            Point::new(4.0, 4.0),
            Point::new(6.0, 4.0),
            Point::new(6.0, 6.0),
            Point::new(4.0, 6.0),
        ])
        .unwrap();
        let poly = geo.polygons().next().unwrap();
        assert_eq!(poly.holes().len(), 1);
        assert!((poly.area() - 96.0).abs() < 1e-6);
    }

    #[test]
    fn test_subtract_preserves_disjoint_regions() {
        let mut geo = Geometry::from_shapes(vec![
            Shape::Polygon(square(10.0)),
            Shape::Polygon(Polygon::rectangle(20.0, 0.0, 30.0, 10.0)),
        ]);
        geo.subtract_polygon(&[
            Point::new(-1.0, 4.0),
            Point::new(11.0, 4.0),
            Point::new(11.0, 6.0),
            Point::new(-1.0, 6.0),
        ])
        .unwrap();
        // First square split in two, second untouched.
        assert_eq!(geo.polygons().count(), 3);
    }

    #[test]
    fn test_subtract_clips_open_path() {
        let mut geo = Geometry::from_shapes(vec![Shape::Path(PathLine::new(vec![
            Point::new(0.0, 5.0),
            Point::new(10.0, 5.0),
        ]))]);
        geo.subtract_polygon(&[
            Point::new(4.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(6.0, 10.0),
            Point::new(4.0, 10.0),
        ])
        .unwrap();
        let paths: Vec<_> = geo.paths().collect();
        assert_eq!(paths.len(), 2);
        assert!((paths[0].points.last().unwrap().x - 4.0).abs() < 1e-9);
        assert!((paths[1].points.first().unwrap().x - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_subtract_rejects_degenerate_clip() {
        let mut geo = Geometry::from_polygon(square(10.0));
        let result = geo.subtract_polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(matches!(
            result,
            Err(GeometryError::InvalidClipRegion { .. })
        ));
    }

    #[test]
    fn test_union_merges_overlapping_squares() {
        let a = Geometry::from_polygon(square(10.0));
        let b = Geometry::from_polygon(Polygon::rectangle(5.0, 0.0, 15.0, 10.0));
        let merged = a.union(&b);
        assert_eq!(merged.polygons().count(), 1);
        assert!((merged.polygons().next().unwrap().area() - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_union_keeps_disjoint_squares() {
        let a = Geometry::from_polygon(square(10.0));
        let b = Geometry::from_polygon(Polygon::rectangle(20.0, 0.0, 30.0, 10.0));
        let merged = a.union(&b);
        assert_eq!(merged.polygons().count(), 2);
    }

    #[test]
    fn test_union_concatenates_paths() {
        let a = Geometry::from_shapes(vec![Shape::Path(PathLine::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        ]))]);
        let b = Geometry::from_shapes(vec![Shape::Path(PathLine::new(vec![
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ]))]);
        assert_eq!(a.union(&b).paths().count(), 2);
    }

    #[test]
    fn test_inside_interval_crossing() {
        let clip = vec![
            Point::new(4.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(6.0, 10.0),
            Point::new(4.0, 10.0),
        ];
        let (t0, t1) =
            inside_interval(Point::new(0.0, 5.0), Point::new(10.0, 5.0), &clip).unwrap();
        assert!((t0 - 0.4).abs() < 1e-9);
        assert!((t1 - 0.6).abs() < 1e-9);
        assert!(inside_interval(Point::new(0.0, 20.0), Point::new(10.0, 20.0), &clip).is_none());
    }
}
