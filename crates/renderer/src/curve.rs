//! Quadratic smoothing for point chains.
//!
//! Interior vertices become Bezier control points; the curve passes
//! through the midpoint of every original segment, and the first and
//! last points stay anchored so adjoining decorations line up.

use tacmap_common::Coord;

use crate::canvas::PathData;
use crate::geom::midpoint;

/// Parametric sampling step used when a smoothed chain has to be walked
/// like a polyline (glyph placement, hatching).
const SAMPLE_STEP: f64 = 0.1;

/// Builds path data that draws the smoothed chain.
///
/// Chains of fewer than three points have nothing to smooth and come
/// back as straight segments.
pub fn smooth_path(points: &[Coord]) -> PathData {
    let mut d = PathData::new();
    let Some(first) = points.first() else {
        return d;
    };
    d.move_to(first.x, first.y);
    if points.len() < 3 {
        for p in &points[1..] {
            d.line_to(p.x, p.y);
        }
        return d;
    }
    let lead = midpoint(points[0], points[1]);
    d.line_to(lead.x, lead.y);
    for i in 1..points.len() - 1 {
        let anchor = midpoint(points[i], points[i + 1]);
        d.quad_to(points[i].x, points[i].y, anchor.x, anchor.y);
    }
    let last = points[points.len() - 1];
    d.line_to(last.x, last.y);
    d
}

/// Flattens the smoothed chain into points, sampling every quadratic
/// piece at a fixed parametric step. The result starts and ends on the
/// original end points, so walking it by arc length matches what
/// [`smooth_path`] draws.
pub fn smooth_points(points: &[Coord]) -> Vec<Coord> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let steps = (1.0 / SAMPLE_STEP).round() as usize;
    let mut out = Vec::with_capacity(2 + (points.len() - 2) * (steps + 1));
    out.push(points[0]);
    let mut start = midpoint(points[0], points[1]);
    out.push(start);
    for i in 1..points.len() - 1 {
        let end = midpoint(points[i], points[i + 1]);
        for k in 1..steps {
            out.push(quad_point(start, points[i], end, k as f64 * SAMPLE_STEP));
        }
        out.push(end);
        start = end;
    }
    out.push(points[points.len() - 1]);
    out
}

fn quad_point(start: Coord, control: Coord, end: Coord, t: f64) -> Coord {
    let u = 1.0 - t;
    Coord::new(
        u * u * start.x + 2.0 * u * t * control.x + t * t * end.x,
        u * u * start.y + 2.0 * u * t * control.y + t * t * end.y,
    )
}
