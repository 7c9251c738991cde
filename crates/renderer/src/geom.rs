//! Planar math shared by the symbol renderers.
//!
//! Everything here works in tile pixel space. Angles are in degrees to
//! match SVG transform syntax.

use tacmap_common::Coord;

/// Euclidean distance between two points.
pub fn distance(a: Coord, b: Coord) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

pub fn midpoint(a: Coord, b: Coord) -> Coord {
    Coord::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Total length of a point chain. Degenerate chains report zero.
pub fn polyline_length(points: &[Coord]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Point on the segment `a -> b` at parameter `t` (0 at `a`, 1 at `b`).
pub fn point_between(a: Coord, b: Coord, t: f64) -> Coord {
    Coord::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Orientation of the segment `from -> to` in degrees, measured so that
/// `rotate(angle)` about the segment midpoint maps the horizontal
/// diameter onto the segment. Zero-length segments report zero.
pub fn segment_angle(from: Coord, to: Coord) -> f64 {
    let len = distance(from, to);
    if len == 0.0 {
        return 0.0;
    }
    let mut angle = ((from.x - to.x) / len).acos().to_degrees();
    if (angle < 0.0 && from.y > to.y) || (angle > 0.0 && from.y < to.y) {
        angle = -angle;
    }
    angle
}

/// Rotates `p` about `center` by `degrees`, matching the direction of
/// SVG `rotate()` transforms.
pub fn rotate_point(p: Coord, center: Coord, degrees: f64) -> Coord {
    let radians = degrees.to_radians();
    let (s, c) = radians.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Coord::new(c * dx - s * dy + center.x, s * dx + c * dy + center.y)
}

/// Location on a point chain, resolved by [`point_at_fraction`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainPosition {
    /// Index of the segment the position falls on.
    pub segment: usize,
    /// Parameter within that segment, 0 at its start and 1 at its end.
    pub t: f64,
    pub point: Coord,
}

/// Walks `fraction` of the chain's total length and reports where that
/// lands. Zero-length segments are stepped over; a chain with no length
/// has no interior and yields `None`.
pub fn point_at_fraction(points: &[Coord], fraction: f64) -> Option<ChainPosition> {
    let total = polyline_length(points);
    if total == 0.0 {
        return None;
    }
    let target = total * fraction.clamp(0.0, 1.0);
    let mut walked = 0.0;
    let mut last = 0usize;
    for i in 0..points.len() - 1 {
        let seg = distance(points[i], points[i + 1]);
        if seg == 0.0 {
            continue;
        }
        if walked + seg >= target {
            let t = (target - walked) / seg;
            return Some(ChainPosition {
                segment: i,
                t,
                point: point_between(points[i], points[i + 1], t),
            });
        }
        walked += seg;
        last = i;
    }
    // Accumulated rounding can leave the final fraction just past the
    // last segment; clamp onto its end point.
    Some(ChainPosition {
        segment: last,
        t: 1.0,
        point: points[last + 1],
    })
}
