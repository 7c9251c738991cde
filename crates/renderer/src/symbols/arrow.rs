//! Broad operational arrows drawn over a two-point axis.
//!
//! The axis gives the arrow its length and bearing; the body is built
//! in a horizontal frame and rotated into place. Three variants share
//! the frame: a solid attack arrow, a dashed planned one, and a bare
//! outline marking a completed action.

use tacmap_common::{Coord, MapObject};
use tracing::warn;

use crate::canvas::SvgCanvas;
use crate::geom::{distance, midpoint, segment_angle};

const DEFAULT_ARROW_COLOR: &str = "red";

pub fn render_attack_arrow(canvas: &mut SvgCanvas, object: &MapObject) {
    render_big_arrow(canvas, object, ArrowStyle::Solid);
}

pub fn render_planned_arrow(canvas: &mut SvgCanvas, object: &MapObject) {
    render_big_arrow(canvas, object, ArrowStyle::Dashed);
}

pub fn render_completed_arrow(canvas: &mut SvgCanvas, object: &MapObject) {
    render_big_arrow(canvas, object, ArrowStyle::OutlineOnly);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrowStyle {
    Solid,
    Dashed,
    OutlineOnly,
}

fn render_big_arrow(canvas: &mut SvgCanvas, object: &MapObject, style: ArrowStyle) {
    let line = match object.geometry.as_line() {
        Ok(line) => line,
        Err(err) => {
            warn!(object_id = object.id, %err, "operational arrow needs line geometry");
            return;
        }
    };
    if line.len() < 2 {
        return;
    }
    let Some(frame) = ArrowFrame::from_axis(line[0], line[1]) else {
        return;
    };

    let outer = object
        .view
        .color_outer
        .as_deref()
        .unwrap_or(DEFAULT_ARROW_COLOR);
    let inner = object
        .view
        .color_inner
        .as_deref()
        .unwrap_or(DEFAULT_ARROW_COLOR);

    canvas.open_group_id(&format!("id{}", object.id));
    canvas.open_group_transform(&format!(
        "rotate({} {} {})",
        frame.angle + 180.0,
        frame.center.x,
        frame.center.y
    ));

    if style != ArrowStyle::OutlineOnly {
        canvas.polyline(
            &as_pairs(&frame.head),
            &format!("stroke: {}; fill: {};", outer, inner),
        );
    }
    let outline_style = match style {
        ArrowStyle::Solid => format!("stroke: {}; stroke-width: 1; fill: none;", outer),
        ArrowStyle::Dashed => format!(
            "stroke: {}; stroke-width: 1; fill: none; stroke-dasharray: 10;",
            outer
        ),
        ArrowStyle::OutlineOnly => format!("stroke: {}; fill: none;", outer),
    };
    canvas.polyline(&as_pairs(&frame.outline), &outline_style);

    canvas.close_group();
    canvas.close_group();
}

/// Arrow body laid out along the positive x axis.
struct ArrowFrame {
    center: Coord,
    angle: f64,
    head: [Coord; 3],
    outline: [Coord; 7],
}

impl ArrowFrame {
    fn from_axis(a: Coord, b: Coord) -> Option<Self> {
        let length = distance(a, b);
        if length == 0.0 {
            return None;
        }
        let center = midpoint(a, b);
        let (cx, cy) = (center.x, center.y);
        let half = length / 2.0;
        let edge = length / 10.0;

        let tip = Coord::new(cx + half, cy);
        let head = [
            Coord::new(tip.x, tip.y + edge / 2.0),
            Coord::new(tip.x + 3f64.sqrt() / 2.0 * edge, tip.y),
            Coord::new(tip.x, tip.y - edge / 2.0),
        ];
        // Shaft edges taper from edge/2 at the tail to edge/6 where the
        // head takes over.
        let outline = [
            Coord::new(cx - half, cy + edge / 2.0),
            Coord::new(cx + half, cy + edge / 6.0),
            head[0],
            head[1],
            head[2],
            Coord::new(cx + half, cy - edge / 6.0),
            Coord::new(cx - half, cy - edge / 2.0),
        ];
        Some(ArrowFrame {
            center,
            angle: segment_angle(a, b),
            head,
            outline,
        })
    }
}

fn as_pairs(points: &[Coord]) -> Vec<(f64, f64)> {
    points.iter().map(|p| (p.x, p.y)).collect()
}
