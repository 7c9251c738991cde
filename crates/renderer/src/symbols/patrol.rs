//! Patrolling-area symbol.
//!
//! Each segment of the line becomes a horizontal bar drawn inside a
//! group rotated onto the segment. The outermost segments carry a
//! closing arc, so the whole chain reads as a stadium shape, and long
//! enough segments get a chevron at each end. Codes with a pictogram
//! variant place it at the midpoint of the chain, upright relative to
//! the segment it falls on.

use tacmap_common::{Coord, MapObject};
use tracing::warn;

use crate::canvas::{scope_css, PathData, SvgCanvas};
use crate::fetch::ImageFetcher;
use crate::geom::{distance, midpoint, point_at_fraction, segment_angle};
use crate::symbols::{outer_color, render_glyph};

/// Chevron arm length in pixels. Segments whose lens radius does not
/// clear this are too small to carry one.
const CHEVRON_ARM: f64 = 10.0;

/// Code rendered without a pictogram.
const PLAIN_PATROL_CODE: &str = "47";

pub fn render_patrol_area(
    canvas: &mut SvgCanvas,
    object: &MapObject,
    zoom: u32,
    fetcher: &dyn ImageFetcher,
) {
    let line = match object.geometry.as_line() {
        Ok(line) => line,
        Err(err) => {
            warn!(object_id = object.id, %err, "patrol area needs line geometry");
            return;
        }
    };
    if line.len() < 2 {
        return;
    }

    let group_id = format!("id{}", object.id);
    canvas.open_group_id(&group_id);
    canvas.style_block(&scope_css(
        &format!(
            "line, path, polyline {{ fill: none; stroke: {}; }}",
            outer_color(object)
        ),
        &group_id,
    ));

    let glyph = if object.code == PLAIN_PATROL_CODE {
        None
    } else {
        point_at_fraction(line, 0.5)
    };

    let last_segment = line.len() - 2;
    for i in 0..line.len() - 1 {
        let (a, b) = (line[i], line[i + 1]);
        let length = distance(a, b);
        if length == 0.0 {
            continue;
        }
        let center = midpoint(a, b);
        let radius_x = length / 4.0;
        let radius_y = radius_x / 2.0;
        let right = Coord::new(center.x + length / 2.0, center.y);
        let left = Coord::new(center.x - length / 2.0, center.y);

        let angle = segment_angle(a, b);
        canvas.open_group_transform(&format!("rotate({} {} {})", angle, center.x, center.y));

        if let Some(pos) = glyph {
            if pos.segment == i {
                // The group rotation maps `right` onto the segment
                // start, so the chain parameter applies right to left.
                let x = right.x + (left.x - right.x) * pos.t;
                render_glyph(canvas, object, zoom, x, center.y, -90.0, fetcher);
            }
        }

        canvas.line(right.x, right.y, left.x, left.y, "");

        if i == 0 {
            if radius_x > CHEVRON_ARM {
                let tip = Coord::new(right.x, right.y + 2.0 * radius_y);
                chevron(canvas, tip, CHEVRON_ARM);
            }
            end_arc(canvas, right, radius_x, radius_y, 2.0 * radius_y);
        }
        if i == last_segment {
            if radius_x > CHEVRON_ARM {
                let tip = Coord::new(left.x, left.y - 2.0 * radius_y);
                chevron(canvas, tip, -CHEVRON_ARM);
            }
            end_arc(canvas, left, radius_x, radius_y, -2.0 * radius_y);
        }

        canvas.close_group();
    }

    canvas.close_group();
}

/// Two arms meeting at `tip`, opening toward positive x when `arm` is
/// positive. Styling comes from the group CSS.
fn chevron(canvas: &mut SvgCanvas, tip: Coord, arm: f64) {
    canvas.polyline(
        &[
            (tip.x + arm, tip.y + arm / 2.0),
            (tip.x, tip.y),
            (tip.x + arm, tip.y - arm / 2.0),
        ],
        "",
    );
}

/// Half-ellipse closing one end of the stadium, sweeping from `from`
/// to the point `dy` below it.
fn end_arc(canvas: &mut SvgCanvas, from: Coord, radius_x: f64, radius_y: f64, dy: f64) {
    let mut d = PathData::new();
    d.move_to(from.x, from.y)
        .arc_to(radius_x, radius_y, 0.0, false, true, from.x, from.y + dy);
    canvas.path(&d, "");
}
