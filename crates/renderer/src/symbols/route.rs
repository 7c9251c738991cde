//! Aviation flight-route symbol.
//!
//! A dashed chain, optionally smoothed, with a solid arrowhead on the
//! final segment and the code's pictogram placed halfway along the
//! flown distance.

use tacmap_common::MapObject;
use tracing::warn;

use crate::canvas::SvgCanvas;
use crate::curve::{smooth_path, smooth_points};
use crate::fetch::ImageFetcher;
use crate::geom::{distance, point_at_fraction, point_between, rotate_point, segment_angle};
use crate::symbols::{outer_color, render_glyph};

/// How far the arrowhead base sits behind the final point. Final
/// segments at or under this length stay bare.
const ARROW_BACKSET: f64 = 5.0;

/// Code rendered without a pictogram.
const PLAIN_ROUTE_CODE: &str = "74";

pub fn render_flight_route(
    canvas: &mut SvgCanvas,
    object: &MapObject,
    zoom: u32,
    fetcher: &dyn ImageFetcher,
) {
    let line = match object.geometry.as_line() {
        Ok(line) => line,
        Err(err) => {
            warn!(object_id = object.id, %err, "flight route needs line geometry");
            return;
        }
    };
    if line.len() < 2 {
        return;
    }

    let outer = outer_color(object);
    let dashed = format!(
        "stroke: {}; stroke-width: 1; fill: none; stroke-dasharray: 10;",
        outer
    );
    let solid = format!("stroke: {}; stroke-width: 1; fill: none;", outer);

    canvas.open_group_id(&format!("id{}", object.id));

    if object.view.use_bezier_curve {
        canvas.path(&smooth_path(line), &dashed);
    } else {
        for pair in line.windows(2) {
            canvas.line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, &dashed);
        }
    }

    if object.code != PLAIN_ROUTE_CODE {
        let chain = if object.view.use_bezier_curve {
            smooth_points(line)
        } else {
            line.to_vec()
        };
        if let Some(pos) = point_at_fraction(&chain, 0.5) {
            let heading = segment_angle(chain[pos.segment], chain[pos.segment + 1]);
            render_glyph(
                canvas,
                object,
                zoom,
                pos.point.x,
                pos.point.y,
                heading - 90.0,
                fetcher,
            );
        }
    }

    let end = line[line.len() - 1];
    let prev = line[line.len() - 2];
    let length = distance(prev, end);
    if length > ARROW_BACKSET {
        let base = point_between(prev, end, 1.0 - ARROW_BACKSET / length);
        let wing_a = rotate_point(end, base, 120.0);
        let wing_b = rotate_point(end, base, -120.0);
        canvas.polyline(
            &[(wing_a.x, wing_a.y), (end.x, end.y), (wing_b.x, wing_b.y)],
            &solid,
        );
    }

    canvas.close_group();
}
