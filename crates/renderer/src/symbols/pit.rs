//! Pit symbol: a line, optionally smoothed, hatched with short
//! perpendicular ticks on one side.

use tacmap_common::{Coord, MapObject};
use tracing::warn;

use crate::canvas::SvgCanvas;
use crate::curve::{smooth_path, smooth_points};
use crate::geom::{point_at_fraction, polyline_length, rotate_point};
use crate::symbols::outer_color;

/// Arc-length distance between consecutive ticks, which is also the
/// tick length. The final tick shortens to whatever span remains.
const TICK_SPACING: f64 = 8.0;

pub fn render_pit(canvas: &mut SvgCanvas, object: &MapObject) {
    let line = match object.geometry.as_line() {
        Ok(line) => line,
        Err(err) => {
            warn!(object_id = object.id, %err, "pit needs line geometry");
            return;
        }
    };
    if line.len() < 2 {
        return;
    }

    let style = format!(
        "stroke: {}; stroke-width: 1; fill: none;",
        outer_color(object)
    );

    canvas.open_group_id(&format!("id{}", object.id));

    let chain: Vec<Coord> = if object.view.use_bezier_curve {
        canvas.path(&smooth_path(line), &style);
        smooth_points(line)
    } else {
        let points: Vec<(f64, f64)> = line.iter().map(|p| (p.x, p.y)).collect();
        canvas.polyline(&points, &style);
        line.to_vec()
    };
    hatch_chain(canvas, &chain, &style);

    canvas.close_group();
}

/// Walks the chain dropping a tick every [`TICK_SPACING`] pixels. Each
/// tick points to the right of the travel direction, its length set by
/// the chord to the next stop so curvature never stretches it.
fn hatch_chain(canvas: &mut SvgCanvas, chain: &[Coord], style: &str) {
    let total = polyline_length(chain);
    let mut walked = TICK_SPACING;
    while walked < total {
        let Some(base) = point_at_fraction(chain, walked / total) else {
            return;
        };
        let ahead = (walked + TICK_SPACING).min(total);
        let Some(next) = point_at_fraction(chain, ahead / total) else {
            return;
        };
        let tip = rotate_point(next.point, base.point, -90.0);
        canvas.line(base.point.x, base.point.y, tip.x, tip.y, style);
        walked += TICK_SPACING;
    }
}
