//! Built-in tactical symbol renderers.
//!
//! Every renderer takes an object whose geometry is already in tile
//! pixel space, draws onto the shared canvas, and never fails: objects
//! with unusable geometry are logged and skipped so one bad row cannot
//! take out a whole tile.

mod antenna;
mod arrow;
mod patrol;
mod pit;
mod route;

pub use antenna::{render_antenna_grid, render_beam_diagram};
pub use arrow::{render_attack_arrow, render_completed_arrow, render_planned_arrow};
pub use patrol::render_patrol_area;
pub use pit::render_pit;
pub use route::render_flight_route;

use base64::Engine;
use tacmap_common::MapObject;
use tracing::warn;

use crate::canvas::SvgCanvas;
use crate::fetch::ImageFetcher;

fn outer_color(object: &MapObject) -> &str {
    object.view.color_outer.as_deref().unwrap_or("black")
}

/// Inlines the pictogram for `object.code` centered on `(x, y)`,
/// wrapped in a rotation about that point. Glyphs grow linearly with
/// zoom so they stay readable as tiles subdivide.
fn render_glyph(
    canvas: &mut SvgCanvas,
    object: &MapObject,
    zoom: u32,
    x: f64,
    y: f64,
    rotation: f64,
    fetcher: &dyn ImageFetcher,
) {
    let width = 5.0 + 5.0 * zoom as f64;
    let height = 7.0 + 6.0 * zoom as f64;
    let href = format!("{}.png", object.code);
    let bytes = match fetcher.fetch(&href) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(object_id = object.id, href = %href, %err, "skipping symbol glyph");
            return;
        }
    };
    let payload = base64::engine::general_purpose::STANDARD.encode(&bytes);
    canvas.open_group_transform(&format!("rotate({} {} {})", rotation, x, y));
    canvas.image(
        x - width / 2.0,
        y - height / 2.0,
        width,
        height,
        &format!("data:image/png;base64,{}", payload),
    );
    canvas.close_group();
}
