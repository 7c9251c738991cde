//! Tile orchestration.
//!
//! Projects each object into tile pixel space once, then runs it
//! through the style catalog, the symbol registry, and the antenna
//! overlays. Rendering a tile always produces a document; objects that
//! cannot be drawn are logged and left out.

use std::sync::Arc;

use tacmap_common::{Coord, MapObject, Tile, TILE_SIZE};
use tracing::debug;

use crate::canvas::SvgCanvas;
use crate::fetch::ImageFetcher;
use crate::registry::{SymbolKind, SymbolRegistry};
use crate::style::StyleCatalog;
use crate::symbols;

pub struct TileRenderer {
    styles: StyleCatalog,
    registry: SymbolRegistry,
    fetcher: Arc<dyn ImageFetcher>,
}

impl TileRenderer {
    pub fn new(
        styles: StyleCatalog,
        registry: SymbolRegistry,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Self {
        TileRenderer {
            styles,
            registry,
            fetcher,
        }
    }

    /// Draws `objects` onto a fresh tile-sized SVG document.
    pub fn render_tile(&self, tile: &Tile, objects: &[MapObject]) -> Vec<u8> {
        let mut canvas = SvgCanvas::new(TILE_SIZE, TILE_SIZE);
        for object in objects {
            let projected = project(tile, object);
            self.render_object(&mut canvas, tile.z, &projected);
        }
        debug!(
            z = tile.z,
            x = tile.x,
            y = tile.y,
            objects = objects.len(),
            "rendered tile"
        );
        canvas.finish()
    }

    fn render_object(&self, canvas: &mut SvgCanvas, zoom: u32, object: &MapObject) {
        if let Some(style) = self.styles.find(object) {
            style.render(canvas, object, self.fetcher.as_ref());
        }
        match self.registry.lookup(&object.code) {
            Some(SymbolKind::PatrolArea) => {
                symbols::render_patrol_area(canvas, object, zoom, self.fetcher.as_ref())
            }
            Some(SymbolKind::FlightRoute) => {
                symbols::render_flight_route(canvas, object, zoom, self.fetcher.as_ref())
            }
            Some(SymbolKind::AttackArrow) => symbols::render_attack_arrow(canvas, object),
            Some(SymbolKind::PlannedArrow) => symbols::render_planned_arrow(canvas, object),
            Some(SymbolKind::CompletedArrow) => symbols::render_completed_arrow(canvas, object),
            Some(SymbolKind::Pit) => symbols::render_pit(canvas, object),
            None => {}
        }
        if object.antenna.is_antenna && object.antenna.show_diagram {
            symbols::render_beam_diagram(canvas, object, zoom);
        }
        if object.antenna.show_grid {
            symbols::render_antenna_grid(canvas, object, zoom);
        }
    }
}

fn project(tile: &Tile, object: &MapObject) -> MapObject {
    let mut projected = object.clone();
    projected.geometry = object.geometry.map_coords(|c| {
        let (x, y) = tile.degrees_to_pixels(c.y, c.x);
        Coord::new(x, y)
    });
    projected
}
