//! Slippy-map tile addressing and degree/pixel projection.

use crate::BoundingBox;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tile edge length in pixels.
pub const TILE_SIZE: u32 = 256;

/// ln(f64::MAX); caps the Mercator term when the latitude leaves the
/// projectable range and the logarithm diverges.
const MERCATOR_LIMIT: f64 = 709.782712893384;

/// A slippy-map tile (z/x/y) with its geographic bounds.
///
/// Constructed once per request; the bounds are derived from the indices and
/// never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
    /// Zoom level
    pub z: u32,
    /// Geographic extent of the tile
    pub bounds: BoundingBox,
}

impl Tile {
    /// Build a tile from slippy-map indices, deriving its bounding box.
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        let bounds = BoundingBox {
            north: tile_lat(y, z),
            south: tile_lat(y + 1, z),
            east: tile_lon(x + 1, z),
            west: tile_lon(x, z),
        };
        Self { x, y, z, bounds }
    }

    /// The tile containing a coordinate at the given zoom.
    pub fn containing(lat: f64, lon: f64, zoom: u32) -> Self {
        let n = 2u32.pow(zoom) as f64;

        let x = ((lon + 180.0) / 360.0 * n).floor() as u32;
        let lat_rad = lat.to_radians();
        let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor() as u32;

        Tile::new(x, y, zoom)
    }

    /// Project a geographic coordinate into this tile's pixel space.
    ///
    /// Pixels are measured from the tile's top-left corner and floored to
    /// whole units; coordinates outside the tile land outside [0, 256).
    /// Latitudes beyond the Web Mercator range (±85.0511°) diverge; the
    /// Mercator term is capped to a large finite magnitude so the result is
    /// never NaN or infinite.
    pub fn degrees_to_pixels(&self, lat: f64, lon: f64) -> (f64, f64) {
        let n = 2u32.pow(self.z) as f64;
        let size = TILE_SIZE as f64;

        let px = (size * ((lon + 180.0) / 360.0 * n - self.x as f64)).floor();

        let lat_rad = lat.to_radians();
        let mut merc = (lat_rad.tan() + 1.0 / lat_rad.cos()).ln();
        if !merc.is_finite() {
            merc = MERCATOR_LIMIT.copysign(merc);
        }
        let py = (size * ((1.0 - merc / PI) / 2.0 * n - self.y as f64)).floor();

        (px, py)
    }

    /// Whether a coordinate falls inside this tile's bounds.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.bounds.contains(lat, lon)
    }
}

fn tile_lon(x: u32, z: u32) -> f64 {
    let n = 2u32.pow(z) as f64;
    x as f64 / n * 360.0 - 180.0
}

fn tile_lat(y: u32, z: u32) -> f64 {
    let n = 2u32.pow(z) as f64;
    (PI * (1.0 - 2.0 * y as f64 / n)).sinh().atan().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_tile_bounds() {
        let tile = Tile::new(0, 0, 0);

        assert!((tile.bounds.north - 85.05112877980659).abs() < 1e-9);
        assert!((tile.bounds.south - (-85.05112877980659)).abs() < 1e-9);
        assert!((tile.bounds.west - (-180.0)).abs() < 1e-9);
        assert!((tile.bounds.east - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_ordered_across_zooms() {
        for z in 0..6 {
            let n = 2u32.pow(z);
            for x in 0..n {
                for y in 0..n {
                    let tile = Tile::new(x, y, z);
                    assert!(
                        tile.bounds.north > tile.bounds.south,
                        "tile {}/{}/{}",
                        z,
                        x,
                        y
                    );
                    assert!(
                        tile.bounds.east > tile.bounds.west,
                        "tile {}/{}/{}",
                        z,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_adjacent_tiles_share_edges() {
        let left = Tile::new(4, 3, 5);
        let right = Tile::new(5, 3, 5);
        let below = Tile::new(4, 4, 5);

        assert_eq!(left.bounds.east, right.bounds.west);
        assert_eq!(left.bounds.south, below.bounds.north);
    }

    #[test]
    fn test_containing() {
        // Greenwich at zoom 0 is the single world tile.
        let tile = Tile::containing(51.478, 0.0, 0);
        assert_eq!((tile.x, tile.y, tile.z), (0, 0, 0));

        // A point comfortably inside tile 2475/1280 at zoom 12.
        let tile = Tile::containing(55.75, 37.57, 12);
        assert_eq!((tile.x, tile.y, tile.z), (2475, 1280, 12));
        assert!(tile.contains(55.75, 37.57));
    }

    #[test]
    fn test_tile_north_edge_constant() {
        // Row 1280 at zoom 12 starts at the reference latitude used by the
        // tile grid fixtures.
        let tile = Tile::new(2475, 1280, 12);
        assert!((tile.bounds.north - 55.77657301866769).abs() < 1e-9);
    }

    #[test]
    fn test_center_projects_to_tile_center() {
        let world = Tile::new(0, 0, 0);
        assert_eq!(world.degrees_to_pixels(0.0, 0.0), (128.0, 128.0));

        // At deep zooms the geographic bbox center is within a pixel of the
        // projected center.
        let tile = Tile::new(2475, 1280, 12);
        let lat = (tile.bounds.north + tile.bounds.south) / 2.0;
        let lon = (tile.bounds.east + tile.bounds.west) / 2.0;
        let (px, py) = tile.degrees_to_pixels(lat, lon);
        assert!((px - 128.0).abs() <= 1.0);
        assert!((py - 128.0).abs() <= 1.0);
    }

    #[test]
    fn test_projection_outside_tile() {
        let tile = Tile::new(2475, 1280, 12);
        // One tile further west and one further north land in the negative
        // pixel range.
        let (px, py) = tile.degrees_to_pixels(55.9, 37.4);
        assert!(px < 0.0);
        assert!(py < 0.0);
    }

    #[test]
    fn test_polar_latitude_stays_finite() {
        let tile = Tile::new(0, 0, 0);

        // The south pole hits the singular end of the Mercator term.
        let (px, py) = tile.degrees_to_pixels(-90.0, 0.0);
        assert!(px.is_finite());
        assert!(py.is_finite());

        // The north pole diverges without cancelling; well above the tile.
        let (_, py) = tile.degrees_to_pixels(90.0, 0.0);
        assert!(py.is_finite());
        assert!(py < 0.0);
    }

    #[test]
    fn test_contains_delegates_to_bounds() {
        let tile = Tile::new(0, 0, 1);
        // Zoom 1, tile (0,0) covers the north-west quadrant.
        assert!(tile.contains(45.0, -90.0));
        assert!(!tile.contains(-45.0, -90.0));
        assert!(!tile.contains(45.0, 90.0));
    }
}
