//! Geographic bounding boxes in degrees.

use serde::{Deserialize, Serialize};

/// A geographic rectangle in WGS84 degrees.
///
/// `north >= south` for every box produced by tile construction; `east` and
/// `west` follow the slippy-map convention (no antimeridian wrapping).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Inclusive containment test for a coordinate.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.north >= lat && self.south <= lat && self.west <= lon && self.east >= lon
    }

    /// A copy grown on every side by half the latitude span.
    ///
    /// Used when selecting objects for a tile: symbology sized relative to
    /// segment length can bleed well past the geometry itself, so neighbours
    /// just outside the tile still have to be drawn.
    pub fn with_margin(&self) -> Self {
        let margin = (self.north - self.south).abs() / 2.0;
        Self {
            north: self.north + margin,
            south: self.south - margin,
            east: self.east + margin,
            west: self.west - margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive() {
        let bbox = BoundingBox::new(50.0, 10.0, 40.0, 20.0);

        assert!(bbox.contains(30.0, 30.0));
        // Edges count as inside.
        assert!(bbox.contains(50.0, 20.0));
        assert!(bbox.contains(10.0, 40.0));

        assert!(!bbox.contains(50.1, 30.0));
        assert!(!bbox.contains(30.0, 40.1));
        assert!(!bbox.contains(9.9, 30.0));
        assert!(!bbox.contains(30.0, 19.9));
    }

    #[test]
    fn test_with_margin_grows_every_side() {
        let bbox = BoundingBox::new(50.0, 10.0, 50.0, 10.0);
        let grown = bbox.with_margin();

        assert_eq!(grown.north, 70.0);
        assert_eq!(grown.south, -10.0);
        assert_eq!(grown.east, 70.0);
        assert_eq!(grown.west, -10.0);
    }

    #[test]
    fn test_with_margin_inverted_span() {
        // Margin is half the absolute latitude span even when the box is
        // degenerate or flipped.
        let bbox = BoundingBox::new(-50.0, 20.0, -50.0, 20.0);
        let grown = bbox.with_margin();

        assert_eq!(grown.north, -15.0);
        assert_eq!(grown.south, -15.0);
        assert_eq!(grown.east, -15.0);
        assert_eq!(grown.west, -15.0);
    }

    #[test]
    fn test_with_margin_zero() {
        let bbox = BoundingBox::new(0.0, 0.0, 0.0, 0.0);
        let grown = bbox.with_margin();

        assert_eq!(grown, bbox);
    }

    #[test]
    fn test_with_margin_is_pure() {
        let bbox = BoundingBox::new(50.0, 10.0, 50.0, 10.0);
        let _ = bbox.with_margin();

        assert_eq!(bbox, BoundingBox::new(50.0, 10.0, 50.0, 10.0));
    }
}
