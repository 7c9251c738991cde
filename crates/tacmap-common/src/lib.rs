//! Common types and utilities shared across all tacmap services.

pub mod bbox;
pub mod error;
pub mod geometry;
pub mod object;
pub mod tile;
pub mod wkt;

pub use bbox::BoundingBox;
pub use error::{TacmapError, TacmapResult};
pub use geometry::{Coord, Geometry, GeometryError, GeometryKind};
pub use object::{AntennaParams, LabelPosition, MapObject, ObjectView};
pub use tile::{Tile, TILE_SIZE};
pub use wkt::{parse_wkt, WktParseError};
