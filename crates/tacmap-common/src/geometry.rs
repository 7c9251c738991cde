//! Variant geometry model shared by storage and rendering.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A coordinate pair.
///
/// While the geometry is geographic, `x` is longitude and `y` is latitude
/// (axis order as in WKT). After projection the pair is tile pixels measured
/// from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The geometry kinds the style catalog distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryKind::Point => "point",
            GeometryKind::LineString => "linestring",
            GeometryKind::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

/// Variant geometry carried by a map object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Coord),
    LineString(Vec<Coord>),
    Polygon {
        exterior: Vec<Coord>,
        holes: Vec<Vec<Coord>>,
    },
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon { .. } => GeometryKind::Polygon,
        }
    }

    /// Apply `f` to every coordinate, producing a new geometry.
    ///
    /// The receiver is left untouched; renderers work on the returned value
    /// so the fetched object is never mutated in place.
    pub fn map_coords<F>(&self, mut f: F) -> Geometry
    where
        F: FnMut(Coord) -> Coord,
    {
        match self {
            Geometry::Point(c) => Geometry::Point(f(*c)),
            Geometry::LineString(coords) => {
                Geometry::LineString(coords.iter().map(|c| f(*c)).collect())
            }
            Geometry::Polygon { exterior, holes } => Geometry::Polygon {
                exterior: exterior.iter().map(|c| f(*c)).collect(),
                holes: holes
                    .iter()
                    .map(|ring| ring.iter().map(|c| f(*c)).collect())
                    .collect(),
            },
        }
    }

    /// The coordinate of a point geometry.
    pub fn as_point(&self) -> Result<Coord, GeometryError> {
        match self {
            Geometry::Point(c) => Ok(*c),
            other => Err(GeometryError::TypeMismatch {
                expected: GeometryKind::Point,
                actual: other.kind(),
            }),
        }
    }

    /// The vertex sequence of a linestring geometry.
    pub fn as_line(&self) -> Result<&[Coord], GeometryError> {
        match self {
            Geometry::LineString(coords) => Ok(coords),
            other => Err(GeometryError::TypeMismatch {
                expected: GeometryKind::LineString,
                actual: other.kind(),
            }),
        }
    }

    /// The exterior ring and holes of a polygon geometry.
    pub fn as_polygon(&self) -> Result<(&[Coord], &[Vec<Coord>]), GeometryError> {
        match self {
            Geometry::Polygon { exterior, holes } => Ok((exterior, holes)),
            other => Err(GeometryError::TypeMismatch {
                expected: GeometryKind::Polygon,
                actual: other.kind(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("geometry type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: GeometryKind,
        actual: GeometryKind,
    },
}
