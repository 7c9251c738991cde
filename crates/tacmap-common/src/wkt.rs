//! Minimal WKT reader for the geometry text PostGIS emits.
//!
//! Covers the three shapes the object store produces via `ST_AsText`:
//! `POINT`, `LINESTRING` and `POLYGON` (with optional holes). Z/M variants
//! and multi-geometries are rejected.

use crate::{Coord, Geometry};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WktParseError {
    #[error("unsupported WKT geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("malformed WKT: {0}")]
    Malformed(String),

    #[error("invalid coordinate number: {0}")]
    InvalidNumber(String),
}

/// Parse a WKT string into a [`Geometry`].
pub fn parse_wkt(input: &str) -> Result<Geometry, WktParseError> {
    let s = input.trim();
    let open = s
        .find('(')
        .ok_or_else(|| WktParseError::Malformed(s.to_string()))?;
    let keyword = s[..open].trim().to_ascii_uppercase();
    let body = s[open..].trim();

    match keyword.as_str() {
        "POINT" => {
            let coords = parse_coord_list(strip_parens(body)?)?;
            if coords.len() != 1 {
                return Err(WktParseError::Malformed(s.to_string()));
            }
            Ok(Geometry::Point(coords[0]))
        }
        "LINESTRING" => Ok(Geometry::LineString(parse_coord_list(strip_parens(
            body,
        )?)?)),
        "POLYGON" => {
            let mut rings = parse_rings(body)?;
            let exterior = rings.remove(0);
            Ok(Geometry::Polygon {
                exterior,
                holes: rings,
            })
        }
        other => Err(WktParseError::UnsupportedGeometry(other.to_string())),
    }
}

fn strip_parens(s: &str) -> Result<&str, WktParseError> {
    s.strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .ok_or_else(|| WktParseError::Malformed(s.to_string()))
}

fn parse_coord_list(s: &str) -> Result<Vec<Coord>, WktParseError> {
    let mut coords = Vec::new();
    for pair in s.split(',') {
        let mut nums = pair.split_whitespace();
        let x = parse_num(nums.next(), pair)?;
        let y = parse_num(nums.next(), pair)?;
        if nums.next().is_some() {
            return Err(WktParseError::Malformed(pair.trim().to_string()));
        }
        coords.push(Coord::new(x, y));
    }
    Ok(coords)
}

fn parse_num(token: Option<&str>, context: &str) -> Result<f64, WktParseError> {
    let token = token.ok_or_else(|| WktParseError::Malformed(context.trim().to_string()))?;
    token
        .parse()
        .map_err(|_| WktParseError::InvalidNumber(token.to_string()))
}

fn parse_rings(body: &str) -> Result<Vec<Vec<Coord>>, WktParseError> {
    let inner = strip_parens(body)?;
    let mut rings = Vec::new();
    let mut rest = inner.trim_start();

    while !rest.is_empty() {
        let ring = rest
            .strip_prefix('(')
            .ok_or_else(|| WktParseError::Malformed(body.to_string()))?;
        let close = ring
            .find(')')
            .ok_or_else(|| WktParseError::Malformed(body.to_string()))?;
        rings.push(parse_coord_list(&ring[..close])?);

        rest = ring[close + 1..].trim_start();
        if let Some(after_comma) = rest.strip_prefix(',') {
            rest = after_comma.trim_start();
            if rest.is_empty() {
                return Err(WktParseError::Malformed(body.to_string()));
            }
        } else if !rest.is_empty() {
            return Err(WktParseError::Malformed(body.to_string()));
        }
    }

    if rings.is_empty() {
        return Err(WktParseError::Malformed(body.to_string()));
    }
    Ok(rings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        let geometry = parse_wkt("POINT(37.61 55.75)").unwrap();
        assert_eq!(geometry, Geometry::Point(Coord::new(37.61, 55.75)));
    }

    #[test]
    fn test_parse_point_with_spacing() {
        let geometry = parse_wkt("  point ( -4.25 1e2 )  ").unwrap();
        assert_eq!(geometry, Geometry::Point(Coord::new(-4.25, 100.0)));
    }

    #[test]
    fn test_parse_linestring() {
        let geometry = parse_wkt("LINESTRING(30 10, 10 30, 40 40)").unwrap();
        assert_eq!(
            geometry,
            Geometry::LineString(vec![
                Coord::new(30.0, 10.0),
                Coord::new(10.0, 30.0),
                Coord::new(40.0, 40.0),
            ])
        );
    }

    #[test]
    fn test_parse_polygon_with_hole() {
        let geometry =
            parse_wkt("POLYGON((35 10, 45 45, 15 40, 35 10), (20 30, 35 35, 30 20, 20 30))")
                .unwrap();
        let (exterior, holes) = geometry.as_polygon().unwrap();
        assert_eq!(exterior.len(), 4);
        assert_eq!(exterior[1], Coord::new(45.0, 45.0));
        assert_eq!(holes.len(), 1);
        assert_eq!(holes[0][2], Coord::new(30.0, 20.0));
    }

    #[test]
    fn test_parse_polygon_without_hole() {
        let geometry = parse_wkt("POLYGON((0 0, 10 0, 10 10, 0 0))").unwrap();
        let (exterior, holes) = geometry.as_polygon().unwrap();
        assert_eq!(exterior.len(), 4);
        assert!(holes.is_empty());
    }

    #[test]
    fn test_reject_multi_geometries() {
        let err = parse_wkt("MULTIPOLYGON(((0 0, 1 0, 1 1, 0 0)))").unwrap_err();
        assert!(matches!(err, WktParseError::UnsupportedGeometry(_)));
    }

    #[test]
    fn test_reject_z_variant() {
        let err = parse_wkt("POINT Z (1 2 3)").unwrap_err();
        assert!(matches!(err, WktParseError::UnsupportedGeometry(_)));
    }

    #[test]
    fn test_reject_malformed() {
        assert!(parse_wkt("").is_err());
        assert!(parse_wkt("POINT").is_err());
        assert!(parse_wkt("POINT(30)").is_err());
        assert!(parse_wkt("POINT(30 10 5)").is_err());
        assert!(parse_wkt("LINESTRING(30 10, 10)").is_err());
        assert!(parse_wkt("POLYGON(0 0, 1 1)").is_err());
        assert!(parse_wkt("POLYGON(())shadow").is_err());
    }

    #[test]
    fn test_reject_bad_number() {
        let err = parse_wkt("POINT(abc 10)").unwrap_err();
        assert!(matches!(err, WktParseError::InvalidNumber(_)));
    }
}
