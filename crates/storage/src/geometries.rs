//! Geometry retrieval from PostGIS.

use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use tracing::{debug, warn};

use tacmap_common::{
    parse_wkt, AntennaParams, BoundingBox, LabelPosition, MapObject, ObjectView, TacmapError,
    TacmapResult, WktParseError,
};

/// Object type ids that are never drawn on tiles.
const EXCLUDED_TYPE_IDS: &str = "170, 11";

/// Database connection pool and per-tile object queries.
///
/// The table and geometry column are configuration, so they are spliced
/// into the statement text; every tile-dependent value is bound.
pub struct GeometryStore {
    pool: PgPool,
    table: String,
    geometry_column: String,
}

impl GeometryStore {
    /// Create a new store connection from database URL.
    pub async fn connect(
        database_url: &str,
        table: &str,
        geometry_column: &str,
    ) -> TacmapResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| TacmapError::DatabaseError(format!("Connection failed: {}", e)))?;

        Ok(Self {
            pool,
            table: table.to_string(),
            geometry_column: geometry_column.to_string(),
        })
    }

    /// Round trip to the database, for readiness checks.
    pub async fn ping(&self) -> TacmapResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| TacmapError::DatabaseError(format!("Ping failed: {}", e)))?;
        Ok(())
    }

    /// Fetch the objects whose geometry lies inside `bbox`.
    ///
    /// Callers pass the margin-expanded tile box so symbology that bleeds
    /// past an object's own extent still gets drawn on neighbouring tiles.
    /// Rows whose geometry text does not parse are skipped with a warning;
    /// one bad row never fails the tile.
    pub async fn objects_for_tile(&self, bbox: &BoundingBox) -> TacmapResult<Vec<MapObject>> {
        let sql = format!(
            "SELECT id, type_id, ST_AsText(ST_Transform({geom}, 4326)) AS wkt, \
             color_outer, color_inner, scale, size, mirror, use_bezier_curve, \
             beam_width, sidelobes, azimuth, is_antenna, show_azimuthal_grid, \
             show_directional_diagram, label, label_position, style_name \
             FROM {table} \
             WHERE type_id NOT IN ({excluded}) \
             AND ST_Contains(ST_SetSRID(ST_MakeBox2D(ST_Point($1, $2), ST_Point($3, $4)), 4326), {geom})",
            geom = self.geometry_column,
            table = self.table,
            excluded = EXCLUDED_TYPE_IDS,
        );

        let rows = sqlx::query_as::<_, ObjectRow>(&sql)
            .bind(bbox.west)
            .bind(bbox.north)
            .bind(bbox.east)
            .bind(bbox.south)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| TacmapError::DatabaseError(format!("Query failed: {}", e)))?;

        let mut objects = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            match MapObject::try_from(row) {
                Ok(object) => objects.push(object),
                Err(err) => warn!(id, error = %err, "skipping object with unreadable geometry"),
            }
        }

        debug!(objects = objects.len(), "fetched objects for tile");
        Ok(objects)
    }
}

/// Internal row type for database queries.
#[derive(FromRow)]
struct ObjectRow {
    id: i32,
    type_id: i32,
    wkt: String,
    color_outer: Option<String>,
    color_inner: Option<String>,
    scale: Option<f64>,
    size: Option<f64>,
    mirror: Option<bool>,
    use_bezier_curve: Option<bool>,
    beam_width: Option<f64>,
    sidelobes: Option<f64>,
    azimuth: Option<f64>,
    is_antenna: Option<bool>,
    show_azimuthal_grid: Option<bool>,
    show_directional_diagram: Option<bool>,
    label: Option<String>,
    label_position: Option<String>,
    style_name: Option<String>,
}

impl TryFrom<ObjectRow> for MapObject {
    type Error = WktParseError;

    fn try_from(row: ObjectRow) -> Result<Self, Self::Error> {
        let geometry = parse_wkt(&row.wkt)?;
        let defaults = ObjectView::default();

        Ok(MapObject {
            id: row.id,
            code: row.type_id.to_string(),
            geometry,
            view: ObjectView {
                color_outer: row.color_outer,
                color_inner: row.color_inner,
                scale: row.scale.unwrap_or(defaults.scale),
                size: row.size.unwrap_or(defaults.size),
                mirror: row.mirror.unwrap_or(defaults.mirror),
                use_bezier_curve: row.use_bezier_curve.unwrap_or(defaults.use_bezier_curve),
            },
            antenna: AntennaParams {
                beam_width: row.beam_width.unwrap_or_default(),
                sidelobes: row.sidelobes.unwrap_or_default(),
                azimuth: row.azimuth.unwrap_or_default(),
                is_antenna: row.is_antenna.unwrap_or_default(),
                show_grid: row.show_azimuthal_grid.unwrap_or_default(),
                show_diagram: row.show_directional_diagram.unwrap_or_default(),
            },
            label: row.label,
            position: parse_label_position(row.label_position.as_deref()),
            style_name: row.style_name.unwrap_or_default(),
        })
    }
}

fn parse_label_position(value: Option<&str>) -> LabelPosition {
    match value {
        Some("top") => LabelPosition::Top,
        Some("left") => LabelPosition::Left,
        Some("right") => LabelPosition::Right,
        _ => LabelPosition::Bottom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacmap_common::Geometry;

    fn row(wkt: &str) -> ObjectRow {
        ObjectRow {
            id: 9,
            type_id: 47,
            wkt: wkt.to_string(),
            color_outer: Some("red".to_string()),
            color_inner: None,
            scale: None,
            size: Some(12.0),
            mirror: Some(true),
            use_bezier_curve: None,
            beam_width: Some(4.0),
            sidelobes: Some(0.3),
            azimuth: Some(90.0),
            is_antenna: Some(true),
            show_azimuthal_grid: None,
            show_directional_diagram: Some(true),
            label: Some("7A".to_string()),
            label_position: Some("left".to_string()),
            style_name: Some("antenna".to_string()),
        }
    }

    #[test]
    fn test_row_conversion() {
        let object = MapObject::try_from(row("LINESTRING (30 10, 10 30)")).unwrap();

        assert_eq!(object.id, 9);
        assert_eq!(object.code, "47");
        assert!(matches!(object.geometry, Geometry::LineString(_)));
        assert_eq!(object.view.color_outer.as_deref(), Some("red"));
        // NULL scale keeps the model default.
        assert_eq!(object.view.scale, 1.0);
        assert_eq!(object.view.size, 12.0);
        assert!(object.view.mirror);
        assert!(!object.view.use_bezier_curve);
        assert_eq!(object.antenna.beam_width, 4.0);
        assert!(object.antenna.is_antenna);
        assert!(!object.antenna.show_grid);
        assert!(object.antenna.show_diagram);
        assert_eq!(object.label.as_deref(), Some("7A"));
        assert_eq!(object.position, LabelPosition::Left);
        assert_eq!(object.style_name, "antenna");
    }

    #[test]
    fn test_row_conversion_rejects_bad_wkt() {
        assert!(MapObject::try_from(row("MULTIPOINT (1 2)")).is_err());
        assert!(MapObject::try_from(row("not wkt at all")).is_err());
    }

    #[test]
    fn test_label_position_defaults_to_bottom() {
        assert_eq!(parse_label_position(None), LabelPosition::Bottom);
        assert_eq!(parse_label_position(Some("bottom")), LabelPosition::Bottom);
        assert_eq!(parse_label_position(Some("unknown")), LabelPosition::Bottom);
        assert_eq!(parse_label_position(Some("top")), LabelPosition::Top);
        assert_eq!(parse_label_position(Some("right")), LabelPosition::Right);
    }
}
