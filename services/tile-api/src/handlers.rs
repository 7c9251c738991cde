//! HTTP request handlers for the tile service.

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

use tacmap_common::{TacmapError, Tile};

use crate::state::AppState;

// ============================================================================
// Tiles
// ============================================================================

/// GET /tiles/:z/:x/:y - render one SVG tile.
///
/// Slippy-map clients append an extension to the row segment
/// (`/tiles/5/19/11.svg`), so `y` arrives as a string.
#[instrument(skip(state))]
pub async fn tile_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((z, x, y)): Path<(u32, u32, String)>,
) -> Response {
    counter!("tile_requests_total").increment(1);
    let started = Instant::now();

    let (y_str, _) = y.rsplit_once('.').unwrap_or((&y, "svg"));
    let y_val: u32 = match y_str.parse() {
        Ok(y_val) => y_val,
        Err(_) => {
            counter!("tile_bad_requests_total").increment(1);
            return error_response(TacmapError::MalformedTileAddress(format!(
                "row must be an integer, got {:?}",
                y
            )));
        }
    };

    let tile = Tile::new(x, y_val, z);
    info!(z = tile.z, x = tile.x, y = tile.y, "GetTile request");

    let objects = match state.store.objects_for_tile(&tile.bounds.with_margin()).await {
        Ok(objects) => objects,
        Err(err) => {
            error!(z = tile.z, x = tile.x, y = tile.y, error = %err, "object fetch failed");
            return error_response(err);
        }
    };

    // Rendering is CPU-bound and may block on glyph fetches.
    let renderer = state.renderer.clone();
    let rendered =
        tokio::task::spawn_blocking(move || renderer.render_tile(&tile, &objects)).await;

    let svg = match rendered {
        Ok(svg) => svg,
        Err(err) => {
            error!(error = %err, "render task failed");
            return error_response(TacmapError::RenderError(err.to_string()));
        }
    };

    counter!("tiles_rendered_total").increment(1);
    histogram!("tile_render_duration_ms").record(started.elapsed().as_secs_f64() * 1000.0);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/svg+xml")
        .header(header::CACHE_CONTROL, "max-age=3600")
        .body(svg.into())
        .unwrap()
}

fn error_response(err: TacmapError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(err.to_string().into())
        .unwrap()
}

// ============================================================================
// Health Checks
// ============================================================================

/// GET /health - Basic health check
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /ready - Readiness check (verifies database connectivity)
pub async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(_) => (StatusCode::OK, "Ready"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "Not ready"),
    }
}

// ============================================================================
// Prometheus Metrics
// ============================================================================

/// GET /metrics - Prometheus metrics endpoint
pub async fn metrics_handler(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}
