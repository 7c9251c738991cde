//! Antenna overlays: radiation-pattern polygon and bearing grid.
//!
//! Both draw around the object's point anchor at a radius that grows
//! with zoom, rotated to the antenna's azimuth.

use std::f64::consts::PI;

use tacmap_common::MapObject;
use tracing::warn;

use crate::canvas::SvgCanvas;

/// Number of sampling intervals across the half-turn `[0, pi]`.
const PATTERN_SAMPLES: usize = 720;

const DEFAULT_BEAM_COLOR: &str = "red";
const DEFAULT_GRID_COLOR: &str = "gray";

fn overlay_radius(zoom: u32) -> f64 {
    20.0 * (zoom as f64 + 1.0) / 3.0
}

/// Normalized radiation pattern value at angle `theta`.
///
/// `beam_width` narrows the main lobe; `sidelobes` shapes the
/// denominator period. Angles where the denominator vanishes radiate
/// nothing.
fn pattern_value(theta: f64, beam_width: f64, sidelobes: f64) -> f64 {
    let s = theta.sin();
    let denominator = (PI * s / (5.1 - 4.0 * sidelobes)).sin();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    (beam_width * PI * s).sin() / denominator
}

pub fn render_beam_diagram(canvas: &mut SvgCanvas, object: &MapObject, zoom: u32) {
    let center = match object.geometry.as_point() {
        Ok(p) => p,
        Err(err) => {
            warn!(object_id = object.id, %err, "beam diagram needs a point anchor");
            return;
        }
    };
    let params = &object.antenna;
    let radius = overlay_radius(zoom);
    let stroke_width = radius / 100.0;

    let mut max = f64::MIN_POSITIVE;
    let mut samples = Vec::with_capacity(PATTERN_SAMPLES + 1);
    for i in 0..=PATTERN_SAMPLES {
        let theta = i as f64 * PI / PATTERN_SAMPLES as f64;
        let value = pattern_value(theta, params.beam_width, params.sidelobes);
        if value > max {
            max = value;
        }
        samples.push((value * theta.sin(), value * theta.cos()));
    }
    if max <= f64::MIN_POSITIVE {
        warn!(object_id = object.id, "beam pattern has no positive gain, skipping");
        return;
    }

    // The pattern frame has its main lobe along y; the drawing frame
    // points it along x, so the axes swap when scaling to pixels.
    let mut points: Vec<(f64, f64)> = samples
        .iter()
        .map(|(sx, sy)| (center.x + sy * radius / max, center.y + sx * radius / max))
        .collect();
    points[0] = (center.x + radius, center.y);

    let outer = object
        .view
        .color_outer
        .as_deref()
        .unwrap_or(DEFAULT_BEAM_COLOR);

    canvas.open_group_transform(&format!(
        "rotate({} {} {})",
        params.azimuth, center.x, center.y
    ));
    canvas.polygon(
        &points,
        &format!(
            "stroke: {}; stroke-width: {}; fill: none;",
            outer, stroke_width
        ),
    );
    canvas.close_group();
}

pub fn render_antenna_grid(canvas: &mut SvgCanvas, object: &MapObject, zoom: u32) {
    let center = match object.geometry.as_point() {
        Ok(p) => p,
        Err(err) => {
            warn!(object_id = object.id, %err, "antenna grid needs a point anchor");
            return;
        }
    };
    let radius = overlay_radius(zoom);
    let stroke_width = radius / 100.0;
    let inner = object
        .view
        .color_inner
        .as_deref()
        .unwrap_or(DEFAULT_GRID_COLOR);
    let spoke_style = format!(
        "stroke: {}; stroke-width: {}; fill: none;",
        inner, stroke_width
    );

    canvas.open_group_transform(&format!(
        "rotate({} {} {})",
        object.antenna.azimuth, center.x, center.y
    ));

    for i in 0..=24u32 {
        let bearing = (f64::from(i) * 15.0).to_radians();
        canvas.line(
            center.x,
            center.y,
            center.x + radius * bearing.cos(),
            center.y + radius * bearing.sin(),
            &spoke_style,
        );
    }
    // Bearing spoke at 270 degrees marks the boresight reference.
    let reference = (18.0 * 15.0f64).to_radians();
    canvas.line(
        center.x,
        center.y,
        center.x + radius * reference.cos(),
        center.y + radius * reference.sin(),
        &format!("stroke: red; stroke-width: {}; fill: none;", stroke_width),
    );

    canvas.circle(
        center.x,
        center.y,
        0.67 * radius,
        &format!("stroke: yellow; stroke-width: {}; fill: none;", stroke_width),
    );
    canvas.circle(
        center.x,
        center.y,
        radius,
        &format!("stroke: green; stroke-width: {}; fill: none;", stroke_width),
    );

    canvas.close_group();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_value_guards_vanishing_denominator() {
        assert_eq!(pattern_value(0.0, 4.0, 0.0), 0.0);
        // 5.1 - 4 * 1.275 = 0 blows up the denominator argument
        assert_eq!(pattern_value(1.0, 4.0, 1.275), 0.0);
    }

    #[test]
    fn test_pattern_values_are_finite_across_sweep() {
        for i in 0..=PATTERN_SAMPLES {
            let theta = i as f64 * PI / PATTERN_SAMPLES as f64;
            for sidelobes in [0.0, 0.25, 0.5, 1.0, 1.275] {
                let value = pattern_value(theta, 4.0, sidelobes);
                assert!(value.is_finite(), "theta {} sidelobes {}", theta, sidelobes);
            }
        }
    }

    #[test]
    fn test_overlay_radius_grows_with_zoom() {
        assert!(overlay_radius(0) > 0.0);
        assert!(overlay_radius(12) > overlay_radius(3));
    }
}
