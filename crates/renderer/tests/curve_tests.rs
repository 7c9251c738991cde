//! Tests for quadratic chain smoothing.

use renderer::curve::{smooth_path, smooth_points};
use renderer::geom::polyline_length;
use tacmap_common::Coord;

fn c(x: f64, y: f64) -> Coord {
    Coord::new(x, y)
}

// ============================================================================
// smooth_path tests
// ============================================================================

#[test]
fn test_smooth_path_empty_and_single_point() {
    assert!(smooth_path(&[]).is_empty());
    assert_eq!(smooth_path(&[c(3.0, 4.0)]).as_str(), "M 3 4");
}

#[test]
fn test_smooth_path_two_points_stays_straight() {
    let d = smooth_path(&[c(0.0, 0.0), c(10.0, 0.0)]);
    assert_eq!(d.as_str(), "M 0 0 L 10 0");
}

#[test]
fn test_smooth_path_three_points() {
    let d = smooth_path(&[c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)]);
    assert_eq!(d.as_str(), "M 0 0 L 5 0 Q 10 0 10 5 L 10 10");
}

#[test]
fn test_smooth_path_interior_vertices_become_controls() {
    let d = smooth_path(&[c(0.0, 0.0), c(10.0, 0.0), c(20.0, 10.0), c(30.0, 10.0)]);
    let text = d.as_str();
    assert_eq!(text.matches("Q ").count(), 2);
    assert!(text.starts_with("M 0 0 L 5 0"));
    assert!(text.ends_with("L 30 10"));
}

// ============================================================================
// smooth_points tests
// ============================================================================

#[test]
fn test_smooth_points_short_chains_pass_through() {
    let chain = [c(0.0, 0.0), c(10.0, 5.0)];
    assert_eq!(smooth_points(&chain), chain.to_vec());
}

#[test]
fn test_smooth_points_sample_count() {
    // One quadratic piece sampled at 0.1 steps: ends, two anchors, and
    // nine interior samples.
    let flattened = smooth_points(&[c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)]);
    assert_eq!(flattened.len(), 13);
}

#[test]
fn test_smooth_points_keeps_end_points_and_anchors() {
    let flattened = smooth_points(&[c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)]);
    assert_eq!(flattened[0], c(0.0, 0.0));
    assert_eq!(flattened[1], c(5.0, 0.0));
    assert_eq!(flattened[flattened.len() - 2], c(10.0, 5.0));
    assert_eq!(flattened[flattened.len() - 1], c(10.0, 10.0));
}

#[test]
fn test_smooth_points_cuts_the_corner() {
    let original = [c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)];
    let flattened = smooth_points(&original);
    let smoothed_len = polyline_length(&flattened);
    assert!(smoothed_len < polyline_length(&original));
    // The curve still has to cover most of the chain.
    assert!(smoothed_len > 0.85 * polyline_length(&original));
}

#[test]
fn test_smooth_points_values_stay_finite() {
    let chain = [
        c(-120.5, 43.0),
        c(7.0, -88.0),
        c(200.0, 12.5),
        c(33.0, 190.0),
        c(-4.0, 17.0),
    ];
    for p in smooth_points(&chain) {
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}
