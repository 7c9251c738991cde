//! Map object model: geometry plus the symbology metadata that drives
//! style matching and symbol rendering.

use crate::Geometry;
use serde::{Deserialize, Serialize};

/// Anchor side for a text label relative to its object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Presentation parameters attached to an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    /// Stroke color for outlines; renderers fall back per symbol when unset.
    pub color_outer: Option<String>,
    /// Fill / secondary color.
    pub color_inner: Option<String>,
    /// Glyph scale factor.
    pub scale: f64,
    /// Symbol size hint in pixels.
    pub size: f64,
    /// Mirror glyphs horizontally.
    pub mirror: bool,
    /// Smooth linestring symbols with quadratic curves.
    pub use_bezier_curve: bool,
}

impl Default for ObjectView {
    fn default() -> Self {
        Self {
            color_outer: None,
            color_inner: None,
            scale: 1.0,
            size: 0.0,
            mirror: false,
            use_bezier_curve: false,
        }
    }
}

/// Antenna radiation-pattern parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AntennaParams {
    /// Beam width factor of the pattern formula.
    pub beam_width: f64,
    /// Sidelobe factor of the pattern formula.
    pub sidelobes: f64,
    /// Compass bearing the pattern is rotated to, in degrees.
    pub azimuth: f64,
    pub is_antenna: bool,
    pub show_grid: bool,
    pub show_diagram: bool,
}

/// A geo-tagged domain object with its symbology metadata.
///
/// Built per request by the storage layer and never shared across requests.
/// The geometry is projected into tile pixels exactly once before any
/// renderer touches the object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub id: i32,
    /// Opaque classification code driving symbol dispatch.
    pub code: String,
    pub geometry: Geometry,
    pub view: ObjectView,
    pub antenna: AntennaParams,
    pub label: Option<String>,
    pub position: LabelPosition,
    pub style_name: String,
}
