//! Declarative drawing primitives used by the style catalog.
//!
//! A style is a list of primitives; each one knows how to draw itself
//! for an object whose geometry has already been projected into tile
//! pixel space. Color templates may reference `${stroke}` and `${fill}`,
//! which resolve to the object's outer and inner colors.

use base64::Engine;
use serde::Deserialize;
use tacmap_common::{LabelPosition, MapObject};
use tracing::warn;

use crate::canvas::SvgCanvas;
use crate::fetch::ImageFetcher;

const DEFAULT_COLOR: &str = "black";

/// One drawing instruction inside a style definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Text(TextPrimitive),
    Image(ImagePrimitive),
    Polyline(PolylinePrimitive),
    Arrow(ArrowPrimitive),
}

impl Primitive {
    pub fn render(
        &self,
        canvas: &mut SvgCanvas,
        object: &MapObject,
        fetcher: &dyn ImageFetcher,
    ) {
        match self {
            Primitive::Text(text) => text.render(canvas, object),
            Primitive::Image(image) => image.render(canvas, object, fetcher),
            Primitive::Polyline(line) => line.render(canvas, object),
            Primitive::Arrow(arrow) => {
                arrow.define(canvas, object);
            }
        }
    }
}

/// Places the object's label next to its point anchor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextPrimitive {
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub style: Option<String>,
}

impl TextPrimitive {
    fn render(&self, canvas: &mut SvgCanvas, object: &MapObject) {
        let Some(label) = object.label.as_deref() else {
            return;
        };
        let anchor = match object.geometry.as_point() {
            Ok(p) => p,
            Err(err) => {
                warn!(object_id = object.id, %err, "text primitive needs a point anchor");
                return;
            }
        };
        let (dx, dy) = label_offset(object.position);
        canvas.text(anchor.x + dx, anchor.y + dy, label, &self.font_style());
    }

    fn font_style(&self) -> String {
        let mut css = String::new();
        if let Some(size) = self.size {
            css.push_str(&format!("font-size: {}px;", size));
        }
        if let Some(weight) = self.weight {
            css.push_str(&format!("font-weight: {};", weight));
        }
        if let Some(style) = &self.style {
            css.push_str(&format!("font-style: {};", style));
        }
        css
    }
}

fn label_offset(position: LabelPosition) -> (f64, f64) {
    match position {
        LabelPosition::Top => (-20.0, -40.0),
        LabelPosition::Bottom => (-20.0, 40.0),
        LabelPosition::Left => (-60.0, 10.0),
        LabelPosition::Right => (20.0, 10.0),
    }
}

/// Which part of an image sits on the object's anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerPosition {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl MarkerPosition {
    fn offset(self, width: f64, height: f64) -> (f64, f64) {
        use MarkerPosition::*;
        let dx = match self {
            Left | TopLeft | BottomLeft => 0.0,
            Center | Top | Bottom => -width / 2.0,
            Right | TopRight | BottomRight => -width,
        };
        let dy = match self {
            Top | TopLeft | TopRight => 0.0,
            Center | Left | Right => -height / 2.0,
            Bottom | BottomLeft | BottomRight => -height,
        };
        (dx, dy)
    }
}

/// Inlines a fetched pictogram at the object's anchor, rotated by its
/// azimuth and scaled by its view scale.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePrimitive {
    pub width: f64,
    pub height: f64,
    /// May contain `${ID}`, replaced with the object id before fetching.
    pub href: String,
    #[serde(default = "default_image_format")]
    pub format: String,
    #[serde(default)]
    pub position: MarkerPosition,
}

fn default_image_format() -> String {
    "image/png".to_owned()
}

impl ImagePrimitive {
    fn render(&self, canvas: &mut SvgCanvas, object: &MapObject, fetcher: &dyn ImageFetcher) {
        let anchor = match object.geometry.as_point() {
            Ok(p) => p,
            Err(err) => {
                warn!(object_id = object.id, %err, "image primitive needs a point anchor");
                return;
            }
        };
        let href = self.href.replace("${ID}", &object.id.to_string());
        let bytes = match fetcher.fetch(&href) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(object_id = object.id, href = %href, %err, "skipping image primitive");
                return;
            }
        };
        let payload = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let width = self.width * object.view.scale;
        let height = self.height * object.view.scale;
        let (dx, dy) = self.position.offset(width, height);
        let mut transform = format!(
            "translate({} {}) rotate({})",
            anchor.x, anchor.y, object.antenna.azimuth
        );
        if object.view.mirror {
            transform.push_str(" scale(-1 1)");
        }
        canvas.open_group_transform(&transform);
        canvas.image(
            dx,
            dy,
            width,
            height,
            &format!("data:{};base64,{}", self.format, payload),
        );
        canvas.close_group();
    }
}

/// Strokes the object's line geometry, optionally dashed and optionally
/// tipped with an arrow marker.
#[derive(Debug, Clone, Deserialize)]
pub struct PolylinePrimitive {
    #[serde(default = "default_stroke_width")]
    pub width: f64,
    #[serde(default = "default_stroke")]
    pub stroke: String,
    #[serde(default)]
    pub dash_style: Option<String>,
    #[serde(default)]
    pub end: Option<ArrowPrimitive>,
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_stroke() -> String {
    "${stroke}".to_owned()
}

impl PolylinePrimitive {
    fn render(&self, canvas: &mut SvgCanvas, object: &MapObject) {
        let line = match object.geometry.as_line() {
            Ok(line) => line,
            Err(err) => {
                warn!(object_id = object.id, %err, "polyline primitive needs line geometry");
                return;
            }
        };
        let mut style = format!(
            "stroke: {}; stroke-width: {}; fill: none;",
            resolve_colors(&self.stroke, object),
            self.width
        );
        if let Some(dash) = &self.dash_style {
            style.push_str(&format!(" stroke-dasharray: {};", dash));
        }
        if let Some(end) = &self.end {
            let marker_id = end.define(canvas, object);
            style.push_str(&format!(" marker-end: url(#{});", marker_id));
        }
        let points: Vec<(f64, f64)> = line.iter().map(|p| (p.x, p.y)).collect();
        canvas.polyline(&points, &style);
    }
}

/// Marker definition holding a three-point chevron, oriented along the
/// path it terminates.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrowPrimitive {
    pub id: String,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_stroke")]
    pub stroke: String,
    #[serde(default = "default_fill")]
    pub fill: String,
}

fn default_fill() -> String {
    "${fill}".to_owned()
}

impl ArrowPrimitive {
    /// Adds the marker to the document defs and returns the id to
    /// reference it by. Ids carry the object id so two objects with
    /// different colors never share a definition.
    fn define(&self, canvas: &mut SvgCanvas, object: &MapObject) -> String {
        let marker_id = format!("{}-id{}", self.id, object.id);
        let style = format!(
            "stroke: {}; fill: {}",
            resolve_colors(&self.stroke, object),
            resolve_colors(&self.fill, object)
        );
        canvas.def_marker_polyline(
            &marker_id,
            0.0,
            self.height / 2.0,
            self.width,
            self.height,
            &[
                (0.0, 0.0),
                (self.width, self.height / 2.0),
                (0.0, self.height),
            ],
            &style,
        );
        marker_id
    }
}

fn resolve_colors(template: &str, object: &MapObject) -> String {
    let outer = object.view.color_outer.as_deref().unwrap_or(DEFAULT_COLOR);
    let inner = object.view.color_inner.as_deref().unwrap_or(DEFAULT_COLOR);
    template.replace("${stroke}", outer).replace("${fill}", inner)
}
