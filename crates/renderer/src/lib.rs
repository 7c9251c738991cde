//! SVG tile rendering for tactical map overlays.
//!
//! Rendering runs in three passes per object:
//! - Style catalog: declarative primitives matched by style name
//! - Symbol registry: built-in renderers matched by classification code
//! - Antenna overlays: radiation pattern and bearing grid

pub mod canvas;
pub mod curve;
pub mod fetch;
pub mod geom;
pub mod primitives;
pub mod registry;
pub mod render;
pub mod style;
pub mod symbols;

pub use canvas::{scope_css, PathData, SvgCanvas};
pub use fetch::{FetchError, ImageFetcher};
pub use registry::{CodeMatcher, RegistryEntry, SymbolKind, SymbolRegistry};
pub use render::TileRenderer;
pub use style::{Style, StyleCatalog};
