//! Storage abstractions for tacmap services.
//!
//! Provides unified interfaces for:
//! - PostGIS for per-tile map object retrieval
//! - Cached pictogram fetching for symbol rendering

pub mod geometries;
pub mod glyphs;

pub use geometries::GeometryStore;
pub use glyphs::GlyphFetcher;
