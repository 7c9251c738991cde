//! Seam between rendering and pictogram retrieval.
//!
//! Renderers only ever ask for bytes by href; where those bytes come
//! from (HTTP, disk, an in-memory cache) is the caller's concern.

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("image {0} not found")]
    NotFound(String),

    #[error("image source answered with status {0}")]
    Status(u16),

    #[error("unsupported image source {0}")]
    UnsupportedScheme(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Resolves pictogram hrefs to raw image bytes.
///
/// Calls are made from blocking render threads, so implementations are
/// expected to be synchronous and cheap on repeat lookups.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, href: &str) -> Result<Bytes, FetchError>;
}
