//! Pictogram bytes for symbol rendering, with a bounded in-memory cache.
//!
//! Renderers ask for glyphs by href from blocking render threads. A miss
//! does one blocking fetch (HTTP for absolute hrefs, the glyph directory
//! for bare ones); hits are served from an LRU cache with lazy TTL
//! expiration, so one slow source degrades a single glyph, not the tile.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use bytes::Bytes;
use lru::LruCache;
use tracing::debug;

use renderer::{FetchError, ImageFetcher};

/// Cached glyph source backing the renderer's `ImageFetcher` seam.
pub struct GlyphFetcher {
    cache: Mutex<LruCache<String, CachedGlyph>>,
    glyph_dir: PathBuf,
    ttl: Duration,
}

struct CachedGlyph {
    data: Bytes,
    inserted_at: Instant,
}

impl CachedGlyph {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() > ttl
    }
}

impl GlyphFetcher {
    /// Create a fetcher resolving bare hrefs under `glyph_dir`, keeping at
    /// most `capacity` glyphs for up to `ttl` each.
    pub fn new(glyph_dir: impl Into<PathBuf>, capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            glyph_dir: glyph_dir.into(),
            ttl,
        }
    }

    fn guard(&self) -> MutexGuard<'_, LruCache<String, CachedGlyph>> {
        // The cache holds plain bytes only; a poisoned lock stays usable.
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn cached(&self, href: &str) -> Option<Bytes> {
        let mut cache = self.guard();
        let glyph = cache.get(href)?;
        if glyph.is_expired(self.ttl) {
            cache.pop(href);
            return None;
        }
        Some(glyph.data.clone())
    }

    fn load(&self, href: &str) -> Result<Bytes, FetchError> {
        if href.starts_with("http://") || href.starts_with("https://") {
            let response = reqwest::blocking::get(href)
                .map_err(|e| FetchError::Other(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }
            return response.bytes().map_err(|e| FetchError::Other(e.to_string()));
        }
        if let Some((scheme, _)) = href.split_once("://") {
            return Err(FetchError::UnsupportedScheme(scheme.to_string()));
        }

        let path = self.glyph_dir.join(href);
        let data = std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FetchError::NotFound(href.to_string()),
            _ => FetchError::Io(e),
        })?;
        Ok(Bytes::from(data))
    }
}

impl ImageFetcher for GlyphFetcher {
    fn fetch(&self, href: &str) -> Result<Bytes, FetchError> {
        if let Some(data) = self.cached(href) {
            return Ok(data);
        }

        let data = self.load(href)?;
        debug!(href, bytes = data.len(), "loaded glyph");
        self.guard().put(
            href.to_string(),
            CachedGlyph {
                data: data.clone(),
                inserted_at: Instant::now(),
            },
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fetcher_in(dir: &tempfile::TempDir, capacity: usize, ttl: Duration) -> GlyphFetcher {
        GlyphFetcher::new(dir.path(), capacity, ttl)
    }

    #[test]
    fn test_fetch_from_glyph_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("47.png"), b"png bytes").unwrap();
        let fetcher = fetcher_in(&dir, 8, Duration::from_secs(60));

        let data = fetcher.fetch("47.png").unwrap();
        assert_eq!(data, Bytes::from_static(b"png bytes"));
    }

    #[test]
    fn test_missing_glyph_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher_in(&dir, 8, Duration::from_secs(60));

        assert!(matches!(
            fetcher.fetch("nope.png"),
            Err(FetchError::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher_in(&dir, 8, Duration::from_secs(60));

        assert!(matches!(
            fetcher.fetch("ftp://host/47.png"),
            Err(FetchError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_repeat_fetch_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("47.png"), b"png bytes").unwrap();
        let fetcher = fetcher_in(&dir, 8, Duration::from_secs(60));

        fetcher.fetch("47.png").unwrap();
        fs::remove_file(dir.path().join("47.png")).unwrap();

        // Backing file is gone; the cached copy still answers.
        let data = fetcher.fetch("47.png").unwrap();
        assert_eq!(data, Bytes::from_static(b"png bytes"));
    }

    #[test]
    fn test_ttl_expires_cached_glyph() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("47.png"), b"png bytes").unwrap();
        let fetcher = fetcher_in(&dir, 8, Duration::from_millis(30));

        fetcher.fetch("47.png").unwrap();
        fs::remove_file(dir.path().join("47.png")).unwrap();
        std::thread::sleep(Duration::from_millis(60));

        assert!(matches!(
            fetcher.fetch("47.png"),
            Err(FetchError::NotFound(_))
        ));
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            fs::write(dir.path().join(name), name.as_bytes()).unwrap();
        }
        let fetcher = fetcher_in(&dir, 2, Duration::from_secs(60));

        fetcher.fetch("a.png").unwrap();
        fetcher.fetch("b.png").unwrap();
        fetcher.fetch("c.png").unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            fs::remove_file(dir.path().join(name)).unwrap();
        }

        // Oldest entry fell out of the two-slot cache.
        assert!(fetcher.fetch("a.png").is_err());
        assert!(fetcher.fetch("b.png").is_ok());
        assert!(fetcher.fetch("c.png").is_ok());
    }

    #[test]
    fn test_zero_capacity_still_fetches() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("47.png"), b"png bytes").unwrap();
        let fetcher = fetcher_in(&dir, 0, Duration::from_secs(60));

        assert!(fetcher.fetch("47.png").is_ok());
    }
}
