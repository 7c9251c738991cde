//! Style catalog loaded from YAML definitions.
//!
//! A style names a geometry kind and a list of [`Primitive`]s. Objects
//! pick up the first style whose name and geometry kind both match, so
//! catalog order is meaningful and the loader keeps it deterministic.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tacmap_common::{GeometryKind, MapObject};
use tracing::{debug, warn};

use crate::canvas::SvgCanvas;
use crate::fetch::ImageFetcher;
use crate::primitives::Primitive;

#[derive(Debug, Clone, Deserialize)]
pub struct Style {
    pub name: String,
    pub geometry: GeometryKind,
    pub primitives: Vec<Primitive>,
}

impl Style {
    pub fn should_render(&self, object: &MapObject) -> bool {
        self.geometry == object.geometry.kind() && self.name == object.style_name
    }

    pub fn render(&self, canvas: &mut SvgCanvas, object: &MapObject, fetcher: &dyn ImageFetcher) {
        for primitive in &self.primitives {
            primitive.render(canvas, object, fetcher);
        }
    }
}

/// Ordered set of styles. Lookup returns the first match only.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    styles: Vec<Style>,
}

impl StyleCatalog {
    pub fn new(styles: Vec<Style>) -> Self {
        StyleCatalog { styles }
    }

    /// Reads every `.yaml`/`.yml` file under `dir`, recursing into
    /// subdirectories. Files that fail to parse are logged and skipped;
    /// only an unreadable directory is a hard error. Entries are walked
    /// in name order so the first-match rule does not depend on the
    /// filesystem.
    pub fn load_dir(dir: &Path) -> io::Result<Self> {
        let mut styles = Vec::new();
        load_into(dir, &mut styles)?;
        debug!(count = styles.len(), dir = %dir.display(), "loaded style catalog");
        Ok(StyleCatalog { styles })
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn find(&self, object: &MapObject) -> Option<&Style> {
        self.styles.iter().find(|style| style.should_render(object))
    }
}

fn load_into(dir: &Path, styles: &mut Vec<Style>) -> io::Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());
    for entry in entries {
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            load_into(&path, styles)?;
            continue;
        }
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);
        if !is_yaml {
            continue;
        }
        let text = fs::read_to_string(&path)?;
        match serde_yaml::from_str::<Style>(&text) {
            Ok(style) => styles.push(style),
            Err(err) => {
                warn!(file = %path.display(), %err, "skipping unparsable style definition");
            }
        }
    }
    Ok(())
}
