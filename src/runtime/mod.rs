//! Runtime module - drives the update loop outside of a browser
//!
//! - `app` - the watch loop: file changes in, debounced preview writes out
//!
//! The helpers here are shared by the one-shot `build` command.

pub mod app;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::PlaygroundConfig;
use crate::model::Region;
use crate::preview::{build_document, PreviewOptions, PreviewSources};

pub use app::WatchApp;

/// Source file for each region. A missing path contributes an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePaths {
    pub markup: Option<PathBuf>,
    pub styles: Option<PathBuf>,
    pub script: Option<PathBuf>,
}

impl SourcePaths {
    /// The conventional file names inside `dir`, where they exist
    pub fn in_dir(dir: &Path) -> Self {
        let existing = |region: Region| {
            let path = dir.join(region.default_file_name());
            path.is_file().then_some(path)
        };
        Self {
            markup: existing(Region::Markup),
            styles: existing(Region::Styles),
            script: existing(Region::Script),
        }
    }

    pub fn path(&self, region: Region) -> Option<&Path> {
        match region {
            Region::Markup => self.markup.as_deref(),
            Region::Styles => self.styles.as_deref(),
            Region::Script => self.script.as_deref(),
        }
    }

    /// Every configured path with its region
    pub fn iter(&self) -> impl Iterator<Item = (Region, &Path)> {
        Region::ALL
            .into_iter()
            .filter_map(move |region| self.path(region).map(|path| (region, path)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Read one source file, with the path in the error
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read every configured source and assemble the preview document
pub fn build_preview(paths: &SourcePaths, config: &PlaygroundConfig) -> Result<String> {
    let mut values = [String::new(), String::new(), String::new()];
    for (i, region) in Region::ALL.into_iter().enumerate() {
        if let Some(path) = paths.path(region) {
            values[i] = read_source(path)?;
        }
    }
    let [markup, styles, script] = &values;
    let sources = PreviewSources {
        markup,
        styles,
        script,
    };
    let options = PreviewOptions {
        error_overlay_ms: config.error_overlay_ms,
    };
    Ok(build_document(&sources, &options))
}

/// Write a preview document, creating parent directories as needed
pub fn write_preview(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the sample sources into `dir`
///
/// Existing files are left alone unless `force` is set. Returns the files written.
pub fn init_sources(dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    for region in Region::ALL {
        let path = dir.join(region.default_file_name());
        if path.exists() && !force {
            tracing::info!("Keeping existing {}", path.display());
            continue;
        }
        fs::write(&path, region.default_value())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
