//! Playground configuration persistence
//!
//! Stores user preferences in `~/.config/playpen/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::editable::caret::DEFAULT_LINE_HEIGHT_FACTOR;
use crate::editable::{CaretOverlay, RenderSync, RestoreMode};
use crate::syntax::Language;

/// Quiet period before the preview is rebuilt
pub const DEFAULT_PREVIEW_DEBOUNCE_MS: u64 = 250;

/// How long the preview's exception overlay stays up
pub const DEFAULT_ERROR_OVERLAY_MS: u64 = 7000;

/// Undo depth per region
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Selected theme id (e.g., "default-dark", "default-light")
    pub theme: String,
    pub preview_debounce_ms: u64,
    /// What happens to a range selection when the surface re-renders
    pub selection_restore: RestoreMode,
    /// Line-height multiplier when the computed value is `normal`
    pub line_height_fallback: f32,
    pub error_overlay_ms: u64,
    pub history_limit: usize,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            theme: "default-dark".to_string(),
            preview_debounce_ms: DEFAULT_PREVIEW_DEBOUNCE_MS,
            selection_restore: RestoreMode::Collapse,
            line_height_fallback: DEFAULT_LINE_HEIGHT_FACTOR,
            error_overlay_ms: DEFAULT_ERROR_OVERLAY_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl PlaygroundConfig {
    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, or return defaults if missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// A synchronizer for one region, restoring selections per `selection_restore`
    pub fn render_sync(&self, language: Language) -> RenderSync {
        RenderSync::new(language, self.selection_restore)
    }

    /// A caret overlay using the configured line-height fallback
    pub fn caret_overlay(&self) -> CaretOverlay {
        CaretOverlay::new(self.line_height_fallback)
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Save config to the user config directory
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
