//! Theme system for token colors
//!
//! Themes are YAML files mapping each token category to a color, plus a
//! few editor surface colors. They render to a CSS stylesheet that styles
//! the `token-<category>` classes produced by the highlighter.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/playpen/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use serde::Deserialize;

use crate::syntax::{escape, Highlighted, TokenKind, TOKEN_KINDS};

// Embed theme YAML files at compile time
pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/dark.yaml");
pub const DEFAULT_LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// CSS class of the editable surface
pub const SURFACE_CLASS: &str = "playpen-editor";

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "default-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
    BuiltinTheme {
        id: "default-light",
        yaml: DEFAULT_LIGHT_YAML,
    },
];

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme in ~/.config/playpen/themes/
    User,
    /// Built-in theme embedded in binary
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    pub id: String,
    /// Display name from YAML (e.g., "Default Dark")
    pub name: String,
    pub source: ThemeSource,
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::debug!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// Load a theme, falling back to the default dark theme on any error
pub fn load_theme_or_default(id: &str) -> Theme {
    match load_theme(id) {
        Ok(theme) => theme,
        Err(e) => {
            tracing::warn!("Failed to load theme '{}': {}; using default", id, e);
            Theme::default()
        }
    }
}

/// List all available themes; user themes override builtins with the same id.
pub fn list_available_themes() -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        if let Ok(entries) = std::fs::read_dir(&user_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if !path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                {
                    continue;
                }
                if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                    if seen_ids.insert(id.to_string()) {
                        let name = from_file(&path)
                            .map(|t| t.name)
                            .unwrap_or_else(|_| id.to_string());
                        themes.push(ThemeInfo {
                            id: id.to_string(),
                            name,
                            source: ThemeSource::User,
                        });
                    }
                }
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse from "#RGB", "#RRGGBB" or "#RRGGBBAA"
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|c| u8::from_str_radix(c, 16).map_err(|e| e.to_string()))
        };
        match hex.len() {
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Color::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
                a: channel(6..8)?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// CSS hex notation, with alpha only when not opaque
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub editor: EditorThemeData,
    /// Token category name → color
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

/// Editor surface colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub background: String,
    pub foreground: String,
    #[serde(default)]
    pub caret: Option<String>,
    #[serde(default)]
    pub selection_background: Option<String>,
}

/// Editor surface colors (resolved)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorTheme {
    pub background: Color,
    pub foreground: Color,
    pub caret: Color,
    pub selection_background: Color,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub editor: EditorTheme,
    /// Colors per category; categories without an entry inherit the
    /// editor foreground
    pub tokens: Vec<(TokenKind, Color)>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_yaml(DEFAULT_DARK_YAML).unwrap_or_else(|_| Self {
            name: "Fallback".to_string(),
            editor: EditorTheme {
                background: Color::rgb(0x1E, 0x1E, 0x1E),
                foreground: Color::rgb(0xD4, 0xD4, 0xD4),
                caret: Color::rgb(0xAE, 0xAF, 0xAD),
                selection_background: Color::rgb(0x26, 0x4F, 0x78),
            },
            tokens: Vec::new(),
        })
    }
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let foreground = Color::from_hex(&data.editor.foreground)?;

        let mut tokens = Vec::with_capacity(data.tokens.len());
        for (name, value) in &data.tokens {
            let kind = TokenKind::from_name(name)
                .ok_or_else(|| format!("Unknown token category: {}", name))?;
            tokens.push((kind, Color::from_hex(value)?));
        }
        tokens.sort_by_key(|(kind, _)| TOKEN_KINDS.iter().position(|k| k == kind));

        Ok(Theme {
            name: data.name,
            editor: EditorTheme {
                background: Color::from_hex(&data.editor.background)?,
                foreground,
                caret: data
                    .editor
                    .caret
                    .as_deref()
                    .map(Color::from_hex)
                    .transpose()?
                    .unwrap_or(foreground),
                selection_background: data
                    .editor
                    .selection_background
                    .as_deref()
                    .map(Color::from_hex)
                    .transpose()?
                    .unwrap_or(Color::rgb(0x26, 0x4F, 0x78)),
            },
            tokens,
        })
    }

    /// Color for a token category
    pub fn token_color(&self, kind: TokenKind) -> Color {
        self.tokens
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, color)| *color)
            .unwrap_or(self.editor.foreground)
    }

    /// Stylesheet for the editable surface and every token class
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        let _ = writeln!(
            css,
            ".{} {{ background-color: {}; color: {}; caret-color: {}; white-space: pre-wrap; }}",
            SURFACE_CLASS,
            self.editor.background.to_css(),
            self.editor.foreground.to_css(),
            self.editor.caret.to_css(),
        );
        let _ = writeln!(
            css,
            ".{} ::selection {{ background-color: {}; }}",
            SURFACE_CLASS,
            self.editor.selection_background.to_css(),
        );
        for (kind, color) in &self.tokens {
            let _ = writeln!(css, ".{} {{ color: {}; }}", kind.class_name(), color.to_css());
        }
        css
    }

    /// A self-contained page showing highlighted code in this theme
    pub fn standalone_page(&self, highlighted: &Highlighted) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n<pre class=\"{}\">{}</pre>\n</body>\n</html>\n",
            escape(&self.name),
            self.to_css(),
            SURFACE_CLASS,
            highlighted.to_html()
        )
    }
}
