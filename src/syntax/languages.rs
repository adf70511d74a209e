//! Language identification
//!
//! Maps file extensions to the two highlighted grammars.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Grammar selector for an editor region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Markup,
    Stylesheet,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "html" | "htm" | "xhtml" | "svg" | "xml" => Some(Language::Markup),
            "css" => Some(Language::Stylesheet),
            _ => None,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Parse a user-supplied name (`markup`, `html`, `stylesheet`, `css`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "markup" | "html" => Some(Language::Markup),
            "stylesheet" | "css" => Some(Language::Stylesheet),
            _ => None,
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Markup => "HTML",
            Language::Stylesheet => "CSS",
        }
    }
}
