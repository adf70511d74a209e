//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::editable::SelectionOffset;
use crate::model::Region;

/// Changes to a region's authoritative value
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentMsg {
    /// A surface proposed a new value (input, paste, composition end)
    ValueChanged {
        region: Region,
        value: String,
        /// Caret after the change, recorded for undo/redo
        selection: Option<SelectionOffset>,
    },
    Undo(Region),
    Redo(Region),
}

/// Preview rebuild pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewMsg {
    /// The debounce window for `revision` elapsed
    RebuildReady { revision: u64 },
    /// Result of writing the preview document
    Written(Result<PathBuf, String>),
}

/// Application-level messages
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// A watched source file was (re)read
    SourceLoaded {
        region: Region,
        result: Result<String, String>,
    },
}

/// Top-level message
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Document(DocumentMsg),
    Preview(PreviewMsg),
    App(AppMsg),
}

impl Msg {
    /// Shorthand for a value change without caret information
    pub fn value_changed(region: Region, value: impl Into<String>) -> Self {
        Msg::Document(DocumentMsg::ValueChanged {
            region,
            value: value.into(),
            selection: None,
        })
    }
}
