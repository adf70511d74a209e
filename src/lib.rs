//! Playpen - live-preview code playground core
//!
//! This crate provides editable syntax highlighting for markup and
//! stylesheets with selection-preserving re-renders, plus the Elm-style
//! state machine that turns region edits into debounced preview documents.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod fs_watcher;
pub mod messages;
pub mod model;
pub mod preview;
pub mod runtime;
pub mod syntax;
pub mod theme;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::PlaygroundConfig;
pub use messages::Msg;
pub use model::PlaygroundModel;
pub use syntax::{highlight, Highlighted, Language, TokenKind};
pub use theme::Theme;
