//! Preview document assembly and rebuild debouncing
//!
//! ```text
//! ValueChanged → Cmd::DebouncedPreviewRebuild → (quiet period)
//!              → Msg::Preview(RebuildReady) → Cmd::WritePreview
//! ```

mod debounce;
mod document;

pub use debounce::Debouncer;
pub use document::{build_document, neutralize_closing_tag, PreviewOptions, PreviewSources};
