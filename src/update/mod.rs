//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod document;
mod preview;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::PlaygroundModel;

pub use app::update_app;
pub use document::update_document;
pub use preview::{schedule_preview_rebuild, update_preview};

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut PlaygroundModel, msg: Msg) -> Option<Cmd> {
    tracing::trace!(revision = model.revision, ?msg, "update");
    match msg {
        Msg::Document(m) => document::update_document(model, m),
        Msg::Preview(m) => preview::update_preview(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}
