//! Application-level message handlers

use crate::commands::Cmd;
use crate::messages::{AppMsg, DocumentMsg};
use crate::model::PlaygroundModel;

use super::document::update_document;

/// Handle app-level messages
pub fn update_app(model: &mut PlaygroundModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::SourceLoaded {
            region,
            result: Ok(value),
        } => update_document(
            model,
            DocumentMsg::ValueChanged {
                region,
                value,
                selection: None,
            },
        ),
        AppMsg::SourceLoaded {
            region,
            result: Err(e),
        } => {
            tracing::warn!("Failed to read {} source: {}", region.title(), e);
            None
        }
    }
}
