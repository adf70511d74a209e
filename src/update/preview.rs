//! Preview rebuild handlers
//!
//! Every accepted edit schedules a debounced rebuild tagged with the model
//! revision. When the timer fires, rebuilds for superseded revisions are
//! dropped, so a burst of edits produces a single preview write.

use crate::commands::Cmd;
use crate::messages::PreviewMsg;
use crate::model::PlaygroundModel;
use crate::preview::{build_document, PreviewOptions};

/// Handle preview pipeline messages
pub fn update_preview(model: &mut PlaygroundModel, msg: PreviewMsg) -> Option<Cmd> {
    match msg {
        PreviewMsg::RebuildReady { revision } => {
            if revision != model.revision {
                tracing::debug!(
                    "Skipping stale preview rebuild: revision {} != current {}",
                    revision,
                    model.revision
                );
                return None;
            }
            if model.preview_is_current() {
                tracing::debug!("Preview already current at revision {}", revision);
                return None;
            }

            let options = PreviewOptions {
                error_overlay_ms: model.config.error_overlay_ms,
            };
            let html = build_document(&model.preview_sources(), &options);
            tracing::debug!("Rebuilt preview for revision {} ({} bytes)", revision, html.len());

            model.preview = Some(html.clone());
            model.preview_revision = Some(revision);
            Some(Cmd::WritePreview { html })
        }

        PreviewMsg::Written(Ok(path)) => {
            tracing::info!("Preview written to {}", path.display());
            None
        }

        PreviewMsg::Written(Err(e)) => {
            tracing::warn!("Failed to write preview: {}", e);
            None
        }
    }
}

/// Schedule a preview rebuild for the current revision
pub fn schedule_preview_rebuild(model: &mut PlaygroundModel) -> Option<Cmd> {
    Some(Cmd::DebouncedPreviewRebuild {
        revision: model.revision,
        delay_ms: model.config.preview_debounce_ms,
    })
}
