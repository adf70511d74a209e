//! Region value updates

use crate::commands::Cmd;
use crate::editable::SelectionOffset;
use crate::messages::DocumentMsg;
use crate::model::{PlaygroundModel, Region};

use super::preview::schedule_preview_rebuild;

/// Handle value changes and undo/redo for a region
pub fn update_document(model: &mut PlaygroundModel, msg: DocumentMsg) -> Option<Cmd> {
    let region = match &msg {
        DocumentMsg::ValueChanged { region, .. } | DocumentMsg::Undo(region) | DocumentMsg::Redo(region) => *region,
    };

    let changed = match msg {
        DocumentMsg::ValueChanged {
            region,
            value,
            selection,
        } => model.region_mut(region).set_value(value, selection),
        DocumentMsg::Undo(region) => restored(region, model.region_mut(region).undo()),
        DocumentMsg::Redo(region) => restored(region, model.region_mut(region).redo()),
    };

    if !changed {
        tracing::trace!("{} value unchanged", region.title());
        return None;
    }

    accept_change(model, region)
}

fn restored(region: Region, caret: Option<Option<SelectionOffset>>) -> bool {
    match caret {
        Some(Some(selection)) => {
            tracing::trace!("{} caret restored to {}", region.title(), selection.start);
            true
        }
        Some(None) => true,
        None => false,
    }
}

fn accept_change(model: &mut PlaygroundModel, region: Region) -> Option<Cmd> {
    model.revision += 1;
    tracing::debug!(
        "{} changed ({} chars), revision {}",
        region.title(),
        model.value(region).chars().count(),
        model.revision
    );
    schedule_preview_rebuild(model)
}
