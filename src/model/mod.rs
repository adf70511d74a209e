//! Playground model - the state container for the three editor regions
//!
//! Owns the authoritative value of each region. Surfaces only propose new
//! values through `DocumentMsg::ValueChanged`; every accepted change bumps
//! the revision that drives the debounced preview rebuild.

pub mod samples;

use serde::{Deserialize, Serialize};

use crate::config::PlaygroundConfig;
use crate::editable::{SelectionOffset, ValueChange, ValueHistory};
use crate::preview::PreviewSources;
use crate::syntax::Language;
use crate::theme::{load_theme_or_default, Theme};

/// One of the three editor regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Markup,
    Styles,
    Script,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Markup, Region::Styles, Region::Script];

    /// Highlighting grammar; the script region is a plain text input
    pub fn language(self) -> Option<Language> {
        match self {
            Region::Markup => Some(Language::Markup),
            Region::Styles => Some(Language::Stylesheet),
            Region::Script => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Region::Markup => "HTML",
            Region::Styles => "CSS",
            Region::Script => "JavaScript",
        }
    }

    /// File name used by `init` and as the default for `build`/`watch`
    pub fn default_file_name(self) -> &'static str {
        match self {
            Region::Markup => "index.html",
            Region::Styles => "style.css",
            Region::Script => "script.js",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            Region::Markup => samples::DEFAULT_MARKUP,
            Region::Styles => samples::DEFAULT_STYLES,
            Region::Script => samples::DEFAULT_SCRIPT,
        }
    }
}

/// The authoritative value of one region plus its undo history
#[derive(Debug, Clone)]
pub struct RegionBuffer {
    value: String,
    history: ValueHistory,
    /// Caret reported with the latest value
    selection: Option<SelectionOffset>,
    /// Caret an undo/redo wants the surface to show next
    pending_selection: Option<SelectionOffset>,
}

impl RegionBuffer {
    pub fn new(value: impl Into<String>, history_limit: usize) -> Self {
        Self {
            value: value.into(),
            history: ValueHistory::with_max_size(history_limit),
            selection: None,
            pending_selection: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn history(&self) -> &ValueHistory {
        &self.history
    }

    pub fn selection(&self) -> Option<SelectionOffset> {
        self.selection
    }

    /// Take the caret left by the latest undo/redo, for the region's
    /// synchronizer to restore on its next regeneration
    pub fn take_pending_selection(&mut self) -> Option<SelectionOffset> {
        self.pending_selection.take()
    }

    /// Replace the value, recording the change. Returns false if unchanged.
    pub fn set_value(&mut self, value: String, selection: Option<SelectionOffset>) -> bool {
        if value == self.value {
            if selection.is_some() {
                self.selection = selection;
            }
            return false;
        }
        let before = std::mem::replace(&mut self.value, value);
        self.history.push(
            ValueChange::new(before, self.value.clone()).with_selections(self.selection, selection),
        );
        self.selection = selection;
        self.pending_selection = None;
        true
    }

    /// Revert the latest change. Returns the caret to restore, if recorded.
    pub fn undo(&mut self) -> Option<Option<SelectionOffset>> {
        let change = self.history.pop_undo()?;
        Some(self.restore(change))
    }

    /// Re-apply the latest undone change
    pub fn redo(&mut self) -> Option<Option<SelectionOffset>> {
        let change = self.history.pop_redo()?;
        Some(self.restore(change))
    }

    fn restore(&mut self, change: ValueChange) -> Option<SelectionOffset> {
        self.value = change.before;
        self.selection = change.selection_before;
        self.pending_selection = change.selection_before;
        change.selection_before
    }
}

/// The complete playground state
#[derive(Debug, Clone)]
pub struct PlaygroundModel {
    pub markup: RegionBuffer,
    pub styles: RegionBuffer,
    pub script: RegionBuffer,
    /// Incremented on every accepted value change
    pub revision: u64,
    /// Revision of the last preview document built
    pub preview_revision: Option<u64>,
    /// The last preview document built
    pub preview: Option<String>,
    pub config: PlaygroundConfig,
    pub theme: Theme,
}

impl PlaygroundModel {
    /// A model holding the default sample content
    pub fn new(config: PlaygroundConfig) -> Self {
        Self::with_values(
            samples::DEFAULT_MARKUP,
            samples::DEFAULT_STYLES,
            samples::DEFAULT_SCRIPT,
            config,
        )
    }

    pub fn with_values(
        markup: impl Into<String>,
        styles: impl Into<String>,
        script: impl Into<String>,
        config: PlaygroundConfig,
    ) -> Self {
        let limit = config.history_limit;
        let theme = load_theme_or_default(&config.theme);
        Self {
            markup: RegionBuffer::new(markup, limit),
            styles: RegionBuffer::new(styles, limit),
            script: RegionBuffer::new(script, limit),
            revision: 0,
            preview_revision: None,
            preview: None,
            config,
            theme,
        }
    }

    pub fn region(&self, region: Region) -> &RegionBuffer {
        match region {
            Region::Markup => &self.markup,
            Region::Styles => &self.styles,
            Region::Script => &self.script,
        }
    }

    pub fn region_mut(&mut self, region: Region) -> &mut RegionBuffer {
        match region {
            Region::Markup => &mut self.markup,
            Region::Styles => &mut self.styles,
            Region::Script => &mut self.script,
        }
    }

    pub fn value(&self, region: Region) -> &str {
        self.region(region).value()
    }

    /// The three buffers as consumed by the preview
    pub fn preview_sources(&self) -> PreviewSources<'_> {
        PreviewSources {
            markup: self.markup.value(),
            styles: self.styles.value(),
            script: self.script.value(),
        }
    }

    /// Whether the preview reflects the current revision
    pub fn preview_is_current(&self) -> bool {
        self.preview_revision == Some(self.revision)
    }
}
