//! Plain-text selection offsets

use serde::{Deserialize, Serialize};

/// A selection measured in characters of the plain (unescaped) text.
///
/// This is the only selection form that survives replacing the displayed
/// content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionOffset {
    pub start: usize,
    pub end: usize,
    pub collapsed: bool,
}

impl SelectionOffset {
    /// A caret at `offset`
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
            collapsed: true,
        }
    }

    /// A range between two offsets, in either order
    pub fn range(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
            collapsed: a == b,
        }
    }

    /// Number of selected characters
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Collapse to the start offset
    pub fn to_start(self) -> Self {
        Self::caret(self.start)
    }

    /// Limit both ends to `len`
    pub fn clamp(self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
            collapsed: self.collapsed || self.start.min(len) == self.end.min(len),
        }
    }
}

/// What `restore` does with a captured range selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestoreMode {
    /// Always place a caret at the start offset
    #[default]
    Collapse,
    /// Restore both ends of a range selection
    PreserveRange,
}

impl RestoreMode {
    /// Apply this mode to a captured selection
    pub fn target(self, captured: SelectionOffset) -> SelectionOffset {
        match self {
            RestoreMode::Collapse => captured.to_start(),
            RestoreMode::PreserveRange => captured,
        }
    }
}
