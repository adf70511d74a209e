//! Render synchronization
//!
//! Keeps an editable surface's displayed tokens in step with the
//! authoritative value owned by the state container.
//!
//! ```text
//! input  → capture → extract plain text → propagate (on_input)
//! value  → compare → capture → highlight → replace → restore (apply_external)
//! paste  → splice clipboard at selection → preset caret → propagate
//! ```
//!
//! Regeneration only ever happens in [`RenderSync::apply_external`], from
//! the value that came back through the owner, never from a local guess.

use crate::syntax::{highlight, Language};

use super::selection::{RestoreMode, SelectionOffset};
use super::surface::{FocusEnvironment, Surface};
use super::tracker::SelectionTracker;

/// Synchronizer state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Idle,
    /// An IME composition is in progress; external updates are held off
    Composing,
}

/// Result of an external value change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Surface already showed this value in this language
    Unchanged,
    /// Content was regenerated; `selection` is what was restored, if any
    Regenerated { selection: Option<SelectionOffset> },
    /// A composition is active; the update will be re-evaluated after it ends
    Deferred,
}

/// Render synchronizer for one editor region
#[derive(Debug, Clone)]
pub struct RenderSync {
    language: Language,
    state: SyncState,
    tracker: SelectionTracker,
    /// Selection captured by the last local input
    last_capture: Option<SelectionOffset>,
    /// Where the caret goes after the next regeneration (set by paste)
    pending_target: Option<SelectionOffset>,
    /// Surface text when the current composition started
    composition_base: String,
    /// Latest external value held off by the current composition
    deferred: Option<(String, Language)>,
}

impl RenderSync {
    pub fn new(language: Language, mode: RestoreMode) -> Self {
        Self {
            language,
            state: SyncState::Idle,
            tracker: SelectionTracker::new(mode),
            last_capture: None,
            pending_target: None,
            composition_base: String::new(),
            deferred: None,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    /// Whether an external update arrived during the current composition
    pub fn has_deferred_update(&self) -> bool {
        self.deferred.is_some()
    }

    /// Place the caret at `target` after the next regeneration, in place of
    /// the captured selection (undo/redo carets from the owner).
    pub fn set_caret_target(&mut self, target: SelectionOffset) {
        self.pending_target = Some(target);
    }

    /// Render `value` if the surface does not already show it.
    pub fn apply_external<S, E>(
        &mut self,
        surface: &mut S,
        env: &mut E,
        value: &str,
        language: Language,
    ) -> SyncOutcome
    where
        S: Surface + ?Sized,
        E: FocusEnvironment + ?Sized,
    {
        if self.state == SyncState::Composing {
            if language == self.language && value == self.composition_base {
                self.deferred = None;
            } else {
                tracing::debug!("external update deferred during composition");
                self.deferred = Some((value.to_string(), language));
            }
            return SyncOutcome::Deferred;
        }

        if language == self.language && surface.plain_text() == value {
            self.pending_target = None;
            return SyncOutcome::Unchanged;
        }

        SyncOutcome::Regenerated {
            selection: self.regenerate(surface, env, value, language),
        }
    }

    /// Re-tokenize what the surface currently shows, keeping the selection.
    /// Local typing leaves the old token boundaries in place; this brings
    /// them up to date without a value change.
    pub fn refresh<S, E>(&mut self, surface: &mut S, env: &mut E) -> SyncOutcome
    where
        S: Surface + ?Sized,
        E: FocusEnvironment + ?Sized,
    {
        if self.state == SyncState::Composing {
            return SyncOutcome::Deferred;
        }
        let value = surface.plain_text();
        SyncOutcome::Regenerated {
            selection: self.regenerate(surface, env, &value, self.language),
        }
    }

    fn regenerate<S, E>(
        &mut self,
        surface: &mut S,
        env: &mut E,
        value: &str,
        language: Language,
    ) -> Option<SelectionOffset>
    where
        S: Surface + ?Sized,
        E: FocusEnvironment + ?Sized,
    {
        let captured = self
            .pending_target
            .take()
            .or_else(|| self.tracker.capture(&*surface, &*env))
            .or(self.last_capture);

        let highlighted = highlight(value, language);
        surface.replace_content(&highlighted);
        tracing::debug!(
            language = ?language,
            spans = highlighted.spans.len(),
            "regenerated surface"
        );

        let selection = match captured {
            Some(captured) if env.is_focused() => {
                Some(self.tracker.restore(&*surface, env, captured))
            }
            _ => None,
        };
        self.last_capture = selection;
        self.language = language;
        selection
    }

    /// A local edit happened on the surface. Returns the value to
    /// propagate, or `None` while composing.
    pub fn on_input<S, E>(&mut self, surface: &S, env: &E) -> Option<String>
    where
        S: Surface + ?Sized,
        E: FocusEnvironment + ?Sized,
    {
        self.last_capture = self.tracker.capture(surface, env);
        if self.state == SyncState::Composing {
            return None;
        }
        Some(surface.plain_text())
    }

    /// Replace the selected text with `clipboard` instead of letting the
    /// surface paste markup. Returns the spliced value to propagate; the
    /// caret lands after the inserted text on the next regeneration.
    pub fn on_paste<S, E>(&mut self, surface: &S, env: &E, clipboard: &str) -> String
    where
        S: Surface + ?Sized,
        E: FocusEnvironment + ?Sized,
    {
        let current = surface.plain_text();
        let len = current.chars().count();
        let range = self
            .tracker
            .capture(surface, env)
            .or(self.last_capture)
            .unwrap_or(SelectionOffset::caret(len))
            .clamp(len);

        let (value, caret) = splice(&current, range, clipboard);
        self.pending_target = Some(SelectionOffset::caret(caret));
        value
    }

    pub fn composition_start<S: Surface + ?Sized>(&mut self, surface: &S) {
        self.state = SyncState::Composing;
        self.composition_base = surface.plain_text();
        self.deferred = None;
    }

    /// Composition ended. Returns the value to propagate: the composed text,
    /// or the external value that arrived meanwhile, which replaces it.
    pub fn composition_end<S, E>(&mut self, surface: &mut S, env: &mut E) -> String
    where
        S: Surface + ?Sized,
        E: FocusEnvironment + ?Sized,
    {
        self.state = SyncState::Idle;
        self.composition_base.clear();
        match self.deferred.take() {
            Some((value, language)) => {
                tracing::debug!("composition ended, applying deferred update");
                self.regenerate(surface, env, &value, language);
                value
            }
            None => {
                self.last_capture = self.tracker.capture(&*surface, &*env);
                surface.plain_text()
            }
        }
    }
}

/// Replace the characters in `range` with `inserted` (CRLF normalized to
/// LF). Returns the new text and the caret offset after the insertion.
pub fn splice(text: &str, range: SelectionOffset, inserted: &str) -> (String, usize) {
    let inserted = inserted.replace("\r\n", "\n");
    let start = byte_index(text, range.start);
    let end = byte_index(text, range.end.max(range.start));

    let mut value = String::with_capacity(text.len() + inserted.len());
    value.push_str(&text[..start]);
    value.push_str(&inserted);
    value.push_str(&text[end..]);
    (value, range.start + inserted.chars().count())
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
