//! Undo/redo of whole-value replacements for one region.

use super::selection::SelectionOffset;

/// One value replacement that can be undone/redone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    /// Value before the change
    pub before: String,
    /// Value after the change
    pub after: String,
    /// Caret before the change, if known
    pub selection_before: Option<SelectionOffset>,
    /// Caret after the change, if known
    pub selection_after: Option<SelectionOffset>,
}

impl ValueChange {
    pub fn new(before: String, after: String) -> Self {
        Self {
            before,
            after,
            selection_before: None,
            selection_after: None,
        }
    }

    pub fn with_selections(
        mut self,
        before: Option<SelectionOffset>,
        after: Option<SelectionOffset>,
    ) -> Self {
        self.selection_before = before;
        self.selection_after = after;
        self
    }

    /// The change that reverts this one
    pub fn inverse(&self) -> Self {
        Self {
            before: self.after.clone(),
            after: self.before.clone(),
            selection_before: self.selection_after,
            selection_after: self.selection_before,
        }
    }
}

/// Value history with undo/redo stacks.
#[derive(Debug, Clone)]
pub struct ValueHistory {
    undo_stack: Vec<ValueChange>,
    redo_stack: Vec<ValueChange>,
    max_size: usize,
}

impl Default for ValueHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueHistory {
    /// Create a history with the default max size
    pub fn new() -> Self {
        Self::with_max_size(1000)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Record a change (clears the redo stack). No-op changes are ignored.
    pub fn push(&mut self, change: ValueChange) {
        if change.before == change.after {
            return;
        }
        self.redo_stack.clear();
        self.undo_stack.push(change);

        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }

    /// Pop the latest change; the caller restores `change.before`
    pub fn pop_undo(&mut self) -> Option<ValueChange> {
        let change = self.undo_stack.pop()?;
        self.redo_stack.push(change.inverse());
        Some(change)
    }

    /// Pop the latest undone change as its inverse; the caller restores
    /// `change.before` (the value that was undone)
    pub fn pop_redo(&mut self) -> Option<ValueChange> {
        let change = self.redo_stack.pop()?;
        self.undo_stack.push(change.inverse());
        Some(change)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(before: &str, after: &str) -> ValueChange {
        ValueChange::new(before.to_string(), after.to_string())
    }

    #[test]
    fn test_inverse_swaps_values_and_selections() {
        let original = change("a", "ab").with_selections(
            Some(SelectionOffset::caret(1)),
            Some(SelectionOffset::caret(2)),
        );
        let inverse = original.inverse();
        assert_eq!(inverse.before, "ab");
        assert_eq!(inverse.after, "a");
        assert_eq!(inverse.selection_after, Some(SelectionOffset::caret(1)));
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = ValueHistory::new();
        history.push(change("", "a"));
        history.push(change("a", "ab"));

        let undone = history.pop_undo().unwrap();
        assert_eq!(undone.before, "a");
        assert!(history.can_redo());

        // Redo hands back the inverse: restoring its `before` re-applies "ab"
        let redone = history.pop_redo().unwrap();
        assert_eq!(redone.before, "ab");
        assert_eq!(history.undo_count(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = ValueHistory::new();
        history.push(change("", "a"));
        history.pop_undo();
        history.push(change("", "b"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_noop_change_is_ignored() {
        let mut history = ValueHistory::new();
        history.push(change("x", "x"));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_max_size() {
        let mut history = ValueHistory::with_max_size(3);
        for i in 0..5 {
            history.push(change(&i.to_string(), &(i + 1).to_string()));
        }
        assert_eq!(history.undo_count(), 3);
        assert_eq!(history.pop_undo().unwrap().after, "5");
    }
}
