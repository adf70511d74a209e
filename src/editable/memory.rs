//! In-memory surface and environment
//!
//! A headless stand-in for a live editable widget. Content is a list of
//! display segments (one text node each); the environment holds focus and
//! the selection. [`MemorySurface::type_text`] and friends mimic what a
//! native editable widget does to its own content on user input, before
//! the synchronizer sees it.

use crate::syntax::{Highlighted, Segment, TokenKind};

use super::surface::{FocusEnvironment, Surface, SurfaceError, SurfaceRange};
use super::tracker::{offset_to_point, point_to_offset};

/// Headless editable surface
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    segments: Vec<Segment>,
    render_count: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Displayed segments in document order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// How many times content has been replaced by a render
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Insert `text` over the current selection the way a native editable
    /// widget would: the text lands inside the existing node at the caret
    /// and the tokens are left as they were until the next render.
    pub fn type_text(&mut self, env: &mut MemoryEnvironment, text: &str) {
        let (start, end) = self.selected_offsets(env);
        self.edit(start, end, text);
        self.move_caret(env, start + text.chars().count());
    }

    /// Delete the selection, or the character before a caret
    pub fn backspace(&mut self, env: &mut MemoryEnvironment) {
        let (start, end) = self.selected_offsets(env);
        let start = if start == end { start.saturating_sub(1) } else { start };
        self.edit(start, end, "");
        self.move_caret(env, start);
    }

    /// Put a caret at a plain-text offset
    pub fn move_caret(&self, env: &mut MemoryEnvironment, offset: usize) {
        if let Ok(point) = offset_to_point(self, offset) {
            env.selection = Some(SurfaceRange::collapsed(point));
        }
    }

    /// Select a plain-text range
    pub fn select(&self, env: &mut MemoryEnvironment, start: usize, end: usize) {
        if let (Ok(anchor), Ok(focus)) = (offset_to_point(self, start), offset_to_point(self, end)) {
            env.selection = Some(SurfaceRange::new(anchor, focus));
        }
    }

    fn selected_offsets(&self, env: &MemoryEnvironment) -> (usize, usize) {
        let len = self.char_len();
        let Some(range) = env.selection else {
            return (len, len);
        };
        let anchor = point_to_offset(self, range.anchor).unwrap_or(len);
        let focus = point_to_offset(self, range.focus).unwrap_or(len);
        (anchor.min(focus), anchor.max(focus))
    }

    /// Remove `start..end` and insert `text` into the node holding `start`
    fn edit(&mut self, start: usize, end: usize, text: &str) {
        if self.segments.is_empty() {
            if !text.is_empty() {
                self.segments.push(Segment {
                    kind: TokenKind::Plain,
                    text: text.to_string(),
                });
            }
            return;
        }

        let target = offset_to_point(self, start).map(|p| p.node).unwrap_or(0);
        let mut at = 0;
        let mut edited = Vec::with_capacity(self.segments.len());
        for (node, segment) in self.segments.iter().enumerate() {
            let mut kept = String::with_capacity(segment.text.len() + text.len());
            let mut pos = at;
            for ch in segment.text.chars() {
                if node == target && pos == start {
                    kept.push_str(text);
                }
                if pos < start || pos >= end {
                    kept.push(ch);
                }
                pos += 1;
            }
            if node == target && pos == start {
                kept.push_str(text);
            }
            at = pos;
            if !kept.is_empty() {
                edited.push(Segment {
                    kind: segment.kind,
                    text: kept,
                });
            }
        }
        self.segments = edited;
    }
}

impl Surface for MemorySurface {
    fn node_count(&self) -> usize {
        self.segments.len()
    }

    fn node_text(&self, node: usize) -> Option<&str> {
        self.segments.get(node).map(|segment| segment.text.as_str())
    }

    fn replace_content(&mut self, content: &Highlighted) {
        self.segments = content.segments();
        self.render_count += 1;
    }
}

/// Focus and selection state for a [`MemorySurface`]
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
    focused: bool,
    selection: Option<SurfaceRange>,
    failures: usize,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Make the next `count` calls to `set_selection` fail
    pub fn fail_next_selections(&mut self, count: usize) {
        self.failures = count;
    }
}

impl FocusEnvironment for MemoryEnvironment {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn selection(&self) -> Option<SurfaceRange> {
        self.selection
    }

    fn set_selection(&mut self, range: SurfaceRange) -> Result<(), SurfaceError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(SurfaceError::Detached);
        }
        self.selection = Some(range);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{highlight, Language};

    #[test]
    fn test_type_text_replaces_selection() {
        let mut surface = MemorySurface::new();
        surface.replace_content(&highlight("<b>x</b>", Language::Markup));
        let mut env = MemoryEnvironment::new();
        env.focus();

        surface.select(&mut env, 3, 4);
        surface.type_text(&mut env, "yz");
        assert_eq!(surface.plain_text(), "<b>yz</b>");
        assert_eq!(surface.segments()[2].text, ">yz");
        assert_eq!(surface.render_count(), 1);
    }

    #[test]
    fn test_typing_into_empty_surface() {
        let mut surface = MemorySurface::new();
        let mut env = MemoryEnvironment::new();
        surface.type_text(&mut env, "hi");
        assert_eq!(surface.plain_text(), "hi");
        assert_eq!(surface.node_count(), 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut surface = MemorySurface::new();
        surface.replace_content(&highlight("ab", Language::Markup));
        let mut env = MemoryEnvironment::new();
        surface.move_caret(&mut env, 0);
        surface.backspace(&mut env);
        assert_eq!(surface.plain_text(), "ab");
    }

    #[test]
    fn test_failures_are_consumed() {
        let mut env = MemoryEnvironment::new();
        env.fail_next_selections(1);
        let range = SurfaceRange::default();
        assert_eq!(env.set_selection(range), Err(SurfaceError::Detached));
        assert_eq!(env.set_selection(range), Ok(()));
    }
}
