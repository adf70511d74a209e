//! Selection tracking across content replacement
//!
//! Converts between live surface points and plain-text character offsets.
//! Capturing walks the text nodes up to the selection; restoring walks the
//! freshly rendered nodes and places the selection at the same offset.

use super::selection::{RestoreMode, SelectionOffset};
use super::surface::{FocusEnvironment, Surface, SurfaceError, SurfacePoint, SurfaceRange};

/// Plain-text offset of a surface point
pub fn point_to_offset<S>(surface: &S, point: SurfacePoint) -> Result<usize, SurfaceError>
where
    S: Surface + ?Sized,
{
    surface.check_point(point)?;
    let mut offset = 0;
    for node in 0..point.node {
        offset += surface.node_len(node)?;
    }
    Ok(offset + point.offset)
}

/// Surface point at a plain-text offset, clamped to the end of content.
///
/// An offset on a boundary between two nodes resolves to the end of the
/// earlier node.
pub fn offset_to_point<S>(surface: &S, offset: usize) -> Result<SurfacePoint, SurfaceError>
where
    S: Surface + ?Sized,
{
    let count = surface.node_count();
    if count == 0 {
        return Ok(SurfacePoint::default());
    }

    let mut remaining = offset;
    for node in 0..count {
        let len = surface.node_len(node)?;
        if remaining <= len {
            return Ok(SurfacePoint::new(node, remaining));
        }
        remaining -= len;
    }
    end_point(surface)
}

/// The point after the last character
pub fn end_point<S>(surface: &S) -> Result<SurfacePoint, SurfaceError>
where
    S: Surface + ?Sized,
{
    match surface.node_count() {
        0 => Ok(SurfacePoint::default()),
        count => {
            let last = count - 1;
            Ok(SurfacePoint::new(last, surface.node_len(last)?))
        }
    }
}

/// Captures and restores selections as plain-text offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    mode: RestoreMode,
}

impl SelectionTracker {
    pub fn new(mode: RestoreMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RestoreMode {
        self.mode
    }

    /// Offset of the current selection, if the surface is focused and has
    /// one. The end offset is always recorded; `restore` decides whether
    /// to use it.
    pub fn capture<S, E>(&self, surface: &S, env: &E) -> Option<SelectionOffset>
    where
        S: Surface + ?Sized,
        E: FocusEnvironment + ?Sized,
    {
        if !env.is_focused() {
            return None;
        }
        let range = env.selection()?;

        let offsets = point_to_offset(surface, range.anchor)
            .and_then(|anchor| Ok((anchor, point_to_offset(surface, range.focus)?)));
        match offsets {
            Ok((anchor, focus)) => {
                let mut captured = SelectionOffset::range(anchor, focus);
                captured.collapsed = range.is_collapsed() || anchor == focus;
                Some(captured)
            }
            Err(err) => {
                tracing::debug!("selection capture skipped: {}", err);
                None
            }
        }
    }

    /// Place the selection at `captured` in the current content.
    ///
    /// Offsets past the end clamp to the end. Any failure places a caret at
    /// the end of content instead. Returns the offsets actually applied.
    pub fn restore<S, E>(&self, surface: &S, env: &mut E, captured: SelectionOffset) -> SelectionOffset
    where
        S: Surface + ?Sized,
        E: FocusEnvironment + ?Sized,
    {
        let target = self.mode.target(captured).clamp(surface.char_len());

        match self.place(surface, env, target) {
            Ok(()) => target,
            Err(err) => {
                tracing::warn!(
                    "selection restore failed at {}..{}: {}; moving caret to end",
                    target.start,
                    target.end,
                    err
                );
                let end = SelectionOffset::caret(surface.char_len());
                if let Err(err) = self.place(surface, env, end) {
                    tracing::debug!("end-of-content fallback failed: {}", err);
                }
                end
            }
        }
    }

    fn place<S, E>(&self, surface: &S, env: &mut E, target: SelectionOffset) -> Result<(), SurfaceError>
    where
        S: Surface + ?Sized,
        E: FocusEnvironment + ?Sized,
    {
        let start = offset_to_point(surface, target.start)?;
        let range = if target.collapsed {
            SurfaceRange::collapsed(start)
        } else {
            SurfaceRange::new(start, offset_to_point(surface, target.end)?)
        };
        env.set_selection(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::memory::{MemoryEnvironment, MemorySurface};
    use crate::syntax::{highlight, Language};

    fn surface(raw: &str) -> MemorySurface {
        let mut surface = MemorySurface::new();
        surface.replace_content(&highlight(raw, Language::Markup));
        surface
    }

    #[test]
    fn test_point_offset_round_trip() {
        let surface = surface("<p>hi</p>");
        for offset in 0..=surface.char_len() {
            let point = offset_to_point(&surface, offset).unwrap();
            assert_eq!(point_to_offset(&surface, point).unwrap(), offset);
        }
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let surface = surface("<b>");
        assert_eq!(
            offset_to_point(&surface, 99).unwrap(),
            end_point(&surface).unwrap()
        );
    }

    #[test]
    fn test_capture_requires_focus() {
        let surface = surface("<p>");
        let mut env = MemoryEnvironment::new();
        env.set_selection(SurfaceRange::collapsed(SurfacePoint::new(1, 1)))
            .unwrap();
        let tracker = SelectionTracker::default();
        assert_eq!(tracker.capture(&surface, &env), None);

        env.focus();
        assert_eq!(
            tracker.capture(&surface, &env),
            Some(SelectionOffset::caret(2))
        );
    }

    #[test]
    fn test_capture_without_selection() {
        let surface = surface("<p>");
        let mut env = MemoryEnvironment::new();
        env.focus();
        env.clear_selection();
        assert_eq!(SelectionTracker::default().capture(&surface, &env), None);
    }

    #[test]
    fn test_capture_of_stale_point_is_none() {
        let surface = surface("ab");
        let mut env = MemoryEnvironment::new();
        env.focus();
        env.set_selection(SurfaceRange::collapsed(SurfacePoint::new(7, 0)))
            .unwrap();
        assert_eq!(SelectionTracker::default().capture(&surface, &env), None);
    }

    #[test]
    fn test_restore_collapses_range_by_default() {
        let surface = surface("abcdef");
        let mut env = MemoryEnvironment::new();
        env.focus();
        let applied =
            SelectionTracker::default().restore(&surface, &mut env, SelectionOffset::range(2, 4));
        assert_eq!(applied, SelectionOffset::caret(2));
        assert!(env.selection().unwrap().is_collapsed());
    }

    #[test]
    fn test_restore_preserves_range_when_configured() {
        let surface = surface("abcdef");
        let mut env = MemoryEnvironment::new();
        env.focus();
        let tracker = SelectionTracker::new(RestoreMode::PreserveRange);
        let applied = tracker.restore(&surface, &mut env, SelectionOffset::range(2, 4));
        assert_eq!(applied, SelectionOffset::range(2, 4));
        assert_eq!(tracker.capture(&surface, &env), Some(SelectionOffset::range(2, 4)));
    }

    #[test]
    fn test_restore_failure_falls_back_to_end() {
        let surface = surface("abc");
        let mut env = MemoryEnvironment::new();
        env.focus();
        env.fail_next_selections(1);
        let applied =
            SelectionTracker::default().restore(&surface, &mut env, SelectionOffset::caret(1));
        assert_eq!(applied, SelectionOffset::caret(3));
    }

    #[test]
    fn test_restore_on_empty_surface() {
        let surface = MemorySurface::new();
        let mut env = MemoryEnvironment::new();
        env.focus();
        let applied =
            SelectionTracker::default().restore(&surface, &mut env, SelectionOffset::caret(5));
        assert_eq!(applied, SelectionOffset::caret(0));
        assert_eq!(
            env.selection(),
            Some(SurfaceRange::collapsed(SurfacePoint::default()))
        );
    }
}
