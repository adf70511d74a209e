//! Renderer and focus capabilities
//!
//! The synchronizer never touches a concrete display tree. It talks to a
//! [`Surface`] (the displayed text nodes) and a [`FocusEnvironment`]
//! (focus and the live selection), so the same logic runs against a real
//! widget tree or the in-memory fake in [`super::memory`].

use thiserror::Error;

use crate::syntax::Highlighted;

/// A position inside the displayed content: a text node and a character
/// offset within it.
///
/// An empty surface has no text nodes; the only valid point is node 0,
/// offset 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SurfacePoint {
    pub node: usize,
    pub offset: usize,
}

impl SurfacePoint {
    pub fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A live selection with anchor and focus points (focus may precede anchor)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceRange {
    pub anchor: SurfacePoint,
    pub focus: SurfacePoint,
}

impl SurfaceRange {
    pub fn new(anchor: SurfacePoint, focus: SurfacePoint) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(point: SurfacePoint) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("text node {node} out of range ({count} nodes)")]
    NodeOutOfRange { node: usize, count: usize },

    #[error("offset {offset} out of range for text node {node} (length {len})")]
    OffsetOutOfRange { node: usize, offset: usize, len: usize },

    #[error("surface is not attached")]
    Detached,
}

/// The editable display: an ordered list of text nodes.
pub trait Surface {
    /// Number of text nodes in document order
    fn node_count(&self) -> usize;

    /// Text of one node, as displayed (unescaped)
    fn node_text(&self, node: usize) -> Option<&str>;

    /// Replace all displayed content with a rendering of `content`
    fn replace_content(&mut self, content: &Highlighted);

    /// Character length of one node
    fn node_len(&self, node: usize) -> Result<usize, SurfaceError> {
        self.node_text(node)
            .map(|text| text.chars().count())
            .ok_or(SurfaceError::NodeOutOfRange {
                node,
                count: self.node_count(),
            })
    }

    /// Concatenated text of every node
    fn plain_text(&self) -> String {
        (0..self.node_count())
            .filter_map(|node| self.node_text(node))
            .collect()
    }

    /// Total character length of the content
    fn char_len(&self) -> usize {
        (0..self.node_count())
            .filter_map(|node| self.node_text(node))
            .map(|text| text.chars().count())
            .sum()
    }

    /// Check that `point` addresses a real position
    fn check_point(&self, point: SurfacePoint) -> Result<(), SurfaceError> {
        let count = self.node_count();
        if count == 0 {
            return if point == SurfacePoint::default() {
                Ok(())
            } else {
                Err(SurfaceError::NodeOutOfRange {
                    node: point.node,
                    count,
                })
            };
        }
        let len = self.node_len(point.node)?;
        if point.offset > len {
            return Err(SurfaceError::OffsetOutOfRange {
                node: point.node,
                offset: point.offset,
                len,
            });
        }
        Ok(())
    }
}

/// Focus and selection state of the environment hosting a surface.
pub trait FocusEnvironment {
    /// Whether the surface currently has input focus
    fn is_focused(&self) -> bool;

    /// The live selection, if any
    fn selection(&self) -> Option<SurfaceRange>;

    /// Place the selection
    fn set_selection(&mut self, range: SurfaceRange) -> Result<(), SurfaceError>;
}
