//! Editable highlighting surface
//!
//! The pieces that keep a highlighted, directly editable surface in step
//! with its plain-text value:
//!
//! - [`Surface`] / [`FocusEnvironment`]: capabilities the host provides
//! - [`SelectionTracker`]: live selection ⇄ plain-text offsets
//! - [`RenderSync`]: decides when to regenerate and restores the selection
//! - [`CaretOverlay`]: custom caret geometry
//! - [`MemorySurface`] / [`MemoryEnvironment`]: headless implementations
//! - [`ValueHistory`]: whole-value undo/redo for the owning state container

pub mod caret;
mod history;
pub mod memory;
mod selection;
mod surface;
mod sync;
pub mod tracker;

pub use caret::{CaretEvent, CaretGeometry, CaretOverlay, LayoutProbe, Rect};
pub use history::{ValueChange, ValueHistory};
pub use memory::{MemoryEnvironment, MemorySurface};
pub use selection::{RestoreMode, SelectionOffset};
pub use surface::{FocusEnvironment, Surface, SurfaceError, SurfacePoint, SurfaceRange};
pub use sync::{splice, RenderSync, SyncOutcome, SyncState};
pub use tracker::SelectionTracker;
