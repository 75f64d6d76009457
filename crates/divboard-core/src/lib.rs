//! Divboard Core Library
//!
//! Platform-agnostic performance helpers for the divboard canvas editor:
//! spatial hashing for broad-phase overlap queries, snapshot diffing with
//! render patching, diff-based undo/redo, alignment snapping, viewport
//! culling, and the pure collision/descendant queries shared by synchronous
//! and offloaded callers.

pub mod diff;
pub mod element;
pub mod grid;
pub mod history;
pub mod memo;
pub mod query;
pub mod snap;
pub mod viewport;

pub use diff::{ModifiedElement, Patch, RenderHandle, apply_patch, diff};
pub use element::{
    Color, Element, ElementId, SnapshotError, snapshot_from_json, snapshot_to_json,
    validate_snapshot,
};
pub use grid::{DEFAULT_CELL_SIZE, SpatialHashGrid};
pub use history::{DEFAULT_MAX_HISTORY, History};
pub use memo::{DEFAULT_MEMO_CAPACITY, MemoCache};
pub use query::{collisions, descendants, grid_collisions, rects_overlap};
pub use snap::{
    DEFAULT_SNAP_THRESHOLD, SnapCandidate, SnapCandidates, SnapResolution, resolve_snap,
    snap_candidates,
};
pub use viewport::{DEFAULT_CULL_MARGIN, visible_elements};
