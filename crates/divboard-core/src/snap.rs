//! Edge and center alignment snapping for drag gestures.

use crate::element::Element;
use kurbo::Vec2;

/// Distance threshold for alignment snapping (in world units).
pub const DEFAULT_SNAP_THRESHOLD: f64 = 5.0;

/// One alignment candidate on a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    /// Coordinate to lock onto: another element's edge or center.
    pub position: f64,
    /// The moving element's paired edge or center coordinate.
    pub target: f64,
    /// Signed distance from target to position.
    pub offset: f64,
}

impl SnapCandidate {
    fn new(position: f64, target: f64) -> Self {
        Self {
            position,
            target,
            offset: position - target,
        }
    }
}

/// Alignment candidates for a drag, split by axis.
///
/// Generation order is part of the contract: resolution snaps to the first
/// in-threshold candidate, so order decides ties. Per other element the
/// horizontal order is left edge, right edge, center; the vertical order is
/// top edge, bottom edge, center.
#[derive(Debug, Clone, Default)]
pub struct SnapCandidates {
    pub horizontal: Vec<SnapCandidate>,
    pub vertical: Vec<SnapCandidate>,
}

/// Outcome of snap resolution: the adjusted delta plus per-axis flags.
#[derive(Debug, Clone, Copy)]
pub struct SnapResolution {
    /// The drag delta with any snap adjustment applied.
    pub delta: Vec2,
    /// Whether the X axis snapped.
    pub snapped_x: bool,
    /// Whether the Y axis snapped.
    pub snapped_y: bool,
}

impl SnapResolution {
    /// Check if either axis snapped.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Collect alignment candidates between `moving` and the other elements.
///
/// Excluded: the moving element itself, and elements whose `parent_id` is
/// the moving element — its direct children only, not the full descendant
/// subtree ([`crate::query::descendants`] computes the closure if a host
/// wants it).
pub fn snap_candidates(moving: &Element, others: &[Element]) -> SnapCandidates {
    let moving_left = moving.position.x;
    let moving_right = moving.position.x + moving.width;
    let moving_top = moving.position.y;
    let moving_bottom = moving.position.y + moving.height;
    let moving_center = moving.center();

    let mut candidates = SnapCandidates::default();

    for other in others {
        if other.id == moving.id || other.parent_id == Some(moving.id) {
            continue;
        }

        let left = other.position.x;
        let right = other.position.x + other.width;
        let top = other.position.y;
        let bottom = other.position.y + other.height;
        let center = other.center();

        candidates.horizontal.push(SnapCandidate::new(left, moving_left));
        candidates.horizontal.push(SnapCandidate::new(right, moving_right));
        candidates.horizontal.push(SnapCandidate::new(center.x, moving_center.x));

        candidates.vertical.push(SnapCandidate::new(top, moving_top));
        candidates.vertical.push(SnapCandidate::new(bottom, moving_bottom));
        candidates.vertical.push(SnapCandidate::new(center.y, moving_center.y));
    }

    candidates
}

fn within_threshold(value: f64, target: f64, threshold: f64) -> bool {
    (value - target).abs() <= threshold
}

/// Resolve a proposed drag delta against the alignment candidates.
///
/// Per axis, scans candidates in generation order and snaps the element's
/// prospective position (`moving.position + delta`) to the FIRST candidate
/// within `threshold` (inclusive). First match wins, not closest match. With
/// no candidate in range the axis keeps its original delta.
pub fn resolve_snap(
    moving: &Element,
    others: &[Element],
    delta: Vec2,
    threshold: f64,
) -> SnapResolution {
    let candidates = snap_candidates(moving, others);
    let mut resolved = delta;
    let mut snapped_x = false;
    let mut snapped_y = false;

    let proposed_x = moving.position.x + delta.x;
    for candidate in &candidates.horizontal {
        if within_threshold(proposed_x, candidate.position, threshold) {
            resolved.x = candidate.position - moving.position.x;
            snapped_x = true;
            break;
        }
    }

    let proposed_y = moving.position.y + delta.y;
    for candidate in &candidates.vertical {
        if within_threshold(proposed_y, candidate.position, threshold) {
            resolved.y = candidate.position - moving.position.y;
            snapped_y = true;
            break;
        }
    }

    SnapResolution {
        delta: resolved,
        snapped_x,
        snapped_y,
    }
}
