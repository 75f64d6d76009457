//! Pure interaction queries: exact collision scans and descendant lookups.
//!
//! Each query is one pure function over a snapshot, so a synchronous caller
//! and any background offload share the same body and cannot drift apart.

use crate::element::{Element, ElementId};
use crate::grid::SpatialHashGrid;
use std::collections::VecDeque;

/// Exact axis-aligned overlap test. Shared edges and corners count as
/// overlap.
pub fn rects_overlap(a: &Element, b: &Element) -> bool {
    !(b.position.x > a.position.x + a.width
        || b.position.x + b.width < a.position.x
        || b.position.y > a.position.y + a.height
        || b.position.y + b.height < a.position.y)
}

/// Ids of every element overlapping the target, target excluded.
///
/// Full scan, snapshot order. An unknown `target_id` yields an empty result.
pub fn collisions(elements: &[Element], target_id: ElementId) -> Vec<ElementId> {
    let Some(target) = elements.iter().find(|e| e.id == target_id) else {
        return Vec::new();
    };
    elements
        .iter()
        .filter(|e| e.id != target_id && rects_overlap(target, e))
        .map(|e| e.id)
        .collect()
}

/// Same result set as [`collisions`], broad-phase filtered through a grid
/// built over the same snapshot. Candidate order follows the grid scan.
pub fn grid_collisions(
    elements: &[Element],
    grid: &SpatialHashGrid,
    target_id: ElementId,
) -> Vec<ElementId> {
    let Some(target) = elements.iter().find(|e| e.id == target_id) else {
        return Vec::new();
    };
    grid.query_candidates(target)
        .into_iter()
        .filter(|id| {
            elements
                .iter()
                .find(|e| e.id == *id)
                .is_some_and(|e| rects_overlap(target, e))
        })
        .collect()
}

/// Transitive children of `roots`, breadth-first.
///
/// Each dequeued id contributes its direct children in snapshot order.
/// Unknown roots contribute nothing. Precondition: `parent_id` links are
/// acyclic (the host's responsibility).
pub fn descendants(elements: &[Element], roots: &[ElementId]) -> Vec<ElementId> {
    let mut result = Vec::new();
    let mut queue: VecDeque<ElementId> = roots.iter().copied().collect();

    while let Some(parent) = queue.pop_front() {
        for child in elements.iter().filter(|e| e.parent_id == Some(parent)) {
            result.push(child.id);
            queue.push_back(child.id);
        }
    }

    result
}
