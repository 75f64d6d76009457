//! Incremental diff/patch engine over element snapshots.

use crate::element::{Element, ElementId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A before/after pair for an element whose state changed between snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedElement {
    pub before: Element,
    pub after: Element,
}

/// The difference between two snapshots: three disjoint lists keyed by
/// element id. An id appears in at most one of the three.
///
/// Removed entries carry the full element, not just the id, so the patch can
/// be applied in the inverse direction; [`removed_ids`](Self::removed_ids)
/// exposes the id view for render-surface detachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub added: Vec<Element>,
    pub removed: Vec<Element>,
    pub modified: Vec<ModifiedElement>,
}

impl Patch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Ids of the removed elements.
    pub fn removed_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.removed.iter().map(|e| e.id)
    }

    /// Apply the patch in the forward direction (old state to new state).
    ///
    /// Removed elements are dropped, added elements appended, modified
    /// entries replace the element matching `before.id`. Ids absent from
    /// `state` are silently skipped.
    pub fn apply_forward(&self, state: &[Element]) -> Vec<Element> {
        let mut next = state.to_vec();

        for removed in &self.removed {
            next.retain(|e| e.id != removed.id);
        }

        next.extend(self.added.iter().cloned());

        for modified in &self.modified {
            if let Some(slot) = next.iter_mut().find(|e| e.id == modified.before.id) {
                *slot = modified.after.clone();
            }
        }

        next
    }

    /// Apply the patch in the inverse direction (new state back to old).
    ///
    /// Added elements are dropped, removed elements re-inserted, modified
    /// entries replace the element matching `after.id` with `before`. Ids
    /// absent from `state` are silently skipped.
    pub fn apply_inverse(&self, state: &[Element]) -> Vec<Element> {
        let mut next = state.to_vec();

        for added in &self.added {
            next.retain(|e| e.id != added.id);
        }

        next.extend(self.removed.iter().cloned());

        for modified in &self.modified {
            if let Some(slot) = next.iter_mut().find(|e| e.id == modified.after.id) {
                *slot = modified.before.clone();
            }
        }

        next
    }
}

/// Compute the patch taking `old` to `new`.
///
/// Removed entries follow `old` order; added and modified entries follow
/// `new` order. Comparison is field-wise exact equality of the geometric and
/// display state ([`Element::same_appearance`]). Precondition: ids unique
/// within each snapshot (see [`crate::element::validate_snapshot`]).
pub fn diff(old: &[Element], new: &[Element]) -> Patch {
    let old_by_id: HashMap<ElementId, &Element> = old.iter().map(|e| (e.id, e)).collect();
    let new_ids: HashSet<ElementId> = new.iter().map(|e| e.id).collect();

    let mut patch = Patch::default();

    for old_element in old {
        if !new_ids.contains(&old_element.id) {
            patch.removed.push(old_element.clone());
        }
    }

    for new_element in new {
        match old_by_id.get(&new_element.id) {
            None => patch.added.push(new_element.clone()),
            Some(old_element) if !old_element.same_appearance(new_element) => {
                patch.modified.push(ModifiedElement {
                    before: (*old_element).clone(),
                    after: new_element.clone(),
                });
            }
            Some(_) => {}
        }
    }

    patch
}

/// An opaque per-element representation on the render surface.
///
/// The host maps element ids to handles; the patch-apply step mutates
/// geometry/color through [`apply`](Self::apply) and detaches on removal.
pub trait RenderHandle {
    /// Sync the handle to the element's current geometry and color.
    fn apply(&mut self, element: &Element);

    /// Detach from the surface. Called once, just before the handle is
    /// dropped from the id map.
    fn detach(&mut self);
}

/// Apply a patch to the render surface.
///
/// Removed ids detach and drop their handles; added elements get a fresh
/// handle from `create`, synced and registered before any later patch can
/// reference it; modified ids are updated in place. Ids with no handle are
/// silently skipped.
pub fn apply_patch<H, F>(patch: &Patch, handles: &mut HashMap<ElementId, H>, mut create: F)
where
    H: RenderHandle,
    F: FnMut(&Element) -> H,
{
    for id in patch.removed_ids() {
        if let Some(mut handle) = handles.remove(&id) {
            handle.detach();
        }
    }

    for element in &patch.added {
        let mut handle = create(element);
        handle.apply(element);
        handles.insert(element.id, handle);
    }

    for modified in &patch.modified {
        if let Some(handle) = handles.get_mut(&modified.after.id) {
            handle.apply(&modified.after);
        }
    }
}
