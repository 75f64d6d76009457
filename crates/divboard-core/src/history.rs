//! Diff-based undo/redo history.

use crate::diff::{Patch, diff};
use crate::element::Element;
use std::collections::VecDeque;

/// Maximum number of history entries to keep by default.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Bounded undo/redo stacks of diff patches.
///
/// Each entry is the [`Patch`] for one recorded transition; entries are
/// owned by the history once pushed. History is linear: recording a new
/// change after any undo discards the redo stack irrecoverably. The undo
/// stack is capped, evicting the oldest entry past `max_depth`.
///
/// Not designed for concurrent invocation; callers serialize access.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Patch>,
    redo_stack: Vec<Patch>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl History {
    /// Create a history keeping at most `max_depth` undo entries.
    pub fn new(max_depth: usize) -> Self {
        assert!(max_depth > 0, "history depth must be positive");
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Record the transition from `old` to `new`.
    ///
    /// Pushes the diff onto the undo stack and clears the redo stack. No
    /// no-op distinction is made: an all-empty patch is pushed like any
    /// other.
    pub fn record_change(&mut self, old: &[Element], new: &[Element]) {
        let patch = diff(old, new);
        log::debug!(
            "history: record change (+{} -{} ~{})",
            patch.added.len(),
            patch.removed.len(),
            patch.modified.len()
        );
        self.undo_stack.push_back(patch);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Undo the most recent recorded change.
    ///
    /// Pops the top patch onto the redo stack and returns `current` with the
    /// patch applied in the inverse direction. An empty undo stack returns
    /// `current` unchanged.
    pub fn undo(&mut self, current: &[Element]) -> Vec<Element> {
        let Some(patch) = self.undo_stack.pop_back() else {
            return current.to_vec();
        };
        log::debug!("history: undo ({} entries left)", self.undo_stack.len());
        let restored = patch.apply_inverse(current);
        self.redo_stack.push(patch);
        restored
    }

    /// Redo the most recently undone change.
    ///
    /// Symmetric to [`undo`](Self::undo): pops from redo onto undo and
    /// applies the patch forward. An empty redo stack returns `current`
    /// unchanged.
    pub fn redo(&mut self, current: &[Element]) -> Vec<Element> {
        let Some(patch) = self.redo_stack.pop() else {
            return current.to_vec();
        };
        log::debug!("history: redo ({} entries left)", self.redo_stack.len());
        let replayed = patch.apply_forward(current);
        self.undo_stack.push_back(patch);
        replayed
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop all history entries.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Color, ElementId};
    use kurbo::Point;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn element(x: f64, y: f64) -> Element {
        Element::new(Point::new(x, y), 100.0, 80.0)
    }

    fn by_id(snapshot: &[Element]) -> HashMap<ElementId, Element> {
        snapshot.iter().map(|e| (e.id, e.clone())).collect()
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::default();
        let before = vec![element(0.0, 0.0)];
        let mut after = before.clone();
        after[0].position.x = 50.0;
        after.push(element(10.0, 10.0));

        history.record_change(&before, &after);

        let undone = history.undo(&after);
        assert_eq!(by_id(&undone), by_id(&before));

        let redone = history.redo(&undone);
        assert_eq!(by_id(&redone), by_id(&after));
    }

    #[test]
    fn test_empty_stacks_return_input_unchanged() {
        let mut history = History::default();
        let state = vec![element(0.0, 0.0)];

        assert!(!history.can_undo());
        assert_eq!(history.undo(&state), state);
        assert!(!history.can_redo());
        assert_eq!(history.redo(&state), state);
    }

    #[test]
    fn test_recording_clears_redo() {
        let mut history = History::default();
        let start = vec![element(0.0, 0.0)];
        let mut moved = start.clone();
        moved[0].position.x = 50.0;

        history.record_change(&start, &moved);
        let undone = history.undo(&moved);
        assert!(history.can_redo());

        let mut different = undone.clone();
        different[0].position.y = 75.0;
        history.record_change(&undone, &different);

        // Redo after a fresh record is a no-op.
        assert!(!history.can_redo());
        assert_eq!(history.redo(&different), different);
    }

    #[test]
    fn test_depth_cap_evicts_oldest() {
        let mut history = History::new(2);
        let mut state = vec![element(0.0, 0.0)];

        for step in 1..=3 {
            let mut next = state.clone();
            next[0].position.x = step as f64 * 10.0;
            history.record_change(&state, &next);
            state = next;
        }

        // Only the two most recent transitions survive.
        let state = history.undo(&state);
        assert_eq!(state[0].position.x, 20.0);
        let state = history.undo(&state);
        assert_eq!(state[0].position.x, 10.0);
        assert!(!history.can_undo());
        assert_eq!(history.undo(&state), state);
    }

    #[test]
    fn test_noop_change_is_recorded() {
        let mut history = History::default();
        let state = vec![element(0.0, 0.0)];

        history.record_change(&state, &state);
        assert!(history.can_undo());
        assert_eq!(history.undo(&state), state);
    }

    #[test]
    fn test_undo_chain_across_add_and_remove() {
        let mut history = History::default();

        let s0: Vec<Element> = Vec::new();
        let s1 = vec![element(0.0, 0.0)];
        history.record_change(&s0, &s1);

        let mut s2 = s1.clone();
        s2.push(element(20.0, 20.0).with_color(Color::opaque(9, 9, 9)));
        history.record_change(&s1, &s2);

        let s3 = vec![s2[1].clone()];
        history.record_change(&s2, &s3);

        let state = history.undo(&s3);
        assert_eq!(by_id(&state), by_id(&s2));
        let state = history.undo(&state);
        assert_eq!(by_id(&state), by_id(&s1));
        let state = history.undo(&state);
        assert!(state.is_empty());

        let state = history.redo(&state);
        assert_eq!(by_id(&state), by_id(&s1));
        let state = history.redo(&state);
        assert_eq!(by_id(&state), by_id(&s2));
        let state = history.redo(&state);
        assert_eq!(by_id(&state), by_id(&s3));
    }

    // ---- property tests ----

    /// A single host edit applied to a snapshot.
    #[derive(Debug, Clone)]
    enum EditOp {
        Move { slot: usize, dx: f64, dy: f64 },
        Resize { slot: usize, width: f64, height: f64 },
        Recolor { slot: usize },
        Remove { slot: usize },
        Add { x: f64, y: f64 },
    }

    fn arb_edit_op() -> impl Strategy<Value = EditOp> {
        prop_oneof![
            (0usize..8, -50.0..50.0f64, -50.0..50.0f64)
                .prop_map(|(slot, dx, dy)| EditOp::Move { slot, dx, dy }),
            (0usize..8, 1.0..200.0f64, 1.0..200.0f64)
                .prop_map(|(slot, width, height)| EditOp::Resize { slot, width, height }),
            (0usize..8).prop_map(|slot| EditOp::Recolor { slot }),
            (0usize..8).prop_map(|slot| EditOp::Remove { slot }),
            (0.0..500.0f64, 0.0..500.0f64).prop_map(|(x, y)| EditOp::Add { x, y }),
        ]
    }

    fn apply_edit(snapshot: &mut Vec<Element>, op: &EditOp) {
        let wrap = |slot: usize, len: usize| if len == 0 { None } else { Some(slot % len) };
        match op {
            EditOp::Move { slot, dx, dy } => {
                if let Some(i) = wrap(*slot, snapshot.len()) {
                    snapshot[i].position.x += dx;
                    snapshot[i].position.y += dy;
                }
            }
            EditOp::Resize {
                slot,
                width,
                height,
            } => {
                if let Some(i) = wrap(*slot, snapshot.len()) {
                    snapshot[i].width = *width;
                    snapshot[i].height = *height;
                }
            }
            EditOp::Recolor { slot } => {
                if let Some(i) = wrap(*slot, snapshot.len()) {
                    snapshot[i].color = Some(Color::opaque(7, 7, 7));
                }
            }
            EditOp::Remove { slot } => {
                if let Some(i) = wrap(*slot, snapshot.len()) {
                    snapshot.remove(i);
                }
            }
            EditOp::Add { x, y } => {
                let mut e = Element::new(Point::new(*x, *y), 40.0, 30.0);
                // Deterministic id from position so shrinking stays stable.
                e.id = Uuid::from_u128(((*x as u128) << 64) | (*y as u128) | 1);
                if !snapshot.iter().any(|other| other.id == e.id) {
                    snapshot.push(e);
                }
            }
        }
    }

    proptest! {
        /// Undo restores every intermediate state of an edit session, and
        /// redo replays back to the final state.
        #[test]
        fn undo_redo_walks_the_whole_session(
            ops in prop::collection::vec(arb_edit_op(), 1..12),
        ) {
            let mut history = History::default();
            let mut snapshots = vec![vec![Element::new(Point::new(0.0, 0.0), 10.0, 10.0)]];

            for op in &ops {
                let mut next = snapshots.last().unwrap().clone();
                apply_edit(&mut next, op);
                history.record_change(snapshots.last().unwrap(), &next);
                snapshots.push(next);
            }

            let mut state = snapshots.last().unwrap().clone();
            for expected in snapshots.iter().rev().skip(1) {
                state = history.undo(&state);
                prop_assert_eq!(by_id(&state), by_id(expected));
            }

            for expected in snapshots.iter().skip(1) {
                state = history.redo(&state);
                prop_assert_eq!(by_id(&state), by_id(expected));
            }
        }
    }
}
