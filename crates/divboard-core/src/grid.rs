//! Uniform spatial hash grid for broad-phase overlap queries.

use crate::element::{Element, ElementId};
use std::collections::{HashMap, HashSet};

/// Default grid cell size in world units.
pub const DEFAULT_CELL_SIZE: f64 = 100.0;

/// Buckets element ids by fixed-size grid cell.
///
/// An element occupies every cell its bounding box overlaps, boundary cells
/// inclusive; a zero-area element still occupies its starting cell. The grid
/// is a broad-phase filter: sharing a cell over-approximates overlap, so
/// callers needing true collision run an exact rectangle test on the
/// candidates (see [`crate::query::grid_collisions`]).
///
/// Lifecycle is build, query, discard or rebuild. There is no incremental
/// update: buckets mutate only under [`build`](Self::build) /
/// [`insert`](Self::insert), and callers must not query concurrently with a
/// build in progress.
#[derive(Debug)]
pub struct SpatialHashGrid {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<ElementId>>,
}

impl Default for SpatialHashGrid {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialHashGrid {
    /// Create a grid with the given cell size, fixed for the grid's lifetime.
    pub fn new(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// The configured cell size.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Inclusive cell index range covered by an element's bounding box.
    fn cell_range(&self, element: &Element) -> (i64, i64, i64, i64) {
        let start_x = (element.position.x / self.cell_size).floor() as i64;
        let start_y = (element.position.y / self.cell_size).floor() as i64;
        let end_x = ((element.position.x + element.width) / self.cell_size).floor() as i64;
        let end_y = ((element.position.y + element.height) / self.cell_size).floor() as i64;
        (start_x, start_y, end_x, end_y)
    }

    /// Remove all bucket contents.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Rebuild the grid from a snapshot. Clears prior contents first, so
    /// building twice with the same input yields the same buckets.
    pub fn build(&mut self, elements: &[Element]) {
        self.clear();
        for element in elements {
            self.insert(element);
        }
        log::debug!(
            "grid: rebuilt with {} elements across {} cells",
            elements.len(),
            self.cells.len()
        );
    }

    /// Insert one element into every cell its bounds overlap.
    pub fn insert(&mut self, element: &Element) {
        let (start_x, start_y, end_x, end_y) = self.cell_range(element);
        for x in start_x..=end_x {
            for y in start_y..=end_y {
                self.cells.entry((x, y)).or_default().push(element.id);
            }
        }
    }

    /// Ids of all elements sharing at least one cell with `element`'s cell
    /// range, the element's own id excluded.
    ///
    /// Deduplicated; order follows the row-major cell scan, first sighting
    /// wins. The element need not have been inserted: its cells are computed
    /// from its own geometry.
    pub fn query_candidates(&self, element: &Element) -> Vec<ElementId> {
        let (start_x, start_y, end_x, end_y) = self.cell_range(element);
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for x in start_x..=end_x {
            for y in start_y..=end_y {
                let Some(ids) = self.cells.get(&(x, y)) else {
                    continue;
                };
                for &id in ids {
                    if id != element.id && seen.insert(id) {
                        candidates.push(id);
                    }
                }
            }
        }

        candidates
    }
}
