use std::collections::HashMap;

use crate::geometry::{Cell, CellBounds};
use super::body::{Segment, SegmentId};

/// Grid hash over occupied cells. A cell can hold several segments for the
/// moment a self-bite happens.
#[derive(Clone, Debug, Default)]
pub struct SpatialIndex {
    cells: HashMap<Cell, Vec<SegmentId>>,
    len: usize,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, segment: Segment) {
        self.cells.entry(segment.cell).or_default().push(segment.id);
        self.len += 1;
    }

    pub fn remove(&mut self, segment: Segment) -> bool {
        let Some(ids) = self.cells.get_mut(&segment.cell) else {
            return false;
        };
        let Some(pos) = ids.iter().position(|id| *id == segment.id) else {
            return false;
        };
        ids.swap_remove(pos);
        if ids.is_empty() {
            self.cells.remove(&segment.cell);
        }
        self.len -= 1;
        true
    }

    pub fn contains_cell(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.keys().copied()
    }

    /// Segments whose cell box overlaps `bounds`, touching boxes included.
    pub fn intersects(&self, bounds: &CellBounds) -> Vec<Segment> {
        let mut found = Vec::new();
        if bounds.overlapping_area() > self.cells.len() as u64 {
            for (cell, ids) in &self.cells {
                if bounds.overlaps(*cell) {
                    found.extend(ids.iter().map(|id| Segment { id: *id, cell: *cell }));
                }
            }
        } else {
            for cell in bounds.overlapping_cells() {
                if let Some(ids) = self.cells.get(&cell) {
                    found.extend(ids.iter().map(|id| Segment { id: *id, cell }));
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: u64, col: i64, row: i64) -> Segment {
        Segment {
            id: SegmentId(id),
            cell: Cell::new(col, row),
        }
    }

    #[test]
    fn test_insert_and_remove() {
        let mut index = SpatialIndex::new();
        index.insert(segment(1, 0, 0));
        index.insert(segment(2, 0, 0));
        assert_eq!(index.len(), 2);
        assert!(index.remove(segment(1, 0, 0)));
        assert!(index.contains_cell(Cell::new(0, 0)));
        assert!(!index.remove(segment(1, 0, 0)));
        assert!(index.remove(segment(2, 0, 0)));
        assert!(!index.contains_cell(Cell::new(0, 0)));
        assert!(index.is_empty());
    }

    #[test]
    fn test_intersects_returns_touching_cells() {
        let mut index = SpatialIndex::new();
        for (id, col) in (0..6).enumerate() {
            index.insert(segment(id as u64, col, 0));
        }
        index.insert(segment(10, 1, 1));

        let mut ids: Vec<u64> = index
            .intersects(&Cell::new(2, 0).bounds())
            .iter()
            .map(|s| s.id.0)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 10]);
    }

    #[test]
    fn test_intersects_large_query_scans_map() {
        let mut index = SpatialIndex::new();
        index.insert(segment(1, 0, 0));
        index.insert(segment(2, 50, 50));
        let bounds = CellBounds::new(Cell::new(-100, -100), Cell::new(100, 10));
        let found = index.intersects(&bounds);
        assert_eq!(found, vec![segment(1, 0, 0)]);
    }
}
