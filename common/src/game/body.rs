use std::collections::VecDeque;

use crate::error::GameError;
use crate::geometry::{Cell, CellBounds};
use super::spatial_index::SpatialIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub id: SegmentId,
    pub cell: Cell,
}

/// Snake cells ordered tail first, head last, mirrored into a spatial index.
#[derive(Clone, Debug, Default)]
pub struct SnakeBody {
    segments: VecDeque<Segment>,
    index: SpatialIndex,
    next_id: u64,
}

impl SnakeBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut body = Self::new();
        for cell in cells {
            body.extend(cell);
        }
        body
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn head(&self) -> Option<Cell> {
        self.segments.back().map(|s| s.cell)
    }

    pub fn head_segment(&self) -> Option<Segment> {
        self.segments.back().copied()
    }

    pub fn tail(&self) -> Option<Cell> {
        self.segments.front().map(|s| s.cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().map(|s| s.cell)
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn extend(&mut self, cell: Cell) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        let segment = Segment { id, cell };
        self.segments.push_back(segment);
        self.index.insert(segment);
        id
    }

    pub fn remove_tail(&mut self) -> Result<Cell, GameError> {
        let tail = self.segments.pop_front().ok_or(GameError::EmptyBody)?;
        self.index.remove(tail);
        Ok(tail.cell)
    }

    /// Plain step: drops the tail, then adds `cell` as the head. Returns the
    /// removed tail.
    pub fn move_to(&mut self, cell: Cell) -> Result<Cell, GameError> {
        let tail = self.remove_tail()?;
        self.extend(cell);
        Ok(tail)
    }

    /// Cells are equal-sized and grid-aligned, so geometric containment of
    /// one cell by another reduces to equality.
    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains_cell(cell)
    }

    pub fn segments_overlapping(&self, bounds: &CellBounds) -> Vec<Segment> {
        self.index.intersects(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn starting_body() -> SnakeBody {
        SnakeBody::from_cells([Cell::new(-2, 0), Cell::new(-1, 0), Cell::new(0, 0)])
    }

    #[test]
    fn test_head_and_tail() {
        let body = starting_body();
        assert_eq!(body.len(), 3);
        assert_eq!(body.head(), Some(Cell::new(0, 0)));
        assert_eq!(body.tail(), Some(Cell::new(-2, 0)));
    }

    #[test]
    fn test_move_to_keeps_index_in_sync() {
        let mut body = starting_body();
        let removed = body.move_to(Cell::new(1, 0)).unwrap();
        assert_eq!(removed, Cell::new(-2, 0));
        assert_eq!(body.len(), 3);

        let indexed: HashSet<Cell> = body.index().occupied_cells().collect();
        let expected: HashSet<Cell> = [Cell::new(-1, 0), Cell::new(0, 0), Cell::new(1, 0)].into();
        assert_eq!(indexed, expected);
        assert!(!body.contains(Cell::new(-2, 0)));
        assert!(body.contains(Cell::new(1, 0)));
        assert_eq!(body.index().len(), body.len());
    }

    #[test]
    fn test_extend_grows_by_one() {
        let mut body = starting_body();
        body.extend(Cell::new(1, 0));
        assert_eq!(body.len(), 4);
        assert_eq!(body.head(), Some(Cell::new(1, 0)));
        assert_eq!(body.tail(), Some(Cell::new(-2, 0)));
    }

    #[test]
    fn test_remove_tail_on_empty_body_fails() {
        let mut body = SnakeBody::new();
        assert_eq!(body.remove_tail(), Err(GameError::EmptyBody));
        assert_eq!(body.move_to(Cell::new(0, 0)), Err(GameError::EmptyBody));
        assert!(body.is_empty());
    }

    #[test]
    fn test_segment_ids_are_unique() {
        let mut body = starting_body();
        let a = body.extend(Cell::new(0, 1));
        body.remove_tail().unwrap();
        let b = body.extend(Cell::new(0, 2));
        assert_ne!(a, b);
    }
}
