use crate::geometry::{Cell, Grid};
use super::board::BoardGeometry;
use super::body::SnakeBody;

/// With a single-width body the head's box always touches itself and its two
/// neighbours, so up to this many candidates from the index can never be a bite.
const ADJACENT_CANDIDATES: usize = 3;

#[derive(Clone, Copy, Debug)]
pub struct CollisionDetector {
    grid: Grid,
}

impl CollisionDetector {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Centroid containment rather than area overlap, so touching edges
    /// never count as eating.
    pub fn head_eats_food(&self, body: &SnakeBody, food: Cell) -> bool {
        let Some(head) = body.head() else {
            return false;
        };
        let centroid = self.grid.square(food).centroid();
        self.grid.square(head).contains_point(centroid)
    }

    pub fn self_collision(&self, body: &SnakeBody) -> bool {
        let Some(head) = body.head_segment() else {
            return false;
        };

        let candidates = body.segments_overlapping(&head.cell.bounds());
        if candidates.len() <= ADJACENT_CANDIDATES {
            return false;
        }

        let head_square = self.grid.square(head.cell);
        candidates
            .iter()
            .filter(|segment| segment.id != head.id)
            .any(|segment| self.grid.square(segment.cell).contains_square(&head_square))
    }

    pub fn within_board(&self, board: &impl BoardGeometry, head: Cell) -> bool {
        board
            .boundary_polygon()
            .contains_square(&self.grid.square(head))
    }
}
