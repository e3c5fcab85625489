use serde::{Deserialize, Serialize};

use crate::game::Direction;
use super::{Point, Square};

/// Integer grid coordinates relative to the board center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: i64,
    pub row: i64,
}

impl Cell {
    pub fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    pub fn neighbor(&self, direction: Direction) -> Cell {
        let (dc, dr) = direction.delta();
        Cell::new(self.col + dc, self.row + dr)
    }

    pub fn bounds(&self) -> CellBounds {
        CellBounds::new(*self, *self)
    }
}

/// Closed region covering the boxes of all cells from `min` to `max`
/// inclusive, in cell units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBounds {
    pub min: Cell,
    pub max: Cell,
}

impl CellBounds {
    pub fn new(a: Cell, b: Cell) -> Self {
        Self {
            min: Cell::new(a.col.min(b.col), a.row.min(b.row)),
            max: Cell::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }

    /// Whether the closed box of `cell` overlaps this region. Edge and corner
    /// contact count.
    pub fn overlaps(&self, cell: Cell) -> bool {
        cell.col >= self.min.col - 1
            && cell.col <= self.max.col + 1
            && cell.row >= self.min.row - 1
            && cell.row <= self.max.row + 1
    }

    /// Every cell position whose box overlaps this region.
    pub fn overlapping_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min.col - 1..=self.max.col + 1).flat_map(move |col| {
            (self.min.row - 1..=self.max.row + 1).map(move |row| Cell::new(col, row))
        })
    }

    pub fn overlapping_area(&self) -> u64 {
        let cols = (self.max.col - self.min.col + 3) as u64;
        let rows = (self.max.row - self.min.row + 3) as u64;
        cols * rows
    }
}

/// Maps cells to world-space squares of side `width`, with cell `(0, 0)`
/// anchored at `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    origin: Point,
    width: f64,
}

impl Grid {
    pub fn new(origin: Point, width: f64) -> Self {
        Self { origin, width }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn anchor(&self, cell: Cell) -> Point {
        Point::new(
            self.origin.x + cell.col as f64 * self.width,
            self.origin.y + cell.row as f64 * self.width,
        )
    }

    pub fn square(&self, cell: Cell) -> Square {
        Square::new(self.anchor(cell), self.width)
    }

    pub fn cell_containing(&self, point: Point) -> Cell {
        Cell::new(
            ((point.x - self.origin.x) / self.width).floor() as i64,
            ((point.y - self.origin.y) / self.width).floor() as i64,
        )
    }
}
