use crate::error::GameError;
use crate::geometry::{Cell, Grid};
use crate::log;
use super::board::BoardGeometry;
use super::body::SnakeBody;
use super::session_rng::SessionRng;

#[derive(Clone, Debug)]
pub enum FoodMode {
    /// Every grid cell on the board, computed once up front.
    Prepared(Vec<Cell>),
    /// Rejection sampling inside the bounding box, capped at `max_attempts`.
    Dynamic { max_attempts: u32 },
}

#[derive(Clone, Debug)]
pub struct FoodPlacer {
    grid: Grid,
    mode: FoodMode,
    current: Option<Cell>,
}

impl FoodPlacer {
    pub fn prepared(board: &impl BoardGeometry, grid: Grid) -> Self {
        let candidates = prepare_candidates(board, &grid);
        log!("Prepared {} food candidates", candidates.len());
        Self {
            grid,
            mode: FoodMode::Prepared(candidates),
            current: None,
        }
    }

    pub fn dynamic(grid: Grid, max_attempts: u32) -> Self {
        Self {
            grid,
            mode: FoodMode::Dynamic { max_attempts },
            current: None,
        }
    }

    pub fn current(&self) -> Option<Cell> {
        self.current
    }

    pub fn mode(&self) -> &FoodMode {
        &self.mode
    }

    pub fn candidates(&self) -> Option<&[Cell]> {
        match &self.mode {
            FoodMode::Prepared(candidates) => Some(candidates),
            FoodMode::Dynamic { .. } => None,
        }
    }

    /// Picks a new food cell off the snake. On failure the board is left
    /// without food.
    pub fn place(
        &mut self,
        board: &impl BoardGeometry,
        body: &SnakeBody,
        rng: &mut SessionRng,
    ) -> Result<Cell, GameError> {
        let placed = match &self.mode {
            FoodMode::Prepared(candidates) => {
                let free: Vec<Cell> = candidates
                    .iter()
                    .copied()
                    .filter(|cell| !body.contains(*cell))
                    .collect();
                let picked = rng.pick(&free).copied();
                if picked.is_none() {
                    log!("All {} food candidates are under the snake", candidates.len());
                }
                picked.ok_or(GameError::NoAvailableCell)
            }
            FoodMode::Dynamic { max_attempts } => self.sample(board, body, rng, *max_attempts),
        };

        self.current = placed.as_ref().ok().copied();
        let cell = placed?;
        log!("Food placed at ({}, {})", cell.col, cell.row);
        Ok(cell)
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, cell: Option<Cell>) {
        self.current = cell;
    }

    fn sample(
        &self,
        board: &impl BoardGeometry,
        body: &SnakeBody,
        rng: &mut SessionRng,
        max_attempts: u32,
    ) -> Result<Cell, GameError> {
        let bbox = board.bounding_box();
        let polygon = board.boundary_polygon();

        for _ in 0..max_attempts {
            let cell = self.grid.cell_containing(rng.point_in(&bbox));
            if Some(cell) == self.current || body.contains(cell) {
                continue;
            }
            if polygon.contains_square(&self.grid.square(cell)) {
                return Ok(cell);
            }
        }

        log!(
            "Gave up placing food after {} attempts, free cells may remain",
            max_attempts
        );
        Err(GameError::NoAvailableCell)
    }
}

/// Walks outward from the center along both axes one cell at a time and keeps
/// the cells whose anchor corner touches the board.
fn prepare_candidates(board: &impl BoardGeometry, grid: &Grid) -> Vec<Cell> {
    let bbox = board.bounding_box();
    let center = grid.origin();
    let width = grid.width();

    let right = ((bbox.max.x - center.x) / width).floor() as i64;
    let left = ((center.x - bbox.min.x) / width).floor() as i64;
    let up = ((bbox.max.y - center.y) / width).floor() as i64;
    let down = ((center.y - bbox.min.y) / width).floor() as i64;

    let cols: Vec<i64> = (1..right).chain((0..=left).map(|c| -c)).collect();
    let rows: Vec<i64> = (1..up).chain((0..=down).map(|r| -r)).collect();

    let polygon = board.boundary_polygon();
    cols.iter()
        .flat_map(|col| rows.iter().map(move |row| Cell::new(*col, *row)))
        .filter(|cell| polygon.intersects_point(grid.anchor(*cell)))
        .collect()
}
