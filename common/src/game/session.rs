use crate::config::Validate;
use crate::error::GameError;
use crate::geometry::{Cell, Grid};
use crate::log;
use super::board::BoardGeometry;
use super::body::SnakeBody;
use super::collision::CollisionDetector;
use super::food::FoodPlacer;
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::types::{Direction, GameOutcome, GameReport, InputEvent, LossReason, SessionState};

pub const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoodChange {
    pub eaten: Option<Cell>,
    pub placed: Option<Cell>,
}

/// What one tick changed, for the render layers and the host.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    pub new_head: Cell,
    pub removed_tail: Option<Cell>,
    pub food: Option<FoodChange>,
    pub progress: Option<f64>,
    pub outcome: Option<GameOutcome>,
}

pub struct GameSession<B: BoardGeometry> {
    board: B,
    detector: CollisionDetector,
    body: SnakeBody,
    food: FoodPlacer,
    rng: SessionRng,
    direction: Direction,
    paused: bool,
    direction_locked: bool,
    ticks: u64,
    total_ticks: Option<u64>,
    food_eaten: u64,
    state: SessionState,
}

impl<B: BoardGeometry> GameSession<B> {
    /// Seeds from `settings.seed`, or randomly when absent.
    pub fn new(board: B, settings: &GameSettings) -> Result<Self, GameError> {
        let rng = settings
            .seed
            .map(SessionRng::new)
            .unwrap_or_else(SessionRng::from_random);
        Self::with_rng(board, settings, rng)
    }

    pub fn with_rng(board: B, settings: &GameSettings, rng: SessionRng) -> Result<Self, GameError> {
        settings
            .validate()
            .map_err(GameError::InvalidConfiguration)?;

        let grid = Grid::new(board.center(), settings.snake_width);
        let food = if settings.prepare_food {
            FoodPlacer::prepared(&board, grid)
        } else {
            FoodPlacer::dynamic(grid, settings.max_food_attempts)
        };

        let length = INITIAL_SNAKE_LENGTH as i64;
        let body = SnakeBody::from_cells((1..=length).map(|i| Cell::new(i - length, 0)));

        Ok(Self {
            board,
            detector: CollisionDetector::new(grid),
            body,
            food,
            rng,
            direction: Direction::Right,
            paused: false,
            direction_locked: false,
            ticks: 0,
            total_ticks: settings.total_ticks(),
            food_eaten: 0,
            state: SessionState::Starting,
        })
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn body(&self) -> &SnakeBody {
        &self.body
    }

    pub fn food(&self) -> Option<Cell> {
        self.food.current()
    }

    pub fn food_placer(&self) -> &FoodPlacer {
        &self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_direction_locked(&self) -> bool {
        self.direction_locked
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn total_ticks(&self) -> Option<u64> {
        self.total_ticks
    }

    pub fn food_eaten(&self) -> u64 {
        self.food_eaten
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Places the first food and enters `Running` (or `Paused`, if a pause
    /// was toggled before the start). Returns the food cell, or `None` when
    /// the board has no room, which ends the session as `BoardFilled`.
    pub fn start(&mut self) -> Result<Option<Cell>, GameError> {
        if self.state != SessionState::Starting {
            return Ok(self.food.current());
        }

        log!(
            "Session started: seed {}, {} segments, time limit {}",
            self.rng.seed(),
            self.body.len(),
            self.total_ticks
                .map(|t| format!("{} ticks", t))
                .unwrap_or_else(|| "N/A".to_string())
        );

        match self.food.place(&self.board, &self.body, &mut self.rng) {
            Ok(cell) => {
                self.state = if self.paused {
                    SessionState::Paused
                } else {
                    SessionState::Running
                };
                Ok(Some(cell))
            }
            Err(GameError::NoAvailableCell) => {
                self.finish(GameOutcome::BoardFilled);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Accepts at most one change per tick and never a reversal. Accepting
    /// the current direction still takes the lock.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.state.is_finished()
            || self.direction_locked
            || direction.is_opposite(&self.direction)
        {
            return false;
        }

        if direction != self.direction {
            log!("Direction {:?} -> {:?}", self.direction, direction);
        }
        self.direction = direction;
        self.direction_locked = true;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.state.is_finished() {
            return self.paused;
        }

        self.paused = !self.paused;
        self.state = match self.state {
            SessionState::Running if self.paused => SessionState::Paused,
            SessionState::Paused if !self.paused => SessionState::Running,
            other => other,
        };
        log!("Game {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::DirectionRequested(direction) => {
                self.request_direction(direction);
            }
            InputEvent::PauseToggled => {
                self.toggle_pause();
            }
        }
    }

    /// Advances one tick. Returns `None` unless the session is `Running`.
    pub fn step(&mut self) -> Result<Option<StepReport>, GameError> {
        if self.state != SessionState::Running {
            return Ok(None);
        }

        let head = self.body.head().ok_or(GameError::EmptyBody)?;
        let grows = self
            .food
            .current()
            .is_some_and(|food| self.detector.head_eats_food(&self.body, food));
        let new_head = head.neighbor(self.direction);

        let mut removed_tail = None;
        let mut food = None;
        let mut board_filled = false;

        if grows {
            let eaten = self.food.current();
            self.body.extend(new_head);
            self.food_eaten += 1;
            log!("Food eaten, length {}", self.body.len());

            let placed = match self.food.place(&self.board, &self.body, &mut self.rng) {
                Ok(cell) => Some(cell),
                Err(GameError::NoAvailableCell) => {
                    board_filled = true;
                    None
                }
                Err(e) => return Err(e),
            };
            food = Some(FoodChange { eaten, placed });
        } else {
            removed_tail = Some(self.body.move_to(new_head)?);
        }
        self.direction_locked = false;

        let mut outcome = if self.detector.self_collision(&self.body) {
            Some(GameOutcome::Lost(LossReason::SelfBite))
        } else if !self.detector.within_board(&self.board, new_head) {
            Some(GameOutcome::Lost(LossReason::BoundaryExit))
        } else {
            None
        };

        let mut progress = None;
        if outcome.is_none() {
            self.ticks += 1;
            if let Some(total) = self.total_ticks {
                progress = Some((self.ticks as f64 / total as f64 * 100.0).min(100.0));
            }

            if board_filled {
                outcome = Some(GameOutcome::BoardFilled);
            } else if self.total_ticks.is_some_and(|total| self.ticks >= total) {
                outcome = Some(GameOutcome::TimedOut);
            }
        }

        if let Some(outcome) = outcome {
            self.finish(outcome);
        }

        Ok(Some(StepReport {
            new_head,
            removed_tail,
            food,
            progress,
            outcome,
        }))
    }

    pub fn cancel(&mut self) {
        if !self.state.is_finished() {
            self.finish(GameOutcome::Cancelled);
        }
    }

    pub fn report(&self, outcome: GameOutcome) -> GameReport {
        GameReport {
            outcome,
            ticks: self.ticks,
            snake_length: self.body.len(),
            food_eaten: self.food_eaten,
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.state = SessionState::Finished(outcome);
        log!(
            "Game over: {:?} after {} ticks, length {}",
            outcome,
            self.ticks,
            self.body.len()
        );
    }

    #[cfg(test)]
    pub(crate) fn set_body(&mut self, cells: &[Cell]) {
        self.body = SnakeBody::from_cells(cells.iter().copied());
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, cell: Option<Cell>) {
        self.food.set_current(cell);
    }
}
