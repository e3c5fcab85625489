use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    /// `(col, row)` offset of one step; rows grow upward.
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    DirectionRequested(Direction),
    PauseToggled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossReason {
    SelfBite,
    BoundaryExit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Lost(LossReason),
    TimedOut,
    Cancelled,
    /// Food could not be placed. With prepared food the snake covers every
    /// candidate. With dynamic food the sampling budget ran out, which can
    /// also happen on a board that still has free cells.
    BoardFilled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Starting,
    Running,
    Paused,
    Finished(GameOutcome),
}

impl SessionState {
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionState::Finished(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameReport {
    pub outcome: GameOutcome,
    pub ticks: u64,
    pub snake_length: usize,
    pub food_eaten: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Right.is_opposite(&Direction::Right));
    }

    #[test]
    fn test_opposite_deltas_cancel() {
        for (a, b) in [(Direction::Up, Direction::Down), (Direction::Left, Direction::Right)] {
            let (ac, ar) = a.delta();
            let (bc, br) = b.delta();
            assert_eq!((ac + bc, ar + br), (0, 0));
        }
    }
}
