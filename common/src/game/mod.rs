mod board;
mod body;
mod collision;
mod food;
mod game_loop;
mod host;
mod session;
mod session_rng;
mod settings;
mod spatial_index;
mod types;

pub use board::{BoardGeometry, PolygonBoard};
pub use body::{Segment, SegmentId, SnakeBody};
pub use collision::CollisionDetector;
pub use food::{FoodMode, FoodPlacer};
pub use game_loop::{GameLoop, Layers};
pub use host::{RenderSurface, SharedTaskHost, TaskHost};
pub use session::{FoodChange, GameSession, StepReport, INITIAL_SNAKE_LENGTH};
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use spatial_index::SpatialIndex;
pub use types::{Direction, GameOutcome, GameReport, InputEvent, LossReason, SessionState};
