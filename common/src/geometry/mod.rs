mod grid;
mod polygon;
mod shapes;

pub use grid::{Cell, CellBounds, Grid};
pub use polygon::Polygon;
pub use shapes::{Point, Rect, Square};

/// Tolerance for on-boundary tests. Board coordinates are usually projected
/// metres, so an absolute value works well up to ~1e7.
pub const EPSILON: f64 = 1e-7;
