use std::collections::HashSet;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use viper_common::game::{BoardGeometry, CollisionDetector, RenderSurface};
use viper_common::geometry::{Cell, Grid};

const EMPTY: char = '.';
const OUTSIDE: char = ' ';
const SNAKE: char = 'o';
const FOOD: char = '*';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Snake,
    Food,
}

#[derive(Default)]
struct CanvasState {
    snake: HashSet<Cell>,
    food: HashSet<Cell>,
    dirty: bool,
}

impl CanvasState {
    fn layer_mut(&mut self, layer: Layer) -> &mut HashSet<Cell> {
        match layer {
            Layer::Snake => &mut self.snake,
            Layer::Food => &mut self.food,
        }
    }
}

/// Character grid covering the board's bounding box. Both layers draw into
/// one shared frame; a redraw prints it only if something changed.
#[derive(Clone)]
pub struct TextCanvas {
    state: Arc<Mutex<CanvasState>>,
    min: Cell,
    max: Cell,
    playable: Arc<HashSet<Cell>>,
}

impl TextCanvas {
    pub fn new(board: &impl BoardGeometry, grid: Grid) -> Self {
        let bbox = board.bounding_box();
        let min = grid.cell_containing(bbox.min);
        let max = grid.cell_containing(bbox.max);

        let detector = CollisionDetector::new(grid);
        let playable = (min.col..=max.col)
            .flat_map(|col| (min.row..=max.row).map(move |row| Cell::new(col, row)))
            .filter(|cell| detector.within_board(board, *cell))
            .collect();

        Self {
            state: Arc::new(Mutex::new(CanvasState::default())),
            min,
            max,
            playable: Arc::new(playable),
        }
    }

    pub fn layer(&self, layer: Layer) -> LayerSurface {
        LayerSurface {
            canvas: self.clone(),
            layer,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CanvasState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Top row first, rows grow upward on the board.
    pub fn render(&self) -> String {
        let state = self.lock();
        let mut frame = String::new();
        for row in (self.min.row..=self.max.row).rev() {
            for col in self.min.col..=self.max.col {
                let cell = Cell::new(col, row);
                let symbol = if state.snake.contains(&cell) {
                    SNAKE
                } else if state.food.contains(&cell) {
                    FOOD
                } else if self.playable.contains(&cell) {
                    EMPTY
                } else {
                    OUTSIDE
                };
                frame.push(symbol);
            }
            frame.push('\n');
        }
        frame
    }

    fn take_dirty(&self) -> bool {
        std::mem::take(&mut self.lock().dirty)
    }
}

pub struct LayerSurface {
    canvas: TextCanvas,
    layer: Layer,
}

impl RenderSurface for LayerSurface {
    fn add(&mut self, cells: &[Cell]) {
        let mut state = self.canvas.lock();
        state.layer_mut(self.layer).extend(cells.iter().copied());
        state.dirty = true;
    }

    fn remove(&mut self, cells: &[Cell]) {
        let mut state = self.canvas.lock();
        let layer = state.layer_mut(self.layer);
        for cell in cells {
            layer.remove(cell);
        }
        state.dirty = true;
    }

    fn clear(&mut self) {
        let mut state = self.canvas.lock();
        state.layer_mut(self.layer).clear();
        state.dirty = true;
    }

    fn request_redraw(&mut self) {
        if !self.canvas.take_dirty() {
            return;
        }
        let frame = self.canvas.render();
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", frame);
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viper_common::game::PolygonBoard;
    use viper_common::geometry::{Point, Polygon};

    fn square_board() -> (PolygonBoard, Grid) {
        let board = PolygonBoard::rectangle(Point::new(0.0, 0.0), 100.0, 100.0).unwrap();
        let grid = Grid::new(board.center(), 25.0);
        (board, grid)
    }

    #[test]
    fn test_empty_square_board_is_all_playable() {
        let (board, grid) = square_board();
        let canvas = TextCanvas::new(&board, grid);

        // the max corner lands in the row and column just past the board
        let frame = canvas.render();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "     ");
        assert_eq!(lines[1], ".... ");
        assert_eq!(lines[4], ".... ");
    }

    #[test]
    fn test_layers_draw_into_the_same_frame() {
        let (board, grid) = square_board();
        let canvas = TextCanvas::new(&board, grid);
        let mut snake = canvas.layer(Layer::Snake);
        let mut food = canvas.layer(Layer::Food);

        snake.add(&[Cell::new(-2, 0), Cell::new(-1, 0)]);
        food.add(&[Cell::new(1, 1)]);

        let lines: Vec<String> = canvas.render().lines().map(str::to_string).collect();
        assert_eq!(lines[1], "...* ");
        assert_eq!(lines[2], "oo.. ");

        snake.remove(&[Cell::new(-2, 0)]);
        food.clear();
        let lines: Vec<String> = canvas.render().lines().map(str::to_string).collect();
        assert_eq!(lines[1], ".... ");
        assert_eq!(lines[2], ".o.. ");
    }

    #[test]
    fn test_redraw_consumes_changes_once() {
        let (board, grid) = square_board();
        let canvas = TextCanvas::new(&board, grid);
        let mut snake = canvas.layer(Layer::Snake);

        snake.add(&[Cell::new(0, 0)]);
        assert!(canvas.take_dirty());
        assert!(!canvas.take_dirty());
    }

    #[test]
    fn test_cells_outside_a_triangle_are_blank() {
        let polygon = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 0.0),
        ])
        .unwrap();
        let board = PolygonBoard::with_center(polygon, Point::new(0.0, 0.0));
        let canvas = TextCanvas::new(&board, Grid::new(board.center(), 25.0));

        let lines: Vec<String> = canvas.render().lines().map(str::to_string).collect();
        // bottom row touches the hypotenuse only at its far end
        assert_eq!(lines.last().map(String::as_str), Some("...  "));
        assert_eq!(lines[1], "     ");
    }
}
