use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use viper_common::game::{FoodPlacer, PolygonBoard, SessionRng, SnakeBody};
use viper_common::geometry::{Cell, Grid, Point};

// 100 x 100 cells: the size of play area the prepared mode is expected to handle
fn create_board() -> (PolygonBoard, Grid) {
    let board = PolygonBoard::rectangle(Point::new(0.0, 0.0), 2500.0, 2500.0)
        .expect("valid board");
    let grid = Grid::new(Point::new(1250.0, 1250.0), 25.0);
    (board, grid)
}

fn create_long_snake(length: i64) -> SnakeBody {
    // boustrophedon over the lower rows so the body stays on the board
    SnakeBody::from_cells((0..length).map(|i| {
        let row = i / 100;
        let col = if row % 2 == 0 { i % 100 } else { 99 - i % 100 };
        Cell::new(col - 50, row - 50)
    }))
}

fn bench_prepare_candidates(c: &mut Criterion) {
    let (board, grid) = create_board();
    c.bench_function("prepare_food_candidates_100x100", |b| {
        b.iter(|| FoodPlacer::prepared(black_box(&board), grid))
    });
}

fn bench_prepared_placement(c: &mut Criterion) {
    let (board, grid) = create_board();
    let mut placer = FoodPlacer::prepared(&board, grid);
    let body = create_long_snake(5_000);
    let mut rng = SessionRng::new(42);
    c.bench_function("prepared_food_placement_half_full", |b| {
        b.iter(|| placer.place(&board, black_box(&body), &mut rng))
    });
}

fn bench_dynamic_placement(c: &mut Criterion) {
    let (board, grid) = create_board();
    let mut placer = FoodPlacer::dynamic(grid, 10_000);
    let body = create_long_snake(5_000);
    let mut rng = SessionRng::new(42);
    c.bench_function("dynamic_food_placement_half_full", |b| {
        b.iter(|| placer.place(&board, black_box(&body), &mut rng))
    });
}

criterion_group!(
    benches,
    bench_prepare_candidates,
    bench_prepared_placement,
    bench_dynamic_placement
);
criterion_main!(benches);
