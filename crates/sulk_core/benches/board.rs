//! Board query benchmarks for sulk_core.
//!
//! Run with: `cargo bench -p sulk_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sulk_core::board::Board;
use sulk_core::coord::Coord;
use sulk_core::feature::Blocker;
use sulk_core::los::{has_line_of_sight, trace_line};

fn walled_board() -> Board {
    let mut board = Board::new(32, 32);
    for y in (4..28).step_by(6) {
        for x in 8..24 {
            board.add_feature(Coord::new(x, y), Blocker::WALL);
        }
    }
    board
}

/// Line of sight from one corner to every square on the board.
pub fn los_benchmark(c: &mut Criterion) {
    let board = walled_board();
    let origin = Coord::new(0, 0);
    let targets: Vec<Coord> = board.all_squares().map(|s| s.coord()).collect();

    c.bench_function("los_sweep_32x32", |b| {
        b.iter(|| {
            targets
                .iter()
                .filter(|t| has_line_of_sight(black_box(&board), origin, **t))
                .count()
        })
    });

    c.bench_function("trace_oblique_long", |b| {
        b.iter(|| trace_line(black_box(Coord::new(0, 3)), black_box(Coord::new(31, 17))))
    });
}

/// Cold versus cached neighbourhood lookups.
pub fn adjacency_benchmark(c: &mut Criterion) {
    c.bench_function("adjacents_cold", |b| {
        b.iter(|| {
            let board = Board::new(16, 16);
            board
                .all_squares()
                .map(|s| board.adjacents_of(s.coord()).len())
                .sum::<usize>()
        })
    });

    let board = Board::new(16, 16);
    c.bench_function("adjacents_cached", |b| {
        b.iter(|| {
            board
                .all_squares()
                .map(|s| board.adjacents_of(black_box(s.coord())).len())
                .sum::<usize>()
        })
    });
}

criterion_group!(benches, los_benchmark, adjacency_benchmark);
criterion_main!(benches);
