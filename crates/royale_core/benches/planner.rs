//! Planner benchmarks for royale_core.
//!
//! Run with: `cargo bench -p royale_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use royale_core::prelude::{select_category, Planner, Side, StructureKind, TurnState, UnitKind};
use royale_test_utils::TurnBuilder;

/// A crowded mid-game turn: 24 sites, 40 units, knights near the queen.
fn crowded_turn() -> TurnState {
    let mut builder = TurnBuilder::new().gold(420).touching(3);

    for id in 0..24u32 {
        let x = 120 + (id as i32 % 6) * 320;
        let y = 100 + (id as i32 / 6) * 250;
        builder = match id % 4 {
            0 => builder.vacant(id, x, y),
            1 => builder.ours(id, x, y, StructureKind::Mine),
            2 => builder.our_barracks(id, x, y, UnitKind::Knight, (id % 3) as i32),
            _ => builder.theirs(id, x, y, StructureKind::Tower),
        };
    }

    builder
        .units(Side::Friendly, UnitKind::Knight, 12, 400, 500)
        .units(Side::Friendly, UnitKind::Archer, 8, 250, 450)
        .units(Side::Enemy, UnitKind::Knight, 16, 450, 520)
        .units(Side::Enemy, UnitKind::Giant, 4, 1500, 500)
        .build()
}

/// Runs planning benchmarks for the royale_core crate.
pub fn planner_benchmark(c: &mut Criterion) {
    let turn = crowded_turn();

    c.bench_function("plan_turn_24_sites_40_units", |b| {
        let mut planner = Planner::default();
        b.iter(|| black_box(planner.plan_turn(black_box(&turn))));
    });

    c.bench_function("select_category_5", |b| {
        let targets = [4, 1, 1, 2, 0];
        let levels = [7, 2, 1, 3, 9];
        b.iter(|| black_box(select_category(black_box(&targets), black_box(&levels))));
    });
}

criterion_group!(benches, planner_benchmark);
criterion_main!(benches);
