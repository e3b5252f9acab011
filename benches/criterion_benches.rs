#[macro_use]
extern crate criterion;

extern crate pukoban_solver;

use criterion::{Benchmark, Criterion};

use pukoban_solver::config::{CostMethod, Estimator};
use pukoban_solver::{LoadLevel, Solve};

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_around_corner(c: &mut Criterion) {
    bench_level(
        c,
        CostMethod::Combined,
        Estimator::Distance,
        "levels/custom/03-around-corner.txt",
        100,
    );
}

#[allow(unused)]
fn bench_around_corner_turns(c: &mut Criterion) {
    bench_level(
        c,
        CostMethod::Combined,
        Estimator::DistanceTurns { turn_penalty: 2 },
        "levels/custom/03-around-corner.txt",
        100,
    );
}

#[allow(unused)]
fn bench_two_boxes(c: &mut Criterion) {
    bench_level(
        c,
        CostMethod::Combined,
        Estimator::Distance,
        "levels/custom/05-two-boxes.txt",
        50,
    );
}

#[allow(unused)]
fn bench_two_boxes_uniform(c: &mut Criterion) {
    bench_level(
        c,
        CostMethod::PathOnly,
        Estimator::Distance,
        "levels/custom/05-two-boxes.txt",
        50,
    );
}

fn bench_level(
    c: &mut Criterion,
    method: CostMethod,
    estimator: Estimator,
    level_path: &str,
    samples: usize,
) {
    let level = level_path.load_level().unwrap();

    c.bench(
        &format!("{}-{}", method, estimator),
        Benchmark::new(level_path, move |b| {
            b.iter(|| {
                criterion::black_box(level.solve(
                    criterion::black_box(method),
                    criterion::black_box(estimator),
                    false,
                ))
            })
        })
        .sample_size(samples),
    );
}

criterion_group!(
    benches,
    bench_around_corner,
    bench_around_corner_turns,
    bench_two_boxes,
    //bench_two_boxes_uniform,
);
criterion_main!(benches);
