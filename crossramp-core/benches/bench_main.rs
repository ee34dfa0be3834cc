use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crossramp_core::prelude::*;
use geo::Point;

const REGION: RegionId = RegionId(1);

fn builder(transitions: u32) -> RampBuilder {
    let mut builder = RampBuilder::new(REGION);
    for feature_id in 0..transitions {
        builder.add_transition(
            feature_id,
            0,
            feature_id % 5 == 0,
            feature_id % 2 == 0,
            Point::new(f64::from(feature_id), 0.0),
            Point::new(f64::from(feature_id), 1.0),
        );
    }
    builder
}

fn synthetic_cost(enter: &Segment, exit: &Segment) -> Option<f64> {
    let distance = enter.feature_id.abs_diff(exit.feature_id);
    (distance % 17 != 0).then(|| f64::from(distance) * 1.7)
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_weights");
    for transitions in [100, 500] {
        group.bench_with_input(
            BenchmarkId::from_parameter(transitions),
            &transitions,
            |b, &transitions| {
                b.iter_batched(
                    || builder(transitions),
                    |builder| black_box(builder.fill_weights(synthetic_cost)),
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_edges(c: &mut Criterion) {
    let ramp = builder(500).fill_weights(synthetic_cost);
    let enters = ramp.enters().to_vec();

    c.bench_function("outgoing_edges", |b| {
        let mut out = Vec::with_capacity(ramp.exits().len());
        b.iter(|| {
            for enter in &enters {
                out.clear();
                ramp.edges(black_box(enter), true, &mut out);
            }
            black_box(out.len())
        });
    });
}

criterion_group!(benches, bench_fill, bench_edges);
criterion_main!(benches);
