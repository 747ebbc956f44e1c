use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chart_shaping::config::{AggregateOp, ChartShape, TransformConfig};
use chart_shaping::execution::{ExecutionEngine, ExecutionOptions};
use chart_shaping::types::{RawDataset, Value};
use chart_shaping::transform;

fn dataset(rows: usize) -> RawDataset {
    let regions = ["north", "south", "east", "west", "central"];
    let channels = ["web", "retail", "partner"];
    RawDataset::from_records((0..rows).map(|i| {
        vec![
            ("order_id", Value::from(i as i64)),
            ("region", Value::from(regions[i % regions.len()])),
            ("channel", Value::from(channels[(i / 7) % channels.len()])),
            ("revenue", Value::from(((i * 31) % 997) as f64 / 10.0)),
            ("units", Value::from(((i * 7) % 13) as i64)),
        ]
    }))
}

fn bench_shapes(c: &mut Criterion) {
    let ds = dataset(50_000);
    let mut group = c.benchmark_group("transform_50k");
    for shape in [ChartShape::Bar, ChartShape::Funnel, ChartShape::Radar, ChartShape::Scatter] {
        let config = TransformConfig::for_shape(shape).with_op(AggregateOp::Sum);
        group.bench_with_input(BenchmarkId::from_parameter(shape), &config, |b, config| {
            b.iter(|| black_box(transform(black_box(&ds), config)))
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let ds = dataset(50_000);
    let shapes = [ChartShape::Bar, ChartShape::Line, ChartShape::Pie, ChartShape::Radar];
    let configs: Vec<TransformConfig> = shapes
        .into_iter()
        .flat_map(|shape| {
            [AggregateOp::Sum, AggregateOp::Avg]
                .into_iter()
                .map(move |op| TransformConfig::for_shape(shape).with_op(op))
        })
        .collect();
    let engine = ExecutionEngine::new(ExecutionOptions::default()).expect("thread pool");

    c.bench_function("transform_batch_8_configs", |b| {
        b.iter(|| black_box(engine.transform_batch(black_box(&ds), &configs)))
    });
}

criterion_group!(benches, bench_shapes, bench_batch);
criterion_main!(benches);
