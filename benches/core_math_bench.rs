use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use stackplot::core::{
    AxisOrientation, AxisTransform, Layer, LineStyle, Sample, Series, Viewport,
};
use stackplot::summary::{Bucketing, PercentileSpec, compute_summary};
use stackplot::{Graph, GraphView};

fn sine_series(count: usize) -> Arc<Series> {
    let samples = (0..count)
        .map(|i| {
            let x = i as f64;
            Sample::new(x, (x * 0.01).sin() * 100.0 + x * 0.002)
        })
        .collect();
    Arc::new(Series::new("bench", samples).expect("valid generated series"))
}

fn bench_transform_round_trip(c: &mut Criterion) {
    let axis = AxisTransform::new(0.0, 10_000.0, 1_920.0, AxisOrientation::Horizontal)
        .expect("axis init");

    c.bench_function("transform_round_trip", |b| {
        b.iter(|| {
            let px = axis.to_screen(black_box(4_321.123));
            let _ = axis.to_data(black_box(px));
        })
    });
}

fn bench_line_projection_10k(c: &mut Criterion) {
    let series = sine_series(10_000);
    let layer = Layer::line(series, LineStyle::default());

    let mut x = AxisTransform::new(0.0, 10_000.0, 1_920.0, AxisOrientation::Horizontal)
        .expect("x axis");
    x.set_view(2_000.0, 8_000.0);
    let y = AxisTransform::new(-110.0, 130.0, 400.0, AxisOrientation::Vertical).expect("y axis");
    let viewport = Viewport::new(x, y);

    c.bench_function("line_projection_10k", |b| {
        b.iter(|| {
            let _ = layer.primitives(black_box(&viewport));
        })
    });
}

fn bench_summary_10k(c: &mut Criterion) {
    let series = sine_series(10_000);
    let bucketing = Bucketing::FixedWidth {
        width: 100.0,
        origin: 0.0,
    };
    let spec = PercentileSpec::default();

    c.bench_function("summary_10k", |b| {
        b.iter(|| {
            let _ = compute_summary(black_box(&series), black_box(bucketing), black_box(&spec))
                .expect("summary should succeed");
        })
    });
}

fn bench_full_view_render_4_graphs(c: &mut Criterion) {
    let mut view = GraphView::new("bench");
    for i in 0..4 {
        let mut graph = Graph::new(format!("graph-{i}"));
        graph.add_layer(Layer::line(sine_series(5_000), LineStyle::default()));
        view.add_graph(format!("graph-{i}"), graph).expect("add graph");
    }
    view.set_x_view(1_000.0, 4_000.0);

    c.bench_function("full_view_render_4_graphs", |b| {
        b.iter(|| {
            let _ = view.render().expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_transform_round_trip,
    bench_line_projection_10k,
    bench_summary_10k,
    bench_full_view_render_4_graphs
);
criterion_main!(benches);
