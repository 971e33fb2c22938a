use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use graph_view::api::{AxisSlot, ChartConfig, ChartEngine, ChartStyle, Series};
use graph_view::core::{
    AxisRange, CandlePoint, CoordinateMapper, DataPoint, PlotArea, project_candles, window_bounds,
    window_bounds_linear,
};
use graph_view::render::RecordingSurface;
use std::hint::black_box;

fn generated_candles(count: u32) -> Vec<CandlePoint> {
    (0..count)
        .map(|i| {
            let t = f64::from(i);
            let base = 100.0 + t * 0.05;
            let open = base;
            let close = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
            let low = open.min(close) - 0.75;
            let high = open.max(close) + 0.75;
            CandlePoint::new(t, open, high, low, close).expect("valid generated candle")
        })
        .collect()
}

fn bench_windowed_query_100k(c: &mut Criterion) {
    let points: Vec<DataPoint> = (0..100_000)
        .map(|i| DataPoint::new(f64::from(i), f64::from(i % 97)))
        .collect();

    c.bench_function("window_bounds_binary_100k", |b| {
        b.iter(|| window_bounds(black_box(&points), black_box(75_000.5), black_box(500.0)))
    });
    c.bench_function("window_bounds_linear_100k", |b| {
        b.iter(|| window_bounds_linear(black_box(&points), black_box(75_000.5), black_box(500.0)))
    });
}

fn bench_candle_projection_10k(c: &mut Criterion) {
    let candles = generated_candles(10_000);
    let mapper = CoordinateMapper::new(
        AxisRange::new(0.0, 10_001.0),
        AxisRange::new(0.0, 2_500.0),
        PlotArea::new(0.0, 0.0, 1920.0, 1080.0),
    )
    .expect("valid mapper");

    c.bench_function("candle_projection_10k", |b| {
        b.iter(|| project_candles(black_box(&candles), black_box(&mapper)))
    });
}

fn bench_full_render_2k(c: &mut Criterion) {
    let mut engine = ChartEngine::new(ChartConfig::new("bench").with_scalable(true))
        .expect("engine init");
    let line = Series::new(
        ChartStyle::Line,
        (0..2_000)
            .map(|i| DataPoint::new(f64::from(i), f64::from(i % 50)))
            .collect(),
    )
    .expect("line series");
    let candles =
        Series::new(ChartStyle::candlestick(), generated_candles(2_000)).expect("candle series");
    engine
        .add_series(Arc::new(line), AxisSlot::Primary)
        .expect("add line");
    engine
        .add_series(Arc::new(candles), AxisSlot::Secondary)
        .expect("add candles");
    engine.set_viewport(500.0, 400.0).expect("viewport");

    let mut surface = RecordingSurface::new(1600.0, 900.0);
    c.bench_function("engine_full_render_2k", |b| {
        b.iter(|| {
            surface.clear();
            engine
                .render(&mut surface, black_box(1600.0), black_box(900.0))
                .expect("render should succeed")
        })
    });
}

criterion_group!(
    benches,
    bench_windowed_query_100k,
    bench_candle_projection_10k,
    bench_full_render_2k
);
criterion_main!(benches);
