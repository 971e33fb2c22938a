use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use graph_view::api::{
    AxisSlot, ChartConfig, ChartEngine, ChartStyle, LabelFormatter, PlotSeries, Series,
    SeriesRenderContext,
};
use graph_view::core::{AxisRange, CoordinateMapper, DataPoint, PlotArea, Viewport};
use graph_view::render::RecordingSurface;

#[test]
fn producer_thread_appends_while_engine_renders() {
    let series = Arc::new(Series::new(ChartStyle::Line, Vec::<DataPoint>::new()).expect("series"));
    let mut engine = ChartEngine::new(ChartConfig::default().with_scrollable(true)).expect("engine");
    engine
        .add_series(Arc::clone(&series), AxisSlot::Primary)
        .expect("add");

    let done = Arc::new(AtomicBool::new(false));
    let producer = {
        let series = Arc::clone(&series);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for i in 0..2_000 {
                series
                    .append_data(DataPoint::new(f64::from(i), f64::from(i % 13)), i % 10 == 0, Some(256))
                    .expect("ordered append");
            }
            done.store(true, Ordering::Release);
        })
    };

    let mut surface = RecordingSurface::new(640.0, 480.0);
    while !done.load(Ordering::Acquire) {
        surface.clear();
        engine.render(&mut surface, 640.0, 480.0).expect("render");

        let snapshot = series.data().snapshot();
        assert!(snapshot.len() <= 256);
        assert!(snapshot.windows(2).all(|pair| pair[0].x <= pair[1].x));
    }
    producer.join().expect("producer thread");

    engine.render(&mut surface, 640.0, 480.0).expect("final render");
    assert_eq!(series.data().len(), 256);
    assert_eq!(series.data().x_extent(), Some((1_744.0, 1_999.0)));
    assert!(!engine.needs_redraw());
}

#[test]
fn held_window_survives_concurrent_reset() {
    let series = Arc::new(
        Series::new(
            ChartStyle::Dot,
            (0..100).map(|i| DataPoint::new(f64::from(i), 1.0)).collect(),
        )
        .expect("series"),
    );
    let window = series.data().windowed_values(10.0, 5.0);

    let writer = {
        let series = Arc::clone(&series);
        thread::spawn(move || {
            series
                .reset_data(vec![DataPoint::new(500.0, 2.0)])
                .expect("reset");
        })
    };
    writer.join().expect("writer thread");

    let xs: Vec<f64> = window.iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
    assert_eq!(series.data().len(), 1);
}

#[test]
fn pinned_frame_ignores_appends_made_after_it_was_taken() {
    let series = Series::new(
        ChartStyle::Dot,
        vec![DataPoint::new(0.0, 1.0), DataPoint::new(1.0, 3.0), DataPoint::new(2.0, 2.0)],
    )
    .expect("series");
    let frame = series.frame(Viewport::unconstrained());

    series
        .append_data(DataPoint::new(3.0, 100.0), false, None)
        .expect("append");
    assert_eq!(series.len(), 4);
    assert_eq!(series.y_extent(Viewport::unconstrained()), Some((1.0, 100.0)));

    assert_eq!(frame.len(), 3);
    let (min, max) = frame.y_extent().expect("extent");
    assert_eq!((min, max), (1.0, 3.0));
    assert_eq!(frame.nearest_point(3.0).expect("readout").x, 2.0);

    let formatter = LabelFormatter::default();
    let area = PlotArea::new(0.0, 0.0, 100.0, 100.0);
    let context = SeriesRenderContext {
        mapper: CoordinateMapper::new(AxisRange::new(0.0, 2.0), AxisRange::new(min, max), area)
            .expect("mapper"),
        formatter: &formatter,
        text_size_px: 12.0,
    };
    let mut surface = RecordingSurface::new(100.0, 100.0);
    assert_eq!(frame.render(&mut surface, &context).expect("render"), 3);
    assert!(
        surface
            .frame()
            .circles()
            .all(|circle| (area.top..=area.bottom()).contains(&circle.center_y))
    );
}
