use graph_view::ChartError;
use graph_view::core::{CandlePoint, DataPoint, DataSeries, Viewport};
use graph_view::api::{ChartStyle, PlotSeries, Series};

fn three_points() -> DataSeries<DataPoint> {
    DataSeries::new(vec![
        DataPoint::new(0.0, 1.0),
        DataPoint::new(1.0, 3.0),
        DataPoint::new(2.0, 2.0),
    ])
    .expect("ordered series")
}

fn xy(series: &DataSeries<DataPoint>) -> Vec<(f64, f64)> {
    series
        .snapshot()
        .iter()
        .map(|point| (point.x, point.y))
        .collect()
}

#[test]
fn unconstrained_window_returns_everything_and_y_range() {
    let series = three_points();
    let window = series.windowed_values(0.0, 0.0);
    assert_eq!(window.len(), 3);
    assert_eq!(series.y_extent(0.0, 0.0), Some((1.0, 3.0)));
}

#[test]
fn window_keeps_one_boundary_point_each_side() {
    let series = three_points();
    let window = series.windowed_values(0.5, 1.0);
    let xs: Vec<f64> = window.iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    assert_eq!(window.offset(), 0);

    let long = DataSeries::new((0..10).map(|i| DataPoint::new(f64::from(i), 0.0)).collect())
        .expect("ordered");
    let window = long.windowed_values(3.5, 2.0);
    let xs: Vec<f64> = window.iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![3.0, 4.0, 5.0, 6.0]);
    assert_eq!(window.offset(), 3);
}

#[test]
fn out_of_order_append_fails_without_mutation() {
    let series = three_points();
    let err = series
        .append(DataPoint::new(1.0, 9.0), false, None)
        .expect_err("x=1 after x=2");
    assert_eq!(
        err,
        ChartError::Ordering {
            previous_x: 2.0,
            offending_x: 1.0,
        }
    );
    assert_eq!(xy(&series), vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)]);
}

#[test]
fn append_at_capacity_drops_oldest_point() {
    let series = three_points();
    series
        .append(DataPoint::new(3.0, 5.0), false, Some(3))
        .expect("append");
    assert_eq!(xy(&series), vec![(1.0, 3.0), (2.0, 2.0), (3.0, 5.0)]);
}

#[test]
fn reset_validates_order_before_replacing() {
    let series = three_points();
    let err = series
        .reset(vec![DataPoint::new(5.0, 1.0), DataPoint::new(4.0, 1.0)])
        .expect_err("descending replacement");
    assert!(matches!(err, ChartError::Ordering { .. }));
    assert_eq!(series.len(), 3);

    series
        .reset(vec![DataPoint::new(5.0, 1.0), DataPoint::new(6.0, 2.0)])
        .expect("reset");
    assert_eq!(series.x_extent(), Some((5.0, 6.0)));
}

#[test]
fn construction_rejects_unordered_or_non_finite_x() {
    assert!(matches!(
        DataSeries::new(vec![DataPoint::new(1.0, 0.0), DataPoint::new(0.0, 0.0)]),
        Err(ChartError::Ordering { .. })
    ));
    assert!(matches!(
        DataSeries::new(vec![DataPoint::new(f64::NAN, 0.0)]),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn non_finite_y_is_rejected_without_mutation() {
    let series = three_points();
    for y in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = series
            .append(DataPoint::new(3.0, y), false, None)
            .expect_err("non-finite y");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }
    assert_eq!(xy(&series), vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)]);

    let err = series
        .reset(vec![DataPoint::new(0.0, 1.0), DataPoint::new(1.0, f64::NAN)])
        .expect_err("non-finite y in reset");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(series.len(), 3);

    assert!(matches!(
        DataSeries::new(vec![DataPoint::new(0.0, f64::INFINITY)]),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn empty_window_has_no_y_extent() {
    let series: DataSeries<DataPoint> = DataSeries::empty();
    assert!(series.windowed_values(0.0, 10.0).is_empty());
    assert_eq!(series.min_y(0.0, 10.0), None);
    assert_eq!(series.max_y(0.0, 0.0), None);
}

#[test]
fn candle_extent_uses_low_and_high() {
    let series = DataSeries::new(vec![
        CandlePoint::new(0.0, 10.0, 12.0, 9.0, 11.0).expect("candle"),
        CandlePoint::new(1.0, 11.0, 15.0, 10.5, 14.0).expect("candle"),
    ])
    .expect("ordered");
    assert_eq!(series.min_y(0.0, 0.0), Some(9.0));
    assert_eq!(series.max_y(0.0, 0.0), Some(15.0));
}

#[test]
fn series_nearest_point_reports_absolute_index() {
    let series = Series::new(
        ChartStyle::Line,
        (0..10).map(|i| DataPoint::new(f64::from(i), f64::from(i) * 2.0)).collect(),
    )
    .expect("series");
    let viewport = Viewport {
        start: 5.0,
        size: 2.0,
    };
    let readout = series.nearest_point(viewport, 6.2).expect("readout");
    assert_eq!(readout.index, 6);
    assert_eq!(readout.y, 12.0);
    assert_eq!(readout.ohlc, None);
}
