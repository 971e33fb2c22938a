use crate::core::SeriesPoint;

/// Returns the contiguous index range of `points` relevant to the viewport
/// `[start, start + size]`, padded with one point on each side.
///
/// `size == 0` selects everything. Otherwise the range starts at the last
/// point with `x < start` (or at the first point when none precedes the
/// window), covers every point with `x <= start + size`, and ends with one
/// extra point past that bound when it exists.
///
/// This is a single forward scan, proportional to the points visited.
#[must_use]
pub fn window_bounds_linear<P: SeriesPoint>(
    points: &[P],
    start: f64,
    size: f64,
) -> std::ops::Range<usize> {
    if size == 0.0 || points.is_empty() {
        return 0..points.len();
    }

    let end = start + size;
    let mut first = 0;
    for (index, point) in points.iter().enumerate() {
        let x = point.x();
        if x < start {
            first = index;
            continue;
        }
        if x > end {
            return first..index + 1;
        }
    }
    first..points.len()
}

/// Binary-search form of [`window_bounds_linear`]; observably identical.
#[must_use]
pub fn window_bounds<P: SeriesPoint>(points: &[P], start: f64, size: f64) -> std::ops::Range<usize> {
    if size == 0.0 || points.is_empty() {
        return 0..points.len();
    }

    let end = start + size;
    let first_in_window = points.partition_point(|point| point.x() < start);
    let first = first_in_window.saturating_sub(1);
    let first_past_end = points.partition_point(|point| point.x() <= end);
    let last_exclusive = (first_past_end + 1).min(points.len());
    first..last_exclusive.max(first)
}

/// Windowed slice of `points` (see [`window_bounds`]).
#[must_use]
pub fn windowed_slice<P: SeriesPoint>(points: &[P], start: f64, size: f64) -> &[P] {
    &points[window_bounds(points, start, size)]
}

/// `(min(y_low), max(y_high))` over a windowed slice, `None` when empty.
#[must_use]
pub fn y_extent<P: SeriesPoint>(points: &[P]) -> Option<(f64, f64)> {
    let mut iter = points.iter();
    let first = iter.next()?;
    let init = (first.y_low(), first.y_high());
    Some(iter.fold(init, |(min, max), point| {
        (min.min(point.y_low()), max.max(point.y_high()))
    }))
}

#[cfg(test)]
mod tests {
    use super::{window_bounds, window_bounds_linear, windowed_slice, y_extent};
    use crate::core::DataPoint;

    fn xs(points: &[DataPoint]) -> Vec<f64> {
        points.iter().map(|point| point.x).collect()
    }

    fn sample() -> Vec<DataPoint> {
        (0..10).map(|i| DataPoint::new(i as f64, i as f64)).collect()
    }

    #[test]
    fn zero_size_returns_everything() {
        let points = sample();
        assert_eq!(windowed_slice(&points, 3.0, 0.0).len(), 10);
    }

    #[test]
    fn window_keeps_one_neighbor_on_each_side() {
        let points = sample();
        let window = windowed_slice(&points, 3.5, 2.0);
        assert_eq!(xs(window), vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn window_on_exact_edges_keeps_neighbors() {
        let points = sample();
        let window = windowed_slice(&points, 3.0, 2.0);
        assert_eq!(xs(window), vec![2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn window_before_data_starts_at_first_point() {
        let points = sample();
        let window = windowed_slice(&points, -20.0, 5.0);
        assert_eq!(xs(window), vec![0.0]);
    }

    #[test]
    fn window_after_data_keeps_last_point() {
        let points = sample();
        let window = windowed_slice(&points, 50.0, 5.0);
        assert_eq!(xs(window), vec![9.0]);
    }

    #[test]
    fn duplicate_x_values_match_linear_scan() {
        let points = vec![
            DataPoint::new(0.0, 0.0),
            DataPoint::new(1.0, 1.0),
            DataPoint::new(1.0, 2.0),
            DataPoint::new(2.0, 3.0),
            DataPoint::new(2.0, 4.0),
            DataPoint::new(3.0, 5.0),
        ];
        for (start, size) in [(1.0, 0.5), (0.5, 1.0), (1.5, 0.2), (2.0, 1.0), (-1.0, 0.5)] {
            assert_eq!(
                window_bounds(&points, start, size),
                window_bounds_linear(&points, start, size),
                "start={start} size={size}"
            );
        }
    }

    #[test]
    fn y_extent_is_none_for_empty_slice() {
        assert_eq!(y_extent::<DataPoint>(&[]), None);
        assert_eq!(
            y_extent(&[DataPoint::new(0.0, 2.0), DataPoint::new(1.0, -1.0)]),
            Some((-1.0, 2.0))
        );
    }
}
