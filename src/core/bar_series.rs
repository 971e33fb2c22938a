use serde::{Deserialize, Serialize};

use crate::core::{CoordinateMapper, SeriesPoint};

/// Deterministic bar rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
}

/// Projects one column per windowed sample.
///
/// Columns split the plot width evenly (`width / count`) and keep a one pixel
/// gap on the right. Bar height is proportional to `value - axis_min`.
#[must_use]
pub fn project_bars<P: SeriesPoint>(points: &[P], mapper: &CoordinateMapper) -> Vec<BarGeometry> {
    if points.is_empty() {
        return Vec::new();
    }

    let area = mapper.area();
    let column_width = area.width / points.len() as f64;
    let bar_width = (column_width - 1.0).max(0.0);
    let bottom = mapper.baseline_y();

    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let height = mapper.y_extent_above_min(point.y()).max(0.0);
            BarGeometry {
                left: area.left + index as f64 * column_width,
                top: bottom - height,
                width: bar_width,
                height,
                value: point.y(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::project_bars;
    use crate::core::{AxisRange, CoordinateMapper, DataPoint, PlotArea};

    #[test]
    fn bars_share_width_and_grow_from_axis_min() {
        let mapper = CoordinateMapper::new(
            AxisRange::new(0.0, 2.0),
            AxisRange::new(10.0, 20.0),
            PlotArea::new(5.0, 0.0, 100.0, 50.0),
        )
        .expect("mapper");
        let bars = project_bars(
            &[
                DataPoint::new(0.0, 10.0),
                DataPoint::new(1.0, 15.0),
                DataPoint::new(2.0, 20.0),
                DataPoint::new(3.0, 12.0),
            ],
            &mapper,
        );

        assert_eq!(bars.len(), 4);
        assert_eq!(bars[1].left, 30.0);
        assert_eq!(bars[1].width, 24.0);
        assert_eq!(bars[0].height, 0.0);
        assert_eq!(bars[1].height, 25.0);
        assert_eq!(bars[2].top, 0.0);
    }
}
