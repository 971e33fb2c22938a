use serde::{Deserialize, Serialize};

use crate::core::{CoordinateMapper, SeriesPoint};

/// Marker circle for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

#[must_use]
pub fn project_dots<P: SeriesPoint>(
    points: &[P],
    mapper: &CoordinateMapper,
    radius: f64,
) -> Vec<DotGeometry> {
    points
        .iter()
        .map(|point| DotGeometry {
            center_x: mapper.x_to_pixel(point.x()),
            center_y: mapper.y_to_pixel(point.y()),
            radius,
        })
        .collect()
}
