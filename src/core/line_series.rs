use serde::{Deserialize, Serialize};

use crate::core::{CoordinateMapper, SeriesPoint};

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Maps every windowed sample to its pixel vertex, in order.
#[must_use]
pub fn project_vertices<P: SeriesPoint>(points: &[P], mapper: &CoordinateMapper) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|point| (mapper.x_to_pixel(point.x()), mapper.y_to_pixel(point.y())))
        .collect()
}

/// Joins adjacent vertices. Fewer than two vertices yield no segment.
#[must_use]
pub fn segments_from_vertices(vertices: &[(f64, f64)]) -> Vec<LineSegment> {
    vertices
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        })
        .collect()
}

/// Closed polygon under the line: the vertices, then down to `baseline_y`
/// under the last vertex and back under the first one.
///
/// Returns an empty polygon for fewer than two vertices.
#[must_use]
pub fn fill_polygon(vertices: &[(f64, f64)], baseline_y: f64) -> Vec<(f64, f64)> {
    let (Some(first), Some(last)) = (vertices.first(), vertices.last()) else {
        return Vec::new();
    };
    if vertices.len() < 2 {
        return Vec::new();
    }

    let mut polygon = Vec::with_capacity(vertices.len() + 2);
    polygon.extend_from_slice(vertices);
    polygon.push((last.0, baseline_y));
    polygon.push((first.0, baseline_y));
    polygon
}
