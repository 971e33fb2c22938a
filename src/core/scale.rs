use serde::{Deserialize, Serialize};

use crate::core::AxisRange;
use crate::error::{ChartError, ChartResult};

/// Maps `value` from `[domain_min, domain_max]` onto `[0, pixel_extent]`.
///
/// Callers guarantee `domain_max != domain_min` (see `AxisRange::corrected`).
#[must_use]
pub fn map_to_extent(value: f64, domain_min: f64, domain_max: f64, pixel_extent: f64) -> f64 {
    pixel_extent * (value - domain_min) / (domain_max - domain_min)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    pub fn from_range(range: AxisRange) -> ChartResult<Self> {
        Self::new(range.min, range.max)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn domain_to_extent(self, value: f64, extent_px: f64) -> f64 {
        map_to_extent(value, self.domain_start, self.domain_end, extent_px)
    }

    #[must_use]
    pub fn extent_to_domain(self, offset_px: f64, extent_px: f64) -> f64 {
        if extent_px == 0.0 {
            return self.domain_start;
        }
        let span = self.domain_end - self.domain_start;
        self.domain_start + (offset_px / extent_px) * span
    }
}

/// Pixel rectangle that one axis' series are drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }
}

/// Data-space to pixel-space mapping for one plot area.
///
/// X grows rightwards from `area.left`; Y is inverted so larger values sit
/// closer to `area.top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    x_scale: LinearScale,
    y_scale: LinearScale,
    area: PlotArea,
}

impl CoordinateMapper {
    pub fn new(x_range: AxisRange, y_range: AxisRange, area: PlotArea) -> ChartResult<Self> {
        if !area.left.is_finite()
            || !area.top.is_finite()
            || !area.width.is_finite()
            || !area.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "plot area must be finite".to_owned(),
            ));
        }
        Ok(Self {
            x_scale: LinearScale::from_range(x_range)?,
            y_scale: LinearScale::from_range(y_range)?,
            area,
        })
    }

    #[must_use]
    pub fn area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn x_range(&self) -> AxisRange {
        let (min, max) = self.x_scale.domain();
        AxisRange::new(min, max)
    }

    #[must_use]
    pub fn y_range(&self) -> AxisRange {
        let (min, max) = self.y_scale.domain();
        AxisRange::new(min, max)
    }

    #[must_use]
    pub fn x_to_pixel(&self, x: f64) -> f64 {
        self.area.left + self.x_scale.domain_to_extent(x, self.area.width)
    }

    #[must_use]
    pub fn y_to_pixel(&self, y: f64) -> f64 {
        self.area.bottom() - self.y_scale.domain_to_extent(y, self.area.height)
    }

    /// Height in pixels that `value - y_min` occupies.
    #[must_use]
    pub fn y_extent_above_min(&self, y: f64) -> f64 {
        self.y_scale.domain_to_extent(y, self.area.height)
    }

    #[must_use]
    pub fn pixel_to_x(&self, pixel: f64) -> f64 {
        self.x_scale
            .extent_to_domain(pixel - self.area.left, self.area.width)
    }

    /// Y pixel of the axis baseline (the bottom of the plot area).
    #[must_use]
    pub fn baseline_y(&self) -> f64 {
        self.area.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::{CoordinateMapper, LinearScale, PlotArea, map_to_extent};
    use crate::core::AxisRange;

    #[test]
    fn map_to_extent_is_linear() {
        assert_eq!(map_to_extent(5.0, 0.0, 10.0, 200.0), 100.0);
        assert_eq!(map_to_extent(0.0, 0.0, 10.0, 200.0), 0.0);
        assert_eq!(map_to_extent(10.0, 0.0, 10.0, 200.0), 200.0);
    }

    #[test]
    fn linear_scale_rejects_zero_span() {
        assert!(LinearScale::new(3.0, 3.0).is_err());
        assert!(LinearScale::new(f64::NAN, 3.0).is_err());
    }

    #[test]
    fn mapper_inverts_y_and_offsets_by_area() {
        let mapper = CoordinateMapper::new(
            AxisRange::new(0.0, 10.0),
            AxisRange::new(0.0, 100.0),
            PlotArea::new(20.0, 10.0, 100.0, 50.0),
        )
        .expect("mapper");

        assert_eq!(mapper.x_to_pixel(0.0), 20.0);
        assert_eq!(mapper.x_to_pixel(10.0), 120.0);
        assert_eq!(mapper.y_to_pixel(0.0), 60.0);
        assert_eq!(mapper.y_to_pixel(100.0), 10.0);
        assert_eq!(mapper.baseline_y(), 60.0);
        assert!((mapper.pixel_to_x(70.0) - 5.0).abs() <= 1e-12);
    }
}
