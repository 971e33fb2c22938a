use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Resolved `[min, max]` used for mapping and label generation on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Widens a zero-span range so downstream division stays defined.
    ///
    /// `[0, 0]` becomes `[0, 1]`; `[v, v]` becomes `[0.95 v, 1.05 v]` (ordered,
    /// so negative values still yield `min < max`). When that widening would
    /// leave the finite range, only the side towards zero moves. An inverted
    /// range is swapped back into order.
    #[must_use]
    pub fn corrected(self) -> Self {
        let (mut min, mut max) = (self.min, self.max);
        if max == min {
            (min, max) = widen_flat(max);
        }
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.max > self.min) || !self.min.is_finite() || !self.max.is_finite()
    }
}

fn widen_flat(value: f64) -> (f64, f64) {
    if value == 0.0 {
        return (0.0, 1.0);
    }
    let (low, high) = ordered(value * 0.95, value * 1.05);
    if low.is_finite() && high.is_finite() && low < high {
        return (low, high);
    }

    // Overflow next to f64::MAX, or no representable step next to zero.
    let pad = value.abs() * 0.05;
    let (low, high) = if value > 0.0 {
        (value - pad, value)
    } else {
        (value, value + pad)
    };
    if low < high {
        (low, high)
    } else {
        (value - 1.0, value + 1.0)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Manually pinned bounds for one y axis. Each side may be pinned on its own.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ManualAxisBounds {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl ManualAxisBounds {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub fn both(min: f64, max: f64) -> ChartResult<Self> {
        let bounds = Self {
            min: Some(min),
            max: Some(max),
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (side, value) in [("min", self.min), ("max", self.max)] {
            if let Some(value) = value
                && !value.is_finite()
            {
                return Err(ChartError::InvalidArgument(format!(
                    "manual axis {side} must be finite"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(ChartError::InvalidArgument(format!(
                "manual axis min {min} must be <= max {max}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

/// Resolves the effective range for an axis.
///
/// `auto` is the `(min, max)` reduction over the visible window of every
/// series on the axis, or `None` when the window holds no points. Pinned
/// sides win over auto values; the result is degenerate-corrected.
///
/// A single pinned side that reaches past the opposite auto value stays
/// where it is pinned, and the open side moves instead, by the width of the
/// flat-range widening of the pinned value.
#[must_use]
pub fn resolve_axis_range(manual: ManualAxisBounds, auto: Option<(f64, f64)>) -> AxisRange {
    let (auto_min, auto_max) = auto.unwrap_or((0.0, 0.0));
    match (manual.min, manual.max) {
        (Some(min), None) if min >= auto_max => {
            let flat = AxisRange::new(min, min).corrected();
            let max = if flat.max > min {
                flat.max
            } else {
                min + flat.span()
            };
            if max.is_finite() {
                AxisRange::new(min, max)
            } else {
                flat
            }
        }
        (None, Some(max)) if max <= auto_min => {
            let flat = AxisRange::new(max, max).corrected();
            let min = if flat.min < max {
                flat.min
            } else {
                max - flat.span()
            };
            if min.is_finite() {
                AxisRange::new(min, max)
            } else {
                flat
            }
        }
        (min, max) => {
            AxisRange::new(min.unwrap_or(auto_min), max.unwrap_or(auto_max)).corrected()
        }
    }
}

/// Folds per-series `(min, max)` extents into one extent.
#[must_use]
pub fn merge_extents<I>(extents: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    extents
        .into_iter()
        .fold(None, |acc, (min, max)| match acc {
            None => Some((min, max)),
            Some((acc_min, acc_max)) => Some((acc_min.min(min), acc_max.max(max))),
        })
}
