use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::AxisRange;

use super::axis_label_format::{LabelFormatterFn, format_adaptive_label};
use super::{AxisLabelLocale, LabelAxis};

/// Share of the axis span at which the sample label used for text
/// measurement is taken.
pub const LABEL_MEASURE_FRACTION: f64 = 0.783;

/// One generated or static axis label.
///
/// `value` is `None` for static labels, which carry text only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub value: Option<f64>,
    pub text: String,
}

impl AxisLabel {
    #[must_use]
    pub fn fixed(text: impl Into<String>) -> Self {
        Self {
            value: None,
            text: text.into(),
        }
    }
}

/// Resolves label text: the custom formatter first, the adaptive default
/// when it declines.
#[derive(Clone, Default)]
pub struct LabelFormatter {
    custom: Option<LabelFormatterFn>,
    locale: AxisLabelLocale,
}

impl std::fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFormatter")
            .field("custom", &self.custom.is_some())
            .field("locale", &self.locale)
            .finish()
    }
}

impl LabelFormatter {
    #[must_use]
    pub fn new(custom: Option<LabelFormatterFn>, locale: AxisLabelLocale) -> Self {
        Self { custom, locale }
    }

    #[must_use]
    pub fn has_custom(&self) -> bool {
        self.custom.is_some()
    }

    /// Formats `value` on `axis`, whose resolved range spans `span`.
    #[must_use]
    pub fn format(&self, value: f64, axis: LabelAxis, span: f64) -> String {
        if let Some(custom) = &self.custom
            && let Some(text) = custom(value, axis)
        {
            return text;
        }
        format_adaptive_label(value, span, self.locale)
    }

    /// Label used to measure the typical label size of an axis.
    #[must_use]
    pub fn sample_label(&self, range: AxisRange, axis: LabelAxis) -> String {
        let value = range.min + range.span() * LABEL_MEASURE_FRACTION;
        self.format(value, axis, range.span())
    }
}

/// `floor(available_width / (2 * label_width))`.
#[must_use]
pub fn auto_horizontal_label_count(available_width_px: f64, label_width_px: f64) -> usize {
    auto_label_count(available_width_px, label_width_px, 2.0)
}

/// `floor(available_height / (3 * label_height))`. Zero means the graph is
/// smaller than the label text; no labels are drawn.
#[must_use]
pub fn auto_vertical_label_count(available_height_px: f64, label_height_px: f64) -> usize {
    let count = auto_label_count(available_height_px, label_height_px, 3.0);
    if count == 0 {
        warn!(
            available_height_px,
            label_height_px, "graph height is smaller than the label text; no vertical labels"
        );
    }
    count
}

fn auto_label_count(available_px: f64, label_px: f64, factor: f64) -> usize {
    let available_px = if available_px.is_finite() && available_px > 0.0 {
        available_px
    } else {
        1.0
    };
    let label_px = if label_px.is_finite() {
        label_px.max(1.0)
    } else {
        1.0
    };
    (available_px / (factor * label_px)).floor() as usize
}

/// Configured count when non-zero, otherwise the automatic one.
#[must_use]
pub fn resolve_label_count(configured: usize, automatic: usize) -> usize {
    if configured > 0 { configured } else { automatic }
}

/// `count` evenly spaced values from `range.min` to `range.max`.
///
/// A single label sits at `range.min`.
#[must_use]
pub fn label_values(range: AxisRange, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![range.min],
        _ => {
            let steps = (count - 1) as f64;
            (0..count)
                .map(|index| range.min + range.span() * index as f64 / steps)
                .collect()
        }
    }
}

/// Pixel offsets of `count` labels spread over `extent_px`.
#[must_use]
pub fn label_offsets(extent_px: f64, count: usize) -> Vec<f64> {
    let step = if count > 1 {
        extent_px / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(|index| step * index as f64).collect()
}

/// Horizontal labels, left to right (ascending x).
#[must_use]
pub fn generate_horizontal_labels(
    range: AxisRange,
    count: usize,
    formatter: &LabelFormatter,
) -> Vec<AxisLabel> {
    label_values(range, count)
        .into_iter()
        .map(|value| AxisLabel {
            value: Some(value),
            text: formatter.format(value, LabelAxis::Horizontal, range.span()),
        })
        .collect()
}

/// Vertical labels, top to bottom (descending y).
#[must_use]
pub fn generate_vertical_labels(
    range: AxisRange,
    count: usize,
    formatter: &LabelFormatter,
) -> Vec<AxisLabel> {
    label_values(range, count)
        .into_iter()
        .rev()
        .map(|value| AxisLabel {
            value: Some(value),
            text: formatter.format(value, LabelAxis::Vertical, range.span()),
        })
        .collect()
}
