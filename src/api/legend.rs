use serde::{Deserialize, Serialize};

use crate::core::SurfaceSize;
use crate::error::ChartResult;
use crate::render::{Color, DrawingSurface, RectPrimitive, TextHAlign, TextPrimitive};

use super::axis_label_format::format_readout_value;
use super::{ChartConfig, LegendAlign, PointReadout, SeriesFrame};

/// Swatch edge relative to the text size.
const SWATCH_TEXT_RATIO: f64 = 0.8;

/// One legend line: an optional color swatch followed by text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRow {
    pub swatch: Option<Color>,
    pub text: String,
}

/// Pixel box the legend occupies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Readout suffix appended after a series description.
#[must_use]
pub fn readout_text(readout: &PointReadout) -> String {
    match readout.ohlc {
        Some(ohlc) => format!(
            " Open {} High {} Low {} Close {}",
            format_readout_value(ohlc.open),
            format_readout_value(ohlc.high),
            format_readout_value(ohlc.low),
            format_readout_value(ohlc.close)
        ),
        None => format!(" {}", format_readout_value(readout.y)),
    }
}

/// Legend rows, primary series first.
///
/// With `pointer` set to `(data_x, x_label)`, the first row shows the title
/// and the x label, and every series row ends with the value of its pinned
/// point nearest to `data_x`. Series without a description get no row.
#[must_use]
pub fn build_legend_rows(
    title: &str,
    frames: &[&dyn SeriesFrame],
    pointer: Option<(f64, String)>,
) -> Vec<LegendRow> {
    let mut rows = Vec::with_capacity(frames.len() + 1);
    if let Some((_, x_label)) = &pointer {
        rows.push(LegendRow {
            swatch: None,
            text: format!("{title} {x_label}"),
        });
    }

    for frame in frames {
        let series = frame.series();
        let Some(description) = series.description() else {
            continue;
        };
        let readout = pointer
            .as_ref()
            .and_then(|(data_x, _)| frame.nearest_point(*data_x))
            .map(|readout| readout_text(&readout))
            .unwrap_or_default();
        rows.push(LegendRow {
            swatch: (!description.is_empty()).then_some(series.appearance().color),
            text: format!("{description}{readout}"),
        });
    }
    rows
}

/// Data x the hairline sits on: the nearest point of the first series, or the
/// pointer x itself when that series has no point in the window.
#[must_use]
pub fn hairline_data_x(frames: &[&dyn SeriesFrame], pointer_x: f64) -> f64 {
    frames
        .first()
        .and_then(|first| first.nearest_point(pointer_x))
        .map_or(pointer_x, |readout| readout.x)
}

/// Places a legend of `row_count` rows whose widest text is
/// `content_width` pixels.
#[must_use]
pub fn legend_box(config: &ChartConfig, row_count: usize, content_width: f64, size: SurfaceSize) -> LegendBox {
    let legend = config.legend;
    let shape = config.text_size_px * SWATCH_TEXT_RATIO;
    let height = (shape + legend.spacing_px) * row_count as f64 + 2.0 * legend.border_px
        - legend.spacing_px;
    let width = legend
        .width_px
        .max(content_width + shape + legend.spacing_px + 2.0 * legend.border_px);

    let mut left = size.width - width - legend.border_px * 2.0;
    let top = match legend.align {
        LegendAlign::TopLeft => {
            left = 0.0;
            0.0
        }
        LegendAlign::Top => 0.0,
        LegendAlign::Middle => size.height / 2.0 - height / 2.0,
        LegendAlign::Bottom => size.height - config.border_px - height - legend.margin_bottom_px,
    };

    LegendBox {
        left,
        top,
        width,
        height,
    }
}

/// Draws the rounded legend box, then one swatch and text per row.
pub fn draw_legend(
    surface: &mut dyn DrawingSurface,
    config: &ChartConfig,
    rows: &[LegendRow],
    size: SurfaceSize,
) -> ChartResult<Option<LegendBox>> {
    if rows.is_empty() {
        return Ok(None);
    }

    let text_size = config.text_size_px;
    let legend = config.legend;
    let shape = text_size * SWATCH_TEXT_RATIO;
    let content_width = rows
        .iter()
        .map(|row| surface.measure_text(&row.text, text_size).width)
        .fold(0.0_f64, f64::max);
    let bounds = legend_box(config, rows.len(), content_width, size);

    surface.draw_rect(
        &RectPrimitive::new(
            bounds.left,
            bounds.top,
            bounds.width,
            bounds.height,
            config.colors.legend_background,
        )
        .with_corner_radius(legend.corner_radius_px),
    )?;

    for (index, row) in rows.iter().enumerate() {
        let row_top = bounds.top + legend.border_px + index as f64 * (shape + legend.spacing_px);
        let text_x = match row.swatch {
            Some(color) => {
                surface.draw_rect(&RectPrimitive::new(
                    bounds.left + legend.border_px,
                    row_top,
                    shape,
                    shape,
                    color,
                ))?;
                bounds.left + legend.border_px + shape + legend.spacing_px
            }
            None => bounds.left + legend.border_px + legend.spacing_px,
        };
        if row.text.is_empty() {
            continue;
        }
        surface.draw_text(&TextPrimitive::new(
            row.text.clone(),
            text_x,
            row_top + shape,
            text_size,
            config.colors.legend_text,
            TextHAlign::Left,
        ))?;
    }
    Ok(Some(bounds))
}
