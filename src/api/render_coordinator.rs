use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    AxisRange, CoordinateMapper, PlotArea, SurfaceSize, merge_extents, resolve_axis_range,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, LinePrimitive, TextHAlign, TextMetrics, TextPrimitive};

use super::axis_labels::{
    auto_horizontal_label_count, auto_vertical_label_count, generate_horizontal_labels,
    generate_vertical_labels, label_offsets, resolve_label_count,
};
use super::label_cache::{LabelCacheKey, LabelLayout};
use super::legend::{build_legend_rows, draw_legend, hairline_data_x};
use super::{AxisLabel, AxisSlot, ChartEngine, LabelAxis, SeriesFrame, SeriesRenderContext};

/// Gap between the title or horizontal labels and the surface edge they hug.
const TEXT_EDGE_GAP_PX: f64 = 4.0;
/// Line advance of multi-line labels relative to the text size.
const LABEL_LINE_SPACING: f64 = 1.1;
const GRID_STROKE_PX: f64 = 1.0;
/// Measured on every pass to tell surfaces with different text metrics apart.
const METRICS_REFERENCE_TEXT: &str = "0123456789";

/// Resolved geometry and labels of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderLayout {
    pub surface: SurfaceSize,
    pub x_range: AxisRange,
    pub primary_range: AxisRange,
    pub secondary_range: Option<AxisRange>,
    pub primary_area: PlotArea,
    pub secondary_area: Option<PlotArea>,
    pub label_column_width: f64,
    pub horizontal_labels: Vec<AxisLabel>,
    pub vertical_labels: Vec<AxisLabel>,
    pub secondary_vertical_labels: Vec<AxisLabel>,
}

impl RenderLayout {
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        self.primary_area.width
    }

    /// Bottom edge of the lowest plot area.
    #[must_use]
    pub fn graph_bottom(&self) -> f64 {
        self.secondary_area
            .unwrap_or(self.primary_area)
            .bottom()
    }

    /// Data x under surface x `pixel`; `None` for a collapsed plot area.
    #[must_use]
    pub fn pixel_to_data_x(&self, pixel: f64) -> Option<f64> {
        let area = self.primary_area;
        if !pixel.is_finite() || area.width <= 0.0 {
            return None;
        }
        Some(self.x_range.min + (pixel - area.left) / area.width * self.x_range.span())
    }

    #[must_use]
    pub fn data_x_to_pixel(&self, x: f64) -> f64 {
        let area = self.primary_area;
        area.left + (x - self.x_range.min) / self.x_range.span() * area.width
    }
}

/// Counters reported by one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderStats {
    pub series_drawn: usize,
    pub points_drawn: usize,
    pub legend_rows: usize,
}

/// One hosted series pinned for the current pass, with its axis.
type PassFrame<'a> = (AxisSlot, Box<dyn SeriesFrame + 'a>);

fn frames_on<'f>(frames: &'f [PassFrame<'f>], axis: AxisSlot) -> Vec<&'f dyn SeriesFrame> {
    frames
        .iter()
        .filter(|(slot, _)| *slot == axis)
        .map(|(_, frame)| &**frame)
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct PlotGeometry {
    label_column_width: f64,
    primary: PlotArea,
    secondary: Option<PlotArea>,
}

impl ChartEngine {
    /// Draws the whole chart onto `surface`, sized `width` x `height` pixels.
    ///
    /// Draw order: horizontal grid, vertical grid with horizontal labels,
    /// title, then per axis the axis line and its series, the vertical
    /// labels, the hairline and finally the legend. Degenerate data never
    /// fails a render; only surface errors propagate.
    pub fn render(&mut self, surface: &mut dyn DrawingSurface, width: f64, height: f64) -> ChartResult<RenderStats> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ChartError::InvalidArgument(format!(
                "surface size must be finite and >= 0, got {width}x{height}"
            )));
        }

        self.apply_pending_scroll();
        let version = self.signal.version();
        let size = SurfaceSize::new(width, height);
        if !size.is_valid() {
            trace!(width, height, "skip render of empty surface");
            self.finish_render(version, None);
            return Ok(RenderStats::default());
        }

        let hosted = self.hosted_series();
        let viewport = self.viewport.viewport();
        let frames: Vec<PassFrame<'_>> = hosted
            .iter()
            .map(|(axis, series)| (*axis, series.frame(viewport)))
            .collect();

        let layout = self.resolve_layout(surface, size, version, &frames);
        let mut stats = RenderStats::default();

        self.draw_grid(surface, &layout)?;
        self.draw_horizontal_labels(surface, &layout)?;
        self.draw_title(surface, &layout)?;
        for axis in [AxisSlot::Primary, AxisSlot::Secondary] {
            self.draw_axis_series(surface, &layout, axis, &frames, &mut stats)?;
        }
        self.draw_vertical_labels(surface, &layout)?;
        stats.legend_rows = self.draw_overlay(surface, &layout, &frames)?;

        debug!(
            version,
            series = stats.series_drawn,
            points = stats.points_drawn,
            "render pass"
        );
        self.finish_render(version, Some(layout));
        Ok(stats)
    }

    fn finish_render(&mut self, version: u64, layout: Option<RenderLayout>) {
        self.last_rendered_version = Some(version);
        self.pointer_dirty = false;
        if layout.is_some() {
            self.last_layout = layout;
        }
    }

    fn resolve_layout(
        &mut self,
        surface: &mut dyn DrawingSurface,
        size: SurfaceSize,
        version: u64,
        frames: &[PassFrame<'_>],
    ) -> RenderLayout {
        let (x_min, x_max) = self
            .viewport
            .visible_x_range(self.data_bounds())
            .unwrap_or((0.0, 0.0));
        let x_range = AxisRange::new(x_min, x_max).corrected();

        let primary_range = resolve_axis_range(
            self.primary_bounds,
            merge_extents(
                frames_on(frames, AxisSlot::Primary)
                    .iter()
                    .filter_map(|frame| frame.y_extent()),
            ),
        );
        let secondary_frames = frames_on(frames, AxisSlot::Secondary);
        let secondary_range = (!secondary_frames.is_empty()).then(|| {
            resolve_axis_range(
                self.secondary_bounds,
                merge_extents(secondary_frames.iter().filter_map(|frame| frame.y_extent())),
            )
        });

        let reference = surface.measure_text(METRICS_REFERENCE_TEXT, self.config.text_size_px);
        let key = LabelCacheKey::new(version, size.width, size.height, reference);
        let labels = match self.label_cache.get(key) {
            Some(labels) => labels,
            None => {
                let labels =
                    self.build_labels(surface, size, x_range, primary_range, secondary_range);
                self.label_cache.insert(key, labels.clone());
                labels
            }
        };

        let geometry = self.plot_geometry(
            size,
            labels.horizontal_metrics,
            labels.vertical_metrics,
            secondary_range.is_some(),
        );
        RenderLayout {
            surface: size,
            x_range,
            primary_range,
            secondary_range,
            primary_area: geometry.primary,
            secondary_area: geometry.secondary,
            label_column_width: geometry.label_column_width,
            horizontal_labels: labels.horizontal,
            vertical_labels: labels.vertical_primary,
            secondary_vertical_labels: labels.vertical_secondary,
        }
    }

    fn build_labels(
        &self,
        surface: &mut dyn DrawingSurface,
        size: SurfaceSize,
        x_range: AxisRange,
        primary_range: AxisRange,
        secondary_range: Option<AxisRange>,
    ) -> LabelLayout {
        let formatter = self.label_formatter();
        let text_size = self.config.text_size_px;
        let horizontal_metrics = measure_label(
            surface,
            &formatter.sample_label(x_range, LabelAxis::Horizontal),
            text_size,
        );
        let vertical_metrics = measure_label(
            surface,
            &formatter.sample_label(primary_range, LabelAxis::Vertical),
            text_size,
        );
        let geometry = self.plot_geometry(
            size,
            horizontal_metrics,
            vertical_metrics,
            secondary_range.is_some(),
        );

        let horizontal = match &self.static_horizontal_labels {
            Some(texts) => texts.iter().map(|text| AxisLabel::fixed(text.clone())).collect(),
            None => {
                let count = resolve_label_count(
                    self.config.num_horizontal_labels,
                    auto_horizontal_label_count(geometry.primary.width, horizontal_metrics.width),
                );
                generate_horizontal_labels(x_range, count, &formatter)
            }
        };
        let vertical_primary = match &self.static_vertical_labels {
            Some(texts) => texts.iter().map(|text| AxisLabel::fixed(text.clone())).collect(),
            None => {
                let count = resolve_label_count(
                    self.config.num_vertical_labels,
                    auto_vertical_label_count(geometry.primary.height, vertical_metrics.height),
                );
                generate_vertical_labels(primary_range, count, &formatter)
            }
        };
        let vertical_secondary = match (secondary_range, geometry.secondary) {
            (Some(range), Some(area)) => {
                let count = resolve_label_count(
                    self.config.num_vertical_labels,
                    auto_vertical_label_count(area.height, vertical_metrics.height),
                );
                generate_vertical_labels(range, count, &formatter)
            }
            _ => Vec::new(),
        };

        trace!(
            horizontal = horizontal.len(),
            vertical = vertical_primary.len(),
            secondary = vertical_secondary.len(),
            "rebuild axis labels"
        );
        LabelLayout {
            horizontal_metrics,
            vertical_metrics,
            horizontal,
            vertical_primary,
            vertical_secondary,
        }
    }

    fn plot_geometry(
        &self,
        size: SurfaceSize,
        horizontal_metrics: TextMetrics,
        vertical_metrics: TextMetrics,
        has_secondary: bool,
    ) -> PlotGeometry {
        let border = self.config.border_px;
        let top = border + horizontal_metrics.height;
        let graph_height = (size.height - 2.0 * top).max(0.0);

        let label_column_width = if !self.config.show_vertical_labels {
            0.0
        } else if self.config.vertical_labels_width_px > 0.0 {
            self.config.vertical_labels_width_px
        } else {
            vertical_metrics.width + border
        };
        let left = label_column_width + 1.0;
        let width = (size.width - left).max(0.0);

        let ratio = if has_secondary {
            self.config.primary_height_ratio
        } else {
            1.0
        };
        let primary_height = graph_height * ratio;
        PlotGeometry {
            label_column_width,
            primary: PlotArea::new(left, top, width, primary_height),
            secondary: has_secondary
                .then(|| PlotArea::new(left, top + primary_height, width, graph_height - primary_height)),
        }
    }

    fn draw_grid(&self, surface: &mut dyn DrawingSurface, layout: &RenderLayout) -> ChartResult<()> {
        if !self.config.grid_style.draws_horizontal() {
            return Ok(());
        }
        let areas = [
            Some((layout.primary_area, layout.vertical_labels.len())),
            layout
                .secondary_area
                .map(|area| (area, layout.secondary_vertical_labels.len())),
        ];
        for (area, count) in areas.into_iter().flatten() {
            for offset in label_offsets(area.height, count) {
                let y = area.top + offset;
                surface.draw_line(&LinePrimitive::new(
                    layout.label_column_width,
                    y,
                    layout.surface.width,
                    y,
                    GRID_STROKE_PX,
                    self.config.colors.grid,
                ))?;
            }
        }
        Ok(())
    }

    fn draw_horizontal_labels(&self, surface: &mut dyn DrawingSurface, layout: &RenderLayout) -> ChartResult<()> {
        let area = layout.primary_area;
        let labels = &layout.horizontal_labels;
        let last = labels.len().saturating_sub(1);
        let baseline = layout.surface.height - TEXT_EDGE_GAP_PX;

        for (index, (label, offset)) in labels
            .iter()
            .zip(label_offsets(area.width, labels.len()))
            .enumerate()
        {
            let x = area.left + offset;
            if self.config.grid_style.draws_vertical() {
                surface.draw_line(&LinePrimitive::new(
                    x,
                    layout.graph_bottom(),
                    x,
                    area.top,
                    GRID_STROKE_PX,
                    self.config.colors.grid,
                ))?;
            }
            if !self.config.show_horizontal_labels {
                continue;
            }
            let align = if index == 0 {
                TextHAlign::Left
            } else if index == last {
                TextHAlign::Right
            } else {
                TextHAlign::Center
            };
            self.draw_label_text(
                surface,
                &label.text,
                x,
                baseline,
                align,
                self.config.colors.horizontal_labels,
            )?;
        }
        Ok(())
    }

    fn draw_title(&self, surface: &mut dyn DrawingSurface, layout: &RenderLayout) -> ChartResult<()> {
        if !self.config.show_title || self.config.title.is_empty() {
            return Ok(());
        }
        let area = layout.primary_area;
        surface.draw_text(&TextPrimitive::new(
            self.config.title.clone(),
            area.left + area.width / 2.0,
            area.top - TEXT_EDGE_GAP_PX,
            self.config.text_size_px,
            self.config.colors.title,
            TextHAlign::Center,
        ))
    }

    fn draw_axis_series(
        &self,
        surface: &mut dyn DrawingSurface,
        layout: &RenderLayout,
        axis: AxisSlot,
        frames: &[PassFrame<'_>],
        stats: &mut RenderStats,
    ) -> ChartResult<()> {
        let (area, y_range) = match axis {
            AxisSlot::Primary => (layout.primary_area, layout.primary_range),
            AxisSlot::Secondary => match (layout.secondary_area, layout.secondary_range) {
                (Some(area), Some(range)) => (area, range),
                _ => return Ok(()),
            },
        };
        let axis_frames = frames_on(frames, axis);
        if axis_frames.is_empty() {
            return Ok(());
        }

        surface.draw_line(&LinePrimitive::new(
            0.0,
            area.top,
            layout.surface.width,
            area.top,
            GRID_STROKE_PX,
            self.config.colors.axis_line,
        ))?;
        if area.width <= 0.0 || area.height <= 0.0 {
            trace!(?axis, "skip series of collapsed plot area");
            return Ok(());
        }

        let formatter = self.label_formatter();
        let context = SeriesRenderContext {
            mapper: CoordinateMapper::new(layout.x_range, y_range, area)?,
            formatter: &formatter,
            text_size_px: self.config.text_size_px,
        };
        for frame in axis_frames {
            stats.points_drawn += frame.render(surface, &context)?;
            stats.series_drawn += 1;
        }
        Ok(())
    }

    fn draw_vertical_labels(&self, surface: &mut dyn DrawingSurface, layout: &RenderLayout) -> ChartResult<()> {
        if !self.config.show_vertical_labels {
            return Ok(());
        }
        let column = layout.label_column_width;
        let (x, align) = match self.config.vertical_labels_align {
            TextHAlign::Left => (0.0, TextHAlign::Left),
            TextHAlign::Center => (column / 2.0, TextHAlign::Center),
            TextHAlign::Right => (column, TextHAlign::Right),
        };

        let axes = [
            Some((layout.primary_area, &layout.vertical_labels)),
            layout
                .secondary_area
                .map(|area| (area, &layout.secondary_vertical_labels)),
        ];
        for (area, labels) in axes.into_iter().flatten() {
            for (label, offset) in labels.iter().zip(label_offsets(area.height, labels.len())) {
                self.draw_label_text(
                    surface,
                    &label.text,
                    x,
                    area.top + offset,
                    align,
                    self.config.colors.vertical_labels,
                )?;
            }
        }
        Ok(())
    }

    /// Hairline and legend; returns the number of legend rows drawn.
    fn draw_overlay(
        &self,
        surface: &mut dyn DrawingSurface,
        layout: &RenderLayout,
        frames: &[PassFrame<'_>],
    ) -> ChartResult<usize> {
        let legend = self.config.legend;
        let pointer = self.interaction.pointer().position();
        if !legend.show && !(legend.show_hairline && pointer.is_some()) {
            return Ok(0);
        }

        let series: Vec<&dyn SeriesFrame> = frames.iter().map(|(_, frame)| &**frame).collect();
        let pointer_data_x = pointer.and_then(|(x, _)| layout.pixel_to_data_x(x));

        if legend.show_hairline
            && let Some(data_x) = pointer_data_x
            && !series.is_empty()
        {
            let snapped = hairline_data_x(&series, data_x);
            let pixel = layout.data_x_to_pixel(snapped);
            surface.draw_line(&LinePrimitive::new(
                pixel,
                0.0,
                pixel,
                layout.surface.height,
                legend.hairline_width_px,
                self.config.colors.hairline,
            ))?;
        }

        if !legend.show {
            return Ok(0);
        }
        let readout = pointer_data_x
            .filter(|_| legend.show_pointer_readout)
            .map(|data_x| {
                let formatter = self.label_formatter();
                let label = formatter.format(data_x, LabelAxis::Horizontal, layout.x_range.span());
                (data_x, label)
            });
        let rows = build_legend_rows(&self.config.title, &series, readout);
        draw_legend(surface, &self.config, &rows, layout.surface)?;
        Ok(rows.len())
    }

    fn draw_label_text(
        &self,
        surface: &mut dyn DrawingSurface,
        text: &str,
        x: f64,
        baseline: f64,
        align: TextHAlign,
        color: Color,
    ) -> ChartResult<()> {
        let text_size = self.config.text_size_px;
        let lines: Vec<&str> = text.split('\n').collect();
        let line_count = lines.len();
        for (index, line) in lines.into_iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let lines_below = (line_count - index - 1) as f64;
            surface.draw_text(&TextPrimitive::new(
                line,
                x,
                baseline - lines_below * text_size * LABEL_LINE_SPACING,
                text_size,
                color,
                align,
            ))?;
        }
        Ok(())
    }
}

/// Measures possibly multi-line label text: widest line by line count.
fn measure_label(surface: &mut dyn DrawingSurface, text: &str, font_size_px: f64) -> TextMetrics {
    let mut width = 0.0_f64;
    let mut line_height = 0.0_f64;
    let mut lines = 0_usize;
    for line in text.split('\n') {
        let metrics = surface.measure_text(line, font_size_px);
        width = width.max(metrics.width);
        line_height = line_height.max(metrics.height);
        lines += 1;
    }
    TextMetrics::new(width, line_height * lines as f64)
}

#[cfg(test)]
mod tests {
    use super::measure_label;
    use crate::render::RecordingSurface;

    #[test]
    fn multi_line_labels_measure_widest_line_times_line_count() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let metrics = measure_label(&mut surface, "ab\nabcd", 10.0);
        assert!((metrics.width - 24.0).abs() <= 1e-9);
        assert!((metrics.height - 20.0).abs() <= 1e-9);
    }
}
