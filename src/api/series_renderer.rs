use crate::core::{
    CoordinateMapper, SeriesPoint, fill_polygon, project_bars, project_candles, project_dots,
    project_vertices, segments_from_vertices,
};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, DrawingSurface, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};

use super::{ChartStyle, LabelAxis, LabelFormatter, SeriesAppearance};

/// Gap between a bar top and its value text.
const VALUE_ON_TOP_GAP_PX: f64 = 4.0;
/// Shortest candle body, so open == close stays visible.
const MIN_CANDLE_BODY_HEIGHT_PX: f64 = 1.0;

/// Per-axis inputs shared by every series drawn into one plot area.
#[derive(Debug, Clone, Copy)]
pub struct SeriesRenderContext<'a> {
    pub mapper: CoordinateMapper,
    pub formatter: &'a LabelFormatter,
    pub text_size_px: f64,
}

/// Drawing strategy for one chart style.
///
/// Inputs are already windowed; renderers only read them and issue surface
/// calls in a deterministic order.
pub trait SeriesRenderer {
    fn render<P: SeriesPoint>(
        &self,
        surface: &mut dyn DrawingSurface,
        points: &[P],
        appearance: &SeriesAppearance,
        context: &SeriesRenderContext<'_>,
    ) -> ChartResult<()>;
}

/// Background fill, then segments, then one marker per vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineRenderer;

#[derive(Debug, Clone, Copy, Default)]
pub struct BarRenderer {
    pub values_on_top: Option<Color>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

#[derive(Debug, Clone, Copy)]
pub struct CandlestickRenderer {
    pub bullish_color: Color,
    pub bearish_color: Color,
}

impl SeriesRenderer for LineRenderer {
    fn render<P: SeriesPoint>(
        &self,
        surface: &mut dyn DrawingSurface,
        points: &[P],
        appearance: &SeriesAppearance,
        context: &SeriesRenderContext<'_>,
    ) -> ChartResult<()> {
        let vertices = project_vertices(points, &context.mapper);

        if appearance.draw_background {
            let polygon = fill_polygon(&vertices, context.mapper.baseline_y());
            if !polygon.is_empty() {
                surface.draw_path(&PathPrimitive::new(polygon, appearance.background_color))?;
            }
        }

        for segment in segments_from_vertices(&vertices) {
            surface.draw_line(&LinePrimitive::new(
                segment.x1,
                segment.y1,
                segment.x2,
                segment.y2,
                appearance.thickness,
                appearance.color,
            ))?;
        }

        if appearance.draw_data_points {
            for (x, y) in &vertices {
                surface.draw_circle(&CirclePrimitive::new(
                    *x,
                    *y,
                    appearance.data_point_radius,
                    appearance.color,
                ))?;
            }
        }
        Ok(())
    }
}

impl SeriesRenderer for BarRenderer {
    fn render<P: SeriesPoint>(
        &self,
        surface: &mut dyn DrawingSurface,
        points: &[P],
        appearance: &SeriesAppearance,
        context: &SeriesRenderContext<'_>,
    ) -> ChartResult<()> {
        let area = context.mapper.area();
        let span = context.mapper.y_range().span();

        for (point, bar) in points.iter().zip(project_bars(points, &context.mapper)) {
            let color = appearance
                .value_dependent_color
                .as_ref()
                .map_or(appearance.color, |color_fn| color_fn(point.x(), point.y()));
            surface.draw_rect(&RectPrimitive::new(
                bar.left, bar.top, bar.width, bar.height, color,
            ))?;

            if let Some(text_color) = self.values_on_top {
                let mut y = bar.top - VALUE_ON_TOP_GAP_PX;
                if y <= area.top {
                    y += context.text_size_px + VALUE_ON_TOP_GAP_PX;
                }
                let text = context.formatter.format(bar.value, LabelAxis::Vertical, span);
                if !text.is_empty() {
                    surface.draw_text(&TextPrimitive::new(
                        text,
                        bar.left + bar.width / 2.0,
                        y,
                        context.text_size_px,
                        text_color,
                        TextHAlign::Center,
                    ))?;
                }
            }
        }
        Ok(())
    }
}

impl SeriesRenderer for DotRenderer {
    fn render<P: SeriesPoint>(
        &self,
        surface: &mut dyn DrawingSurface,
        points: &[P],
        appearance: &SeriesAppearance,
        context: &SeriesRenderContext<'_>,
    ) -> ChartResult<()> {
        for dot in project_dots(points, &context.mapper, appearance.data_point_radius) {
            surface.draw_circle(&CirclePrimitive::new(
                dot.center_x,
                dot.center_y,
                dot.radius,
                appearance.color,
            ))?;
        }
        Ok(())
    }
}

impl SeriesRenderer for CandlestickRenderer {
    fn render<P: SeriesPoint>(
        &self,
        surface: &mut dyn DrawingSurface,
        points: &[P],
        _appearance: &SeriesAppearance,
        context: &SeriesRenderContext<'_>,
    ) -> ChartResult<()> {
        for candle in project_candles(points, &context.mapper) {
            if candle.body_width <= 0.0 {
                continue;
            }
            let color = if candle.is_bullish {
                self.bullish_color
            } else {
                self.bearish_color
            };

            surface.draw_line(&LinePrimitive::new(
                candle.center_x,
                candle.wick_top,
                candle.center_x,
                candle.wick_bottom,
                candle.wick_width,
                color,
            ))?;
            let body_height = (candle.body_bottom - candle.body_top).max(MIN_CANDLE_BODY_HEIGHT_PX);
            surface.draw_rect(&RectPrimitive::new(
                candle.center_x - candle.body_width / 2.0,
                candle.body_top,
                candle.body_width,
                body_height,
                color,
            ))?;
        }
        Ok(())
    }
}

impl ChartStyle {
    /// Dispatches to the renderer of this style.
    pub fn render<P: SeriesPoint>(
        self,
        surface: &mut dyn DrawingSurface,
        points: &[P],
        appearance: &SeriesAppearance,
        context: &SeriesRenderContext<'_>,
    ) -> ChartResult<()> {
        match self {
            Self::Line => LineRenderer.render(surface, points, appearance, context),
            Self::Bar {
                draw_values_on_top,
                values_on_top_color,
            } => BarRenderer {
                values_on_top: draw_values_on_top.then_some(values_on_top_color),
            }
            .render(surface, points, appearance, context),
            Self::Dot => DotRenderer.render(surface, points, appearance, context),
            Self::Candlestick {
                bullish_color,
                bearish_color,
            } => CandlestickRenderer {
                bullish_color,
                bearish_color,
            }
            .render(surface, points, appearance, context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LineRenderer, SeriesRenderContext, SeriesRenderer};
    use crate::api::{LabelFormatter, SeriesAppearance};
    use crate::core::{AxisRange, CoordinateMapper, DataPoint, PlotArea};
    use crate::render::{DrawCommand, RecordingSurface};

    #[test]
    fn line_markers_cover_both_endpoints() {
        let formatter = LabelFormatter::default();
        let context = SeriesRenderContext {
            mapper: CoordinateMapper::new(
                AxisRange::new(0.0, 2.0),
                AxisRange::new(0.0, 2.0),
                PlotArea::new(0.0, 0.0, 100.0, 100.0),
            )
            .expect("mapper"),
            formatter: &formatter,
            text_size_px: 12.0,
        };
        let appearance = SeriesAppearance::default().with_data_points(3.0);
        let points = [
            DataPoint::new(0.0, 0.0),
            DataPoint::new(1.0, 2.0),
            DataPoint::new(2.0, 1.0),
        ];

        let mut surface = RecordingSurface::new(100.0, 100.0);
        LineRenderer
            .render(&mut surface, &points, &appearance, &context)
            .expect("render");

        let commands = &surface.frame().commands;
        assert_eq!(commands.len(), 5);
        assert!(matches!(commands[0], DrawCommand::Line(_)));
        assert!(matches!(commands[1], DrawCommand::Line(_)));
        let centers: Vec<(f64, f64)> = surface
            .frame()
            .circles()
            .map(|circle| (circle.center_x, circle.center_y))
            .collect();
        assert_eq!(centers, vec![(0.0, 100.0), (50.0, 0.0), (100.0, 50.0)]);
    }
}
