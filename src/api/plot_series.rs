use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DataSeries, Ohlc, RedrawSignal, SeriesPoint, Viewport, Window, y_extent};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface};

use super::series_renderer::SeriesRenderContext;

static NEXT_SERIES_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique series identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        Self(NEXT_SERIES_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "series-{}", self.0)
    }
}

/// Per-point color hook, called with `(x, y)`. Only bar series use it.
pub type ValueColorFn = Arc<dyn Fn(f64, f64) -> Color + Send + Sync + 'static>;

/// Visual attributes shared by every chart style.
#[derive(Clone)]
pub struct SeriesAppearance {
    pub color: Color,
    pub thickness: f64,
    pub background_color: Color,
    /// Fills the area under a line series.
    pub draw_background: bool,
    /// Draws a marker at every line vertex.
    pub draw_data_points: bool,
    pub data_point_radius: f64,
    pub value_dependent_color: Option<ValueColorFn>,
}

impl Default for SeriesAppearance {
    fn default() -> Self {
        Self {
            color: Color::from_argb8(255, 0, 119, 204),
            thickness: 3.0,
            background_color: Color::from_argb8(128, 20, 40, 60),
            draw_background: false,
            draw_data_points: false,
            data_point_radius: 10.0,
            value_dependent_color: None,
        }
    }
}

impl std::fmt::Debug for SeriesAppearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesAppearance")
            .field("color", &self.color)
            .field("thickness", &self.thickness)
            .field("background_color", &self.background_color)
            .field("draw_background", &self.draw_background)
            .field("draw_data_points", &self.draw_data_points)
            .field("data_point_radius", &self.data_point_radius)
            .field("value_dependent_color", &self.value_dependent_color.is_some())
            .finish()
    }
}

impl SeriesAppearance {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background_color: Color) -> Self {
        self.background_color = background_color;
        self.draw_background = true;
        self
    }

    #[must_use]
    pub fn with_data_points(mut self, radius: f64) -> Self {
        self.data_point_radius = radius;
        self.draw_data_points = true;
        self
    }

    #[must_use]
    pub fn with_value_dependent_color(mut self, color_fn: ValueColorFn) -> Self {
        self.value_dependent_color = Some(color_fn);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.color.validate()?;
        self.background_color.validate()?;
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(ChartError::InvalidData(
                "series thickness must be finite and > 0".to_owned(),
            ));
        }
        if !self.data_point_radius.is_finite() || self.data_point_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "data point radius must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Closed set of drawing strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartStyle {
    Line,
    Bar {
        draw_values_on_top: bool,
        values_on_top_color: Color,
    },
    Dot,
    Candlestick {
        bullish_color: Color,
        bearish_color: Color,
    },
}

impl ChartStyle {
    #[must_use]
    pub fn bar() -> Self {
        Self::Bar {
            draw_values_on_top: false,
            values_on_top_color: Color::WHITE,
        }
    }

    #[must_use]
    pub fn bar_with_values_on_top(color: Color) -> Self {
        Self::Bar {
            draw_values_on_top: true,
            values_on_top_color: color,
        }
    }

    #[must_use]
    pub fn candlestick() -> Self {
        Self::Candlestick {
            bullish_color: Color::rgb(0.0, 1.0, 0.0),
            bearish_color: Color::rgb(1.0, 0.0, 0.0),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar { .. } => "bar",
            Self::Dot => "dot",
            Self::Candlestick { .. } => "candlestick",
        }
    }

    #[must_use]
    pub fn requires_ohlc(self) -> bool {
        matches!(self, Self::Candlestick { .. })
    }

    fn validate(self) -> ChartResult<()> {
        match self {
            Self::Line | Self::Dot => Ok(()),
            Self::Bar {
                values_on_top_color,
                ..
            } => values_on_top_color.validate(),
            Self::Candlestick {
                bullish_color,
                bearish_color,
            } => {
                bullish_color.validate()?;
                bearish_color.validate()
            }
        }
    }
}

/// Stored point nearest to a queried x, as shown by the legend readout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointReadout {
    /// Index into the full stored sequence.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub ohlc: Option<Ohlc>,
}

/// A described, styled data series that a chart can host.
///
/// Cloning the surrounding `Arc` lets a producer thread keep appending while
/// the chart renders.
#[derive(Debug)]
pub struct Series<P: SeriesPoint> {
    id: SeriesId,
    description: Option<String>,
    style: ChartStyle,
    appearance: SeriesAppearance,
    data: DataSeries<P>,
}

impl<P: SeriesPoint> Series<P> {
    /// Creates a series from initial points, which must be ascending in x.
    ///
    /// The candlestick style needs a point kind carrying OHLC values.
    pub fn new(style: ChartStyle, points: Vec<P>) -> ChartResult<Self> {
        style.validate()?;
        if style.requires_ohlc() && !P::HAS_OHLC {
            return Err(ChartError::InvalidArgument(
                "candlestick style requires candle points".to_owned(),
            ));
        }
        Ok(Self {
            id: SeriesId::next(),
            description: None,
            style,
            appearance: SeriesAppearance::default(),
            data: DataSeries::new(points)?,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_appearance(mut self, appearance: SeriesAppearance) -> ChartResult<Self> {
        appearance.validate()?;
        self.appearance = appearance;
        Ok(self)
    }

    #[must_use]
    pub fn data(&self) -> &DataSeries<P> {
        &self.data
    }

    /// See [`DataSeries::append`].
    pub fn append_data(&self, point: P, scroll_to_end: bool, max_count: Option<usize>) -> ChartResult<()> {
        self.data.append(point, scroll_to_end, max_count)
    }

    /// See [`DataSeries::reset`].
    pub fn reset_data(&self, points: Vec<P>) -> ChartResult<()> {
        self.data.reset(points)
    }
}

/// Object-safe view of a series, independent of its point kind.
pub trait PlotSeries: Send + Sync {
    fn id(&self) -> SeriesId;
    fn description(&self) -> Option<&str>;
    fn style(&self) -> ChartStyle;
    fn appearance(&self) -> &SeriesAppearance;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(first_x, last_x)` of the stored data.
    fn x_extent(&self) -> Option<(f64, f64)>;

    /// Pins the windowed values of `viewport` to the currently published
    /// version of the data.
    fn frame(&self, viewport: Viewport) -> Box<dyn SeriesFrame + '_>;

    fn attach(&self, signal: &Arc<RedrawSignal>);
    fn detach(&self, signal: &Arc<RedrawSignal>);
    fn is_attached(&self, signal: &Arc<RedrawSignal>) -> bool;

    /// `(min, max)` y over the windowed values of `viewport`.
    fn y_extent(&self, viewport: Viewport) -> Option<(f64, f64)> {
        self.frame(viewport).y_extent()
    }

    /// Point nearest to `x` among the windowed values (ties pick the lower
    /// index).
    fn nearest_point(&self, viewport: Viewport, x: f64) -> Option<PointReadout> {
        self.frame(viewport).nearest_point(x)
    }

    /// Draws the windowed values of `viewport`; returns how many points were
    /// drawn.
    fn render(
        &self,
        surface: &mut dyn DrawingSurface,
        viewport: Viewport,
        context: &SeriesRenderContext<'_>,
    ) -> ChartResult<usize> {
        self.frame(viewport).render(surface, context)
    }
}

impl<P: SeriesPoint> PlotSeries for Series<P> {
    fn id(&self) -> SeriesId {
        self.id
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn style(&self) -> ChartStyle {
        self.style
    }

    fn appearance(&self) -> &SeriesAppearance {
        &self.appearance
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn x_extent(&self) -> Option<(f64, f64)> {
        self.data.x_extent()
    }

    fn frame(&self, viewport: Viewport) -> Box<dyn SeriesFrame + '_> {
        Box::new(PinnedFrame {
            series: self,
            window: self.data.windowed_values(viewport.start, viewport.size),
        })
    }

    fn attach(&self, signal: &Arc<RedrawSignal>) {
        self.data.attach(signal);
    }

    fn detach(&self, signal: &Arc<RedrawSignal>) {
        self.data.detach(signal);
    }

    fn is_attached(&self, signal: &Arc<RedrawSignal>) -> bool {
        self.data.is_attached(signal)
    }
}

/// Windowed values of one series, pinned to a single published version.
///
/// One render pass reads the axis extent, the drawn points and the legend
/// readout of a series from the same frame, so an append landing mid-pass
/// shows up only in the next pass.
pub trait SeriesFrame {
    fn series(&self) -> &dyn PlotSeries;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(min, max)` y over the pinned window.
    fn y_extent(&self) -> Option<(f64, f64)>;

    /// Pinned point nearest to `x`; ties pick the lower index.
    fn nearest_point(&self, x: f64) -> Option<PointReadout>;

    /// Draws the pinned window; returns how many points were drawn.
    fn render(
        &self,
        surface: &mut dyn DrawingSurface,
        context: &SeriesRenderContext<'_>,
    ) -> ChartResult<usize>;
}

struct PinnedFrame<'a, P: SeriesPoint> {
    series: &'a Series<P>,
    window: Window<P>,
}

impl<P: SeriesPoint> SeriesFrame for PinnedFrame<'_, P> {
    fn series(&self) -> &dyn PlotSeries {
        self.series
    }

    fn len(&self) -> usize {
        self.window.len()
    }

    fn y_extent(&self) -> Option<(f64, f64)> {
        y_extent(&self.window)
    }

    fn nearest_point(&self, x: f64) -> Option<PointReadout> {
        if !x.is_finite() {
            return None;
        }
        let window = &self.window;
        let split = window.partition_point(|point| point.x() < x);

        let mut candidates: SmallVec<[(OrderedFloat<f64>, usize); 2]> = SmallVec::new();
        for index in [split.checked_sub(1), Some(split)].into_iter().flatten() {
            if let Some(point) = window.get(index) {
                candidates.push((OrderedFloat((point.x() - x).abs()), index));
            }
        }

        let (_, index) = candidates.into_iter().min_by_key(|candidate| candidate.0)?;
        let point = window.get(index)?;
        Some(PointReadout {
            index: window.offset() + index,
            x: point.x(),
            y: point.y(),
            ohlc: point.ohlc(),
        })
    }

    fn render(
        &self,
        surface: &mut dyn DrawingSurface,
        context: &SeriesRenderContext<'_>,
    ) -> ChartResult<usize> {
        self.series
            .style
            .render(surface, &self.window, &self.series.appearance, context)?;
        Ok(self.window.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartStyle, PlotSeries, Series};
    use crate::core::{CandlePoint, DataPoint, Viewport};
    use crate::error::ChartError;

    #[test]
    fn candlestick_style_rejects_plain_points() {
        let err = Series::new(ChartStyle::candlestick(), vec![DataPoint::new(0.0, 1.0)])
            .expect_err("plain points");
        assert!(matches!(err, ChartError::InvalidArgument(_)));

        let candle = CandlePoint::new(0.0, 1.0, 2.0, 0.5, 1.5).expect("candle");
        assert!(Series::new(ChartStyle::candlestick(), vec![candle]).is_ok());
    }

    #[test]
    fn nearest_point_prefers_lower_index_on_ties() {
        let series = Series::new(
            ChartStyle::Line,
            vec![
                DataPoint::new(0.0, 1.0),
                DataPoint::new(2.0, 2.0),
                DataPoint::new(4.0, 3.0),
            ],
        )
        .expect("series");

        let readout = series
            .nearest_point(Viewport::unconstrained(), 3.0)
            .expect("readout");
        assert_eq!(readout.index, 1);
        assert_eq!(readout.y, 2.0);

        let readout = series
            .nearest_point(Viewport::unconstrained(), 3.6)
            .expect("readout");
        assert_eq!(readout.index, 2);
    }

    #[test]
    fn nearest_point_reports_absolute_index_inside_viewport() {
        let points = (0..10).map(|i| DataPoint::new(f64::from(i), 0.0)).collect();
        let series = Series::new(ChartStyle::Dot, points).expect("series");
        let viewport = Viewport {
            start: 5.0,
            size: 2.0,
        };
        let readout = series.nearest_point(viewport, 6.2).expect("readout");
        assert_eq!(readout.index, 6);
    }
}
