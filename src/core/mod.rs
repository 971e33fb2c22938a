pub mod axis_range;
pub mod bar_series;
pub mod candlestick;
pub mod dot_series;
pub mod line_series;
pub mod notify;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod types;
pub mod viewport;
pub mod windowing;

pub use axis_range::{AxisRange, ManualAxisBounds, merge_extents, resolve_axis_range};
pub use bar_series::{BarGeometry, project_bars};
pub use candlestick::{
    CandleGeometry, CandlePoint, MAX_CANDLE_BODY_WIDTH_PX, candle_body_width, project_candles,
};
pub use dot_series::{DotGeometry, project_dots};
pub use line_series::{LineSegment, fill_polygon, project_vertices, segments_from_vertices};
pub use notify::RedrawSignal;
pub use scale::{CoordinateMapper, LinearScale, PlotArea, map_to_extent};
pub use series::{DataSeries, Window, check_value_order};
pub use types::{DataPoint, Ohlc, SeriesPoint, SurfaceSize};
pub use viewport::{DataBounds, Viewport, ViewportController};
pub use windowing::{window_bounds, window_bounds_linear, windowed_slice, y_extent};
