mod axis_config;
mod axis_label_format;
mod axis_labels;
mod engine;
mod engine_config;
mod engine_snapshot;
mod label_cache;
mod legend;
mod plot_series;
mod render_coordinator;
mod series_renderer;
mod snapshot_controller;

pub use axis_config::{AxisLabelLocale, AxisSlot, GridStyle, LabelAxis, LegendAlign};
pub use axis_label_format::{
    LabelFormatterFn, adaptive_fraction_digits, fixed_fraction_digits_formatter,
    format_adaptive_label, format_axis_decimal, format_readout_value, utc_date_time_formatter,
};
pub use axis_labels::{
    AxisLabel, LABEL_MEASURE_FRACTION, LabelFormatter, auto_horizontal_label_count,
    auto_vertical_label_count, generate_horizontal_labels, generate_vertical_labels,
    label_offsets, label_values, resolve_label_count,
};
pub use engine::ChartEngine;
pub use engine_config::{ChartColors, ChartConfig, LegendConfig};
pub use engine_snapshot::{ChartSnapshot, SeriesSnapshot};
pub use label_cache::LabelCacheStats;
pub use legend::{
    LegendBox, LegendRow, build_legend_rows, draw_legend, hairline_data_x, legend_box,
    readout_text,
};
pub use plot_series::{
    ChartStyle, PlotSeries, PointReadout, Series, SeriesAppearance, SeriesFrame, SeriesId,
    ValueColorFn,
};
pub use render_coordinator::{RenderLayout, RenderStats};
pub use series_renderer::{
    BarRenderer, CandlestickRenderer, DotRenderer, LineRenderer, SeriesRenderContext,
    SeriesRenderer,
};
