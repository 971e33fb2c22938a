//! graph-view: interactive 2D chart engine.
//!
//! Hosts line, bar, dot and candlestick series over a pannable/zoomable x
//! viewport with an optional secondary y axis, axis labels, grid and legend.
//! Drawing goes through the backend-agnostic [`render::DrawingSurface`]
//! trait; series data uses copy-on-write publication so producers may append
//! from other threads while the chart renders.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEngine, ChartStyle, Series};
pub use error::{ChartError, ChartResult};
