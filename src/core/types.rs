use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

/// Pixel extents of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Read capabilities every stored sample exposes.
///
/// `y_low`/`y_high` are the extremes that contribute to axis autoscaling;
/// for plain points both are `y`. `ohlc` is only `Some` for candle samples.
pub trait SeriesPoint: Copy + Send + Sync + 'static {
    /// Whether this point kind carries open/high/low/close values.
    const HAS_OHLC: bool = false;

    fn x(&self) -> f64;
    fn y(&self) -> f64;

    fn y_low(&self) -> f64 {
        self.y()
    }

    fn y_high(&self) -> f64 {
        self.y()
    }

    fn ohlc(&self) -> Option<Ohlc> {
        None
    }
}

/// Open/high/low/close quadruple read from a candle sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn try_new(x: f64, y: f64) -> ChartResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(
                "data point coordinates must be finite".to_owned(),
            ));
        }
        Ok(Self { x, y })
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Self::try_new(datetime_to_unix_seconds(time), decimal_to_f64(value, "value")?)
    }
}

impl SeriesPoint for DataPoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}
