use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::core::{CoordinateMapper, Ohlc, SeriesPoint};
use crate::error::{ChartError, ChartResult};

/// Widest candle body in pixels, whatever the available column width.
pub const MAX_CANDLE_BODY_WIDTH_PX: f64 = 8.0;

/// OHLC sample. Its `y` is the close value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub x: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl CandlePoint {
    /// Builds a validated candle.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(x: f64, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        if !x.is_finite()
            || !open.is_finite()
            || !high.is_finite()
            || !low.is_finite()
            || !close.is_finite()
        {
            return Err(ChartError::InvalidData(
                "candle values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(ChartError::InvalidData(
                "candle low must be <= high".to_owned(),
            ));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "candle open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            x,
            open,
            high,
            low,
            close,
        })
    }

    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}

impl SeriesPoint for CandlePoint {
    const HAS_OHLC: bool = true;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.close
    }

    fn y_low(&self) -> f64 {
        self.low
    }

    fn y_high(&self) -> f64 {
        self.high
    }

    fn ohlc(&self) -> Option<Ohlc> {
        Some(Ohlc {
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        })
    }
}

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub center_x: f64,
    pub body_width: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_width: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

/// Body width for `count` candles sharing `available_width` pixels, capped at
/// [`MAX_CANDLE_BODY_WIDTH_PX`] so sparse data does not stretch candles.
#[must_use]
pub fn candle_body_width(available_width: f64, count: usize) -> f64 {
    if count == 0 {
        return MAX_CANDLE_BODY_WIDTH_PX;
    }
    (available_width / count as f64).clamp(0.0, MAX_CANDLE_BODY_WIDTH_PX)
}

/// Projects windowed samples into candle geometry. Samples without OHLC
/// values are skipped.
#[must_use]
pub fn project_candles<P: SeriesPoint>(points: &[P], mapper: &CoordinateMapper) -> Vec<CandleGeometry> {
    let body_width = candle_body_width(mapper.area().width, points.len());

    #[cfg(feature = "parallel-projection")]
    {
        points
            .par_iter()
            .filter_map(|point| project_single_candle(point, mapper, body_width))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        points
            .iter()
            .filter_map(|point| project_single_candle(point, mapper, body_width))
            .collect()
    }
}

fn project_single_candle<P: SeriesPoint>(
    point: &P,
    mapper: &CoordinateMapper,
    body_width: f64,
) -> Option<CandleGeometry> {
    let ohlc = point.ohlc()?;
    let open_y = mapper.y_to_pixel(ohlc.open);
    let close_y = mapper.y_to_pixel(ohlc.close);

    Some(CandleGeometry {
        center_x: mapper.x_to_pixel(point.x()),
        body_width,
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_width: body_width / 4.0,
        wick_top: mapper.y_to_pixel(ohlc.high),
        wick_bottom: mapper.y_to_pixel(ohlc.low),
        is_bullish: ohlc.is_bullish(),
    })
}
