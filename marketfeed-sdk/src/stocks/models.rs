use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Real-time quote for a single stock symbol.
///
/// Field names follow the provider's compact wire format: `c` is the current price, `o`/`h`/`l`
/// the session open/high/low, `pc` the previous close and `t` the quote timestamp.
#[derive(Deserialize, Debug, Clone)]
pub struct StockQuote {
    c: f64,
    h: f64,
    l: f64,
    o: f64,
    pc: f64,
    t: i64,
}

impl StockQuote {
    /// Current price.
    pub fn current(&self) -> f64 {
        self.c
    }

    /// Session high price.
    pub fn high(&self) -> f64 {
        self.h
    }

    /// Session low price.
    pub fn low(&self) -> f64 {
        self.l
    }

    /// Session open price.
    pub fn open(&self) -> f64 {
        self.o
    }

    /// Previous session close price.
    pub fn prev_close(&self) -> f64 {
        self.pc
    }

    /// Quote timestamp, if the provider reported a valid one.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.t, 0)
    }

    /// Percent change versus the previous close, if the previous close is non-zero.
    pub fn percent_change(&self) -> Option<f64> {
        if self.pc == 0. {
            return None;
        }

        Some((self.c - self.pc) / self.pc * 100.)
    }

    /// Returns `true` if the quote carries no usable price.
    ///
    /// The provider reports unknown symbols as all-zero quotes rather than an error status.
    pub fn is_empty(&self) -> bool {
        self.c == 0. && self.t == 0
    }
}

impl fmt::Display for StockQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stock Quote: current {}, open {}, high {}, low {}, prev close {}",
            self.c, self.o, self.h, self.l, self.pc
        )
    }
}

/// Candle resolution accepted by the candle endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandleResolution {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    OneDay,
}

impl fmt::Display for CandleResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CandleResolution::OneMinute => "1",
            CandleResolution::FiveMinutes => "5",
            CandleResolution::FifteenMinutes => "15",
            CandleResolution::ThirtyMinutes => "30",
            CandleResolution::OneHour => "60",
            CandleResolution::OneDay => "D",
        };

        write!(f, "{}", s)
    }
}

#[derive(Error, Debug)]
pub enum CandleSeriesError {
    #[error("Provider reported candle status `{status}`")]
    NotOk { status: String },

    #[error("Candle arrays have mismatched lengths")]
    ArrayLenMismatch,

    #[error("Candle timestamp {0} is not a valid time")]
    InvalidTimestamp(i64),
}

/// A single OHLCV candle assembled from the provider's parallel arrays.
#[derive(Debug, Clone)]
pub struct StockCandle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Historical candle response in the provider's parallel-array wire format.
///
/// `s` is a status flag (`"ok"` or `"no_data"`); the remaining arrays are index-aligned.
#[derive(Deserialize, Debug, Clone)]
pub struct StockCandleSeries {
    s: String,
    #[serde(default)]
    t: Vec<i64>,
    #[serde(default)]
    o: Vec<f64>,
    #[serde(default)]
    h: Vec<f64>,
    #[serde(default)]
    l: Vec<f64>,
    #[serde(default)]
    c: Vec<f64>,
    #[serde(default)]
    v: Vec<i64>,
}

impl StockCandleSeries {
    /// Provider status flag.
    pub fn status(&self) -> &str {
        &self.s
    }

    /// Returns `true` if the provider reported data for the requested range.
    pub fn is_ok(&self) -> bool {
        self.s == "ok"
    }

    /// Assembles the parallel arrays into [`StockCandle`] values, oldest first.
    pub fn try_into_candles(self) -> Result<Vec<StockCandle>, CandleSeriesError> {
        if !self.is_ok() {
            return Err(CandleSeriesError::NotOk { status: self.s });
        }

        let len = self.t.len();
        if [&self.o, &self.h, &self.l, &self.c].iter().any(|v| v.len() != len)
            || self.v.len() != len
        {
            return Err(CandleSeriesError::ArrayLenMismatch);
        }

        let mut candles = Vec::with_capacity(len);
        for i in 0..len {
            let time = DateTime::from_timestamp(self.t[i], 0)
                .ok_or(CandleSeriesError::InvalidTimestamp(self.t[i]))?;

            candles.push(StockCandle {
                time,
                open: self.o[i],
                high: self.h[i],
                low: self.l[i],
                close: self.c[i],
                volume: self.v[i],
            });
        }

        Ok(candles)
    }
}
