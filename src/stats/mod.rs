use std::collections::VecDeque;

pub mod error;

use error::{Result, StatsError};

/// Technical stats recomputed for an asset from its daily close series.
///
/// Each field is `None` until its evaluator has seen enough samples to fill its window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AssetStatsValues {
    pub volatility: Option<f64>,
    pub rsi: Option<f64>,
    pub ma_50: Option<f64>,
    pub ma_200: Option<f64>,
}

/// Incremental simple moving average over a fixed window.
struct MovingAverageEvaluator {
    window: VecDeque<f64>,
    sum: f64,
    period: usize,
}

impl MovingAverageEvaluator {
    fn new(period: usize) -> Self {
        Self {
            window: VecDeque::new(),
            sum: 0.,
            period,
        }
    }

    fn update(&mut self, value: f64) -> Option<f64> {
        self.sum += value;
        self.window.push_back(value);

        if self.window.len() > self.period {
            let removed = self.window.pop_front().expect("window can't be empty");
            self.sum -= removed;
        }

        if self.window.len() == self.period {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }
}

/// Incremental Relative Strength Index with Wilder smoothing.
struct RsiEvaluator {
    period: usize,
    prev_close: Option<f64>,
    avg_gain: f64,
    avg_loss: f64,
    deltas_seen: usize,
}

impl RsiEvaluator {
    fn new(period: usize) -> Self {
        Self {
            period,
            prev_close: None,
            avg_gain: 0.,
            avg_loss: 0.,
            deltas_seen: 0,
        }
    }

    fn update(&mut self, close: f64) -> Option<f64> {
        let Some(prev_close) = self.prev_close.replace(close) else {
            return None;
        };

        let delta = close - prev_close;
        let gain = delta.max(0.);
        let loss = (-delta).max(0.);

        self.deltas_seen += 1;

        if self.deltas_seen <= self.period {
            // Seed phase: plain average of the first `period` deltas
            self.avg_gain += gain / self.period as f64;
            self.avg_loss += loss / self.period as f64;

            if self.deltas_seen < self.period {
                return None;
            }
        } else {
            let period = self.period as f64;
            self.avg_gain = (self.avg_gain * (period - 1.) + gain) / period;
            self.avg_loss = (self.avg_loss * (period - 1.) + loss) / period;
        }

        if self.avg_loss == 0. {
            return Some(100.);
        }

        let rs = self.avg_gain / self.avg_loss;
        Some(100. - 100. / (1. + rs))
    }
}

/// Incremental volatility: standard deviation of simple returns over a trailing window.
struct VolatilityEvaluator {
    returns: VecDeque<f64>,
    prev_close: Option<f64>,
    window: usize,
}

impl VolatilityEvaluator {
    const MIN_RETURNS: usize = 2;

    fn new(window: usize) -> Self {
        Self {
            returns: VecDeque::new(),
            prev_close: None,
            window,
        }
    }

    fn update(&mut self, close: f64) -> Option<f64> {
        if let Some(prev_close) = self.prev_close.replace(close) {
            self.returns.push_back(close / prev_close - 1.);

            if self.returns.len() > self.window {
                self.returns.pop_front();
            }
        }

        if self.returns.len() < Self::MIN_RETURNS {
            return None;
        }

        let n = self.returns.len() as f64;
        let mean = self.returns.iter().sum::<f64>() / n;
        let variance = self
            .returns
            .iter()
            .map(|r| (r - mean) * (r - mean))
            .sum::<f64>()
            / n;

        Some(variance.sqrt())
    }
}

/// Evaluates the full stats set for one asset from its close series, oldest first.
pub struct AssetStatsEvaluator;

impl AssetStatsEvaluator {
    /// RSI period.
    pub const RSI_PERIOD: usize = 14;

    /// Short moving-average window.
    pub const MA_SHORT_PERIOD: usize = 50;

    /// Long moving-average window.
    pub const MA_LONG_PERIOD: usize = 200;

    /// Trailing return window for the volatility estimate.
    pub const VOLATILITY_WINDOW: usize = 30;

    /// Number of closes that saturates every evaluator window.
    pub const FULL_WINDOW: usize = Self::MA_LONG_PERIOD;

    /// Evaluates stats over `closes`, ordered oldest first.
    ///
    /// Closes must be positive finite numbers; the series itself may be shorter than the
    /// evaluator windows, in which case the corresponding fields are `None`.
    pub fn evaluate(closes: &[f64]) -> Result<AssetStatsValues> {
        if closes.is_empty() {
            return Err(StatsError::EmptyInput);
        }

        let mut ma_short = MovingAverageEvaluator::new(Self::MA_SHORT_PERIOD);
        let mut ma_long = MovingAverageEvaluator::new(Self::MA_LONG_PERIOD);
        let mut rsi = RsiEvaluator::new(Self::RSI_PERIOD);
        let mut volatility = VolatilityEvaluator::new(Self::VOLATILITY_WINDOW);

        let mut values = AssetStatsValues::default();

        for (index, &close) in closes.iter().enumerate() {
            if !close.is_finite() {
                return Err(StatsError::NonFiniteClose { index });
            }
            if close <= 0. {
                return Err(StatsError::NonPositiveClose {
                    index,
                    value: close,
                });
            }

            values.ma_50 = ma_short.update(close).or(values.ma_50);
            values.ma_200 = ma_long.update(close).or(values.ma_200);
            values.rsi = rsi.update(close).or(values.rsi);
            values.volatility = volatility.update(close).or(values.volatility);
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests;
