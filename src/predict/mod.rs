use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::shared::{ConfidenceScore, PredictionHorizon};

pub mod error;

use error::{PredictError, Result};

/// A forward-looking price estimate produced by a [`Predictor`].
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub horizon: PredictionHorizon,
    pub prediction_date: DateTime<Utc>,
    pub predicted_price: f64,
    pub confidence: ConfidenceScore,
    pub model_version: String,
}

/// Pluggable prediction model boundary.
///
/// Implementations receive the asset's current price and a horizon, and return a price
/// estimate with a bounded confidence and an opaque model version tag. The platform treats
/// the model as an external collaborator: nothing beyond this contract is assumed.
pub trait Predictor: Send + Sync {
    /// Produces a prediction for one horizon, anchored at `now`.
    fn predict(
        &self,
        current_price: f64,
        horizon: PredictionHorizon,
        now: DateTime<Utc>,
    ) -> Result<PredictionOutcome>;
}

/// Baseline model: a bounded random walk around the current price.
///
/// Drifts the price by a uniform ±[0.5%, 5%] step and reports a uniform confidence in
/// [0.65, 0.95]. Stands in until a real model is plugged behind [`Predictor`].
#[derive(Debug, Clone)]
pub struct RandomWalkPredictor {
    model_version: String,
}

impl RandomWalkPredictor {
    const MIN_DRIFT_PCT: f64 = 0.5;
    const MAX_DRIFT_PCT: f64 = 5.0;

    const MIN_CONFIDENCE: f64 = 0.65;
    const MAX_CONFIDENCE: f64 = 0.95;

    pub fn new() -> Self {
        Self {
            model_version: "v1.0-random".to_string(),
        }
    }

    /// Model version tag stamped on every outcome.
    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// Like [`Predictor::predict`], but drawing from the given RNG.
    pub fn predict_with_rng<R: Rng>(
        &self,
        current_price: f64,
        horizon: PredictionHorizon,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<PredictionOutcome> {
        if !current_price.is_finite() || current_price <= 0. {
            return Err(PredictError::InvalidCurrentPrice(current_price));
        }

        let drift_pct = rng.random_range(Self::MIN_DRIFT_PCT..=Self::MAX_DRIFT_PCT);
        let direction = if rng.random_bool(0.5) { 1. } else { -1. };

        let predicted_price = current_price * (1. + direction * drift_pct / 100.);

        let confidence = rng.random_range(Self::MIN_CONFIDENCE..=Self::MAX_CONFIDENCE);
        let confidence = ConfidenceScore::try_from(confidence)
            .expect("drawn confidence is within the valid range");

        Ok(PredictionOutcome {
            horizon,
            prediction_date: now + Duration::days(horizon.as_days()),
            predicted_price,
            confidence,
            model_version: self.model_version.clone(),
        })
    }
}

impl Default for RandomWalkPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor for RandomWalkPredictor {
    fn predict(
        &self,
        current_price: f64,
        horizon: PredictionHorizon,
        now: DateTime<Utc>,
    ) -> Result<PredictionOutcome> {
        self.predict_with_rng(current_price, horizon, now, &mut rand::rng())
    }
}

#[cfg(test)]
mod tests;
