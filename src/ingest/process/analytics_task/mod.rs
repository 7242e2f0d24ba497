use std::sync::Arc;

use chrono::Utc;

use crate::{
    db::{Database, models::AssetRow},
    predict::Predictor,
    shared::PredictionHorizon,
    stats::AssetStatsEvaluator,
};

use super::super::config::{AnalyticsTaskConfig, IngestProcessConfig};

pub(crate) mod error;

use error::Result;

/// Outcome counters of one analytics pass over the catalog.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AnalyticsReport {
    pub stats_updated: usize,
    pub predictions_stored: usize,
}

pub(super) struct AnalyticsTask {
    config: AnalyticsTaskConfig,
    db: Arc<Database>,
    predictor: Arc<dyn Predictor>,
}

impl AnalyticsTask {
    pub fn new(
        config: &IngestProcessConfig,
        db: Arc<Database>,
        predictor: Arc<dyn Predictor>,
    ) -> Self {
        Self {
            config: config.into(),
            db,
            predictor,
        }
    }

    /// Recomputes stats and refreshes per-horizon predictions for every asset with stored
    /// price history. Assets without history are skipped until the market-data task has fed
    /// them.
    pub async fn run(self, assets: &[AssetRow]) -> Result<AnalyticsReport> {
        let mut report = AnalyticsReport::default();

        let lookback = self.config.stats_lookback().get() as i64;

        for asset in assets {
            let closes = self.db.prices.get_closes(asset.id, lookback).await?;

            let Some(&current_price) = closes.last() else {
                // No history yet; the market-data task will feed it on a later cycle
                continue;
            };

            let values = AssetStatsEvaluator::evaluate(&closes)?;
            self.db.stats.upsert_stats(asset.id, &values).await?;
            report.stats_updated += 1;

            let now = Utc::now();
            for horizon in PredictionHorizon::ALL {
                let outcome = self.predictor.predict(current_price, horizon, now)?;

                self.db.predictions.upsert_prediction(asset.id, &outcome).await?;
                report.predictions_stored += 1;
            }
        }

        Ok(report)
    }
}
