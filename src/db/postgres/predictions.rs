use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{predict::PredictionOutcome, shared::PredictionHorizon, util::DateTimeExt};

use super::super::{
    error::{DbError, Result},
    models::{PredictionViewRow, PricePredictionRow},
    repositories::PredictionsRepository,
};

const PREDICTION_COLUMNS: &str = "id, asset_id, horizon, prediction_date, predicted_price, \
                                  confidence, model_version, created_at";

pub(crate) struct PgPredictionsRepo {
    pool: Arc<Pool<Postgres>>,
}

impl PgPredictionsRepo {
    pub fn new(pool: Arc<Pool<Postgres>>) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &Pool<Postgres> {
        self.pool.as_ref()
    }
}

#[async_trait]
impl PredictionsRepository for PgPredictionsRepo {
    async fn upsert_prediction(
        &self,
        asset_id: Uuid,
        outcome: &PredictionOutcome,
    ) -> Result<PricePredictionRow> {
        // The idempotency key works at day granularity
        let target_day = outcome.prediction_date.floor_day();

        let row = sqlx::query_as::<_, PricePredictionRow>(&format!(
            r#"
                INSERT INTO price_predictions
                    (asset_id, horizon, prediction_date, predicted_price, confidence, model_version)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (asset_id, horizon, prediction_date) DO UPDATE
                SET predicted_price = EXCLUDED.predicted_price,
                    confidence = EXCLUDED.confidence,
                    model_version = EXCLUDED.model_version
                RETURNING {PREDICTION_COLUMNS}
            "#
        ))
        .bind(asset_id)
        .bind(outcome.horizon)
        .bind(target_day)
        .bind(outcome.predicted_price)
        .bind(outcome.confidence.as_f64())
        .bind(&outcome.model_version)
        .fetch_one(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(row)
    }

    async fn latest_for_asset(
        &self,
        asset_id: Uuid,
        allowed: &[PredictionHorizon],
    ) -> Result<Vec<PricePredictionRow>> {
        let allowed: Vec<String> = allowed.iter().map(|h| h.to_string()).collect();

        let rows = sqlx::query_as::<_, PricePredictionRow>(&format!(
            r#"
                SELECT DISTINCT ON (horizon) {PREDICTION_COLUMNS}
                FROM price_predictions
                WHERE asset_id = $1 AND horizon = ANY($2::text[])
                ORDER BY horizon, prediction_date DESC, created_at DESC
            "#
        ))
        .bind(asset_id)
        .bind(allowed)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<PricePredictionRow>> {
        let rows = sqlx::query_as::<_, PricePredictionRow>(&format!(
            r#"
                SELECT {PREDICTION_COLUMNS}
                FROM price_predictions
                ORDER BY created_at DESC
                LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }

    async fn record_view(&self, user_id: Uuid, prediction_id: Uuid) -> Result<PredictionViewRow> {
        let row = sqlx::query_as::<_, PredictionViewRow>(
            r#"
                INSERT INTO prediction_views (user_id, prediction_id)
                VALUES ($1, $2)
                RETURNING id, user_id, prediction_id, viewed_at
            "#,
        )
        .bind(user_id)
        .bind(prediction_id)
        .fetch_one(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(row)
    }

    async fn recent_views(&self, user_id: Uuid, limit: i64) -> Result<Vec<PredictionViewRow>> {
        let rows = sqlx::query_as::<_, PredictionViewRow>(
            r#"
                SELECT id, user_id, prediction_id, viewed_at
                FROM prediction_views
                WHERE user_id = $1
                ORDER BY viewed_at DESC
                LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }
}
