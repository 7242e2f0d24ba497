use std::result;

use thiserror::Error;

use crate::{db::error::DbError, predict::error::PredictError, stats::error::StatsError};

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("[Stats] {0}")]
    Stats(#[from] StatsError),

    #[error("[Predict] {0}")]
    Predict(#[from] PredictError),

    #[error("[Db] {0}")]
    Db(#[from] DbError),
}

pub(super) type Result<T> = result::Result<T, AnalyticsError>;
