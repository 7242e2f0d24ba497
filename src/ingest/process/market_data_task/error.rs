use std::{num::NonZeroU64, result};

use thiserror::Error;

use marketfeed_sdk::error::{CandleSeriesError, RestApiError};

use crate::db::error::DbError;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("ProviderMaxTrialsReached error: error {error}, trials {trials}")]
    ProviderMaxTrialsReached {
        error: RestApiError,
        trials: NonZeroU64,
    },

    #[error("[Provider] {0}")]
    Provider(#[from] RestApiError),

    #[error("[CandleSeries] {0}")]
    CandleSeries(#[from] CandleSeriesError),

    #[error("[Db] {0}")]
    Db(#[from] DbError),
}

pub(super) type Result<T> = result::Result<T, MarketDataError>;
