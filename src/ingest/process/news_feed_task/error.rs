use std::{num::NonZeroU64, result};

use thiserror::Error;

use marketfeed_sdk::error::RestApiError;

use crate::db::error::DbError;

#[derive(Error, Debug)]
pub enum NewsFeedError {
    #[error("ProviderMaxTrialsReached error: error {error}, trials {trials}")]
    ProviderMaxTrialsReached {
        error: RestApiError,
        trials: NonZeroU64,
    },

    #[error("News provider reported status `{status}`")]
    ProviderStatusNotSuccess { status: String },

    #[error("[Db] {0}")]
    Db(#[from] DbError),
}

pub(super) type Result<T> = result::Result<T, NewsFeedError>;
