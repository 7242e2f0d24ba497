use std::result;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Generic error, {0}")]
    Generic(String),

    #[error("Ingest shutdown failed: {0}")]
    IngestShutdownFailed(crate::ingest::error::IngestError),
}

pub(crate) type Result<T> = result::Result<T, TuiError>;
