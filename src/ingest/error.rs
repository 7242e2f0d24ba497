use std::result;

use thiserror::Error;
use tokio::{sync::broadcast::error::SendError, task::JoinError};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Ingest engine was already shut down")]
    IngestAlreadyShutdown,

    #[error("Failed to send ingest shutdown signal error: {0}")]
    SendShutdownFailed(SendError<()>),

    #[error("[IngestTaskJoin] {0}")]
    TaskJoin(JoinError),

    #[error("Ingest shutdown timeout error")]
    ShutdownTimeout,
}

pub(crate) type Result<T> = result::Result<T, IngestError>;
