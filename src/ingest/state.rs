use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use crate::util::DateTimeExt;

use super::process::error::{IngestProcessFatalError, IngestProcessRecoverableError};

/// Ingestion status before the first cycle has completed, or after a recoverable failure.
#[derive(Debug)]
pub enum IngestStatusNotReady {
    NotInitiated,
    Starting,
    CycleInProgress,
    Failed(IngestProcessRecoverableError),
    Restarting,
}

/// Top-level status of the ingestion engine.
#[derive(Debug, Clone)]
pub enum IngestStatus {
    NotReady(Arc<IngestStatusNotReady>),
    /// At least one full cycle has been stored; read paths see fresh data.
    Ready,
    /// One-shot run finished its single cycle.
    Completed,
    FailedFatal(Arc<IngestProcessFatalError>),
    ShutdownInitiated,
    Shutdown,
}

impl From<IngestStatusNotReady> for IngestStatus {
    fn from(value: IngestStatusNotReady) -> Self {
        Self::NotReady(Arc::new(value))
    }
}

impl From<IngestProcessRecoverableError> for IngestStatus {
    fn from(value: IngestProcessRecoverableError) -> Self {
        IngestStatusNotReady::Failed(value).into()
    }
}

impl From<IngestProcessFatalError> for IngestStatus {
    fn from(value: IngestProcessFatalError) -> Self {
        Self::FailedFatal(Arc::new(value))
    }
}

impl fmt::Display for IngestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady(not_ready) => match not_ready.as_ref() {
                IngestStatusNotReady::NotInitiated => write!(f, "NotInitiated"),
                IngestStatusNotReady::Starting => write!(f, "Starting"),
                IngestStatusNotReady::CycleInProgress => write!(f, "CycleInProgress"),
                IngestStatusNotReady::Failed(e) => write!(f, "Failed - {e}"),
                IngestStatusNotReady::Restarting => write!(f, "Restarting"),
            },
            Self::Ready => write!(f, "Ready"),
            Self::Completed => write!(f, "Completed"),
            Self::FailedFatal(e) => write!(f, "FailedFatal - {e}"),
            Self::ShutdownInitiated => write!(f, "ShutdownInitiated"),
            Self::Shutdown => write!(f, "Shutdown"),
        }
    }
}

/// Progress counters for the current ingestion cycle, rendered by the state pane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleState {
    pub started_at: Option<DateTime<Utc>>,
    pub assets_total: usize,
    pub prices_stored: usize,
    pub assets_skipped: usize,
    pub backfilled_assets: usize,
    pub articles_fetched: usize,
    pub articles_stored: usize,
    pub sentiments_stored: usize,
    pub stats_updated: usize,
    pub predictions_stored: usize,
    pub completed_cycles: u64,
}

impl CycleState {
    /// Resets the per-cycle counters and stamps the new cycle start.
    pub(crate) fn begin_cycle(&mut self, now: DateTime<Utc>, assets_total: usize) {
        let completed_cycles = self.completed_cycles;

        *self = Self {
            started_at: Some(now),
            assets_total,
            completed_cycles,
            ..Self::default()
        };
    }

    pub(crate) fn complete_cycle(&mut self) {
        self.completed_cycles += 1;
    }

    /// Multi-line summary rendered by the dashboard's state pane.
    pub fn summary(&self) -> String {
        let started_str = match self.started_at {
            Some(started_at) => started_at.format_local_millis(),
            None => "-".to_string(),
        };

        format!(
            "cycle started: {started_str}\n\
             assets: {}\n\
             prices stored: {}\n\
             assets skipped: {}\n\
             backfilled assets: {}\n\
             articles fetched: {}\n\
             articles stored: {}\n\
             sentiments stored: {}\n\
             stats updated: {}\n\
             predictions stored: {}\n\
             completed cycles: {}",
            self.assets_total,
            self.prices_stored,
            self.assets_skipped,
            self.backfilled_assets,
            self.articles_fetched,
            self.articles_stored,
            self.sentiments_stored,
            self.stats_updated,
            self.predictions_stored,
            self.completed_cycles
        )
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cycle State:")?;
        for line in self.summary().lines() {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

/// Updates broadcast by the ingestion engine to its observers.
#[derive(Debug, Clone)]
pub enum IngestUpdate {
    StatusChange(IngestStatus),
    CycleState(CycleState),
}

impl From<IngestStatus> for IngestUpdate {
    fn from(value: IngestStatus) -> Self {
        Self::StatusChange(value)
    }
}

impl From<CycleState> for IngestUpdate {
    fn from(value: CycleState) -> Self {
        Self::CycleState(value)
    }
}

pub(crate) type IngestTransmitter = broadcast::Sender<IngestUpdate>;
pub type IngestReceiver = broadcast::Receiver<IngestUpdate>;

/// Read-only view of the ingestion engine's status and update stream.
pub trait IngestReader: Send + Sync + 'static {
    fn update_receiver(&self) -> IngestReceiver;
    fn status_snapshot(&self) -> IngestStatus;
}

#[derive(Debug)]
pub(crate) struct IngestStatusManager {
    status: Mutex<IngestStatus>,
    update_tx: IngestTransmitter,
}

impl IngestStatusManager {
    pub fn new(update_tx: IngestTransmitter) -> Arc<Self> {
        let status = Mutex::new(IngestStatusNotReady::NotInitiated.into());

        Arc::new(Self { status, update_tx })
    }

    fn update_status_guard(
        &self,
        mut status_guard: MutexGuard<'_, IngestStatus>,
        new_status: IngestStatus,
    ) {
        *status_guard = new_status.clone();
        drop(status_guard);

        // Ignore no-receivers errors
        let _ = self.update_tx.send(new_status.into());
    }

    pub fn update(&self, new_status: IngestStatus) {
        let status_guard = self
            .status
            .lock()
            .expect("`IngestStatusManager` mutex can't be poisoned");

        self.update_status_guard(status_guard, new_status);
    }
}

impl IngestReader for IngestStatusManager {
    fn update_receiver(&self) -> IngestReceiver {
        self.update_tx.subscribe()
    }

    fn status_snapshot(&self) -> IngestStatus {
        self.status
            .lock()
            .expect("`IngestStatusManager` mutex can't be poisoned")
            .clone()
    }
}
