use std::sync::{Arc, Mutex};

use tokio::{sync::broadcast, time};

use marketfeed_sdk::{crypto, news, stocks};

use crate::{db::Database, predict::Predictor, util::AbortOnDropHandle};

use super::{
    config::{IngestConfig, IngestControllerConfig},
    error::{IngestError, Result},
    process::IngestProcess,
    state::{
        IngestReader, IngestReceiver, IngestStatus, IngestStatusManager, IngestTransmitter,
        IngestUpdate,
    },
};

/// The set of provider clients the ingestion tasks draw from.
#[derive(Clone)]
pub struct ProviderSet {
    pub stocks: Arc<stocks::RestClient>,
    pub crypto: Arc<crypto::RestClient>,
    pub news: Arc<news::RestClient>,
}

/// How the ingestion process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMode {
    /// Run a single cycle, then report [`IngestStatus::Completed`].
    OneShot,
    /// Cycle forever, pausing `cycle_interval` between cycles.
    ///
    /// A single supervised loop owns the cycles, so runs never overlap.
    Continuous,
}

/// Owns a running ingestion process: status access and graceful shutdown.
#[derive(Debug)]
pub struct IngestController {
    config: IngestControllerConfig,
    handle: Mutex<Option<AbortOnDropHandle<()>>>,
    shutdown_tx: broadcast::Sender<()>,
    status_manager: Arc<IngestStatusManager>,
}

impl IngestController {
    fn new(
        config: &IngestConfig,
        handle: AbortOnDropHandle<()>,
        shutdown_tx: broadcast::Sender<()>,
        status_manager: Arc<IngestStatusManager>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config: config.into(),
            handle: Mutex::new(Some(handle)),
            shutdown_tx,
            status_manager,
        })
    }

    pub fn reader(&self) -> Arc<dyn IngestReader> {
        self.status_manager.clone()
    }

    pub fn update_receiver(&self) -> IngestReceiver {
        self.status_manager.update_receiver()
    }

    pub fn status_snapshot(&self) -> IngestStatus {
        self.status_manager.status_snapshot()
    }

    fn try_consume_handle(&self) -> Option<AbortOnDropHandle<()>> {
        self.handle
            .lock()
            .expect("`IngestController` mutex can't be poisoned")
            .take()
    }

    /// Tries to perform a clean shutdown of the ingestion process and consumes the task
    /// handle. If a clean shutdown fails, the process is aborted.
    /// This method can only be called once per controller instance.
    /// Returns an error if the process had to be aborted, or if the handle was already
    /// consumed.
    pub async fn shutdown(&self) -> Result<()> {
        let Some(mut handle) = self.try_consume_handle() else {
            return Err(IngestError::IngestAlreadyShutdown);
        };

        self.status_manager.update(IngestStatus::ShutdownInitiated);

        let shutdown_send_res = self.shutdown_tx.send(()).map_err(|e| {
            handle.abort();
            IngestError::SendShutdownFailed(e)
        });

        let shutdown_res = match shutdown_send_res {
            Ok(_) => {
                tokio::select! {
                    join_res = &mut handle => {
                        join_res.map_err(IngestError::TaskJoin)
                    }
                    _ = time::sleep(self.config.shutdown_timeout()) => {
                        handle.abort();
                        Err(IngestError::ShutdownTimeout)
                    }
                }
            }
            Err(e) => Err(e),
        };

        self.status_manager.update(IngestStatus::Shutdown);

        shutdown_res
    }
}

/// Supervised background worker: fetches market data and news, recomputes stats and
/// refreshes predictions on a cycle.
///
/// Build one with a [`Database`], a [`ProviderSet`] and a [`Predictor`], then [`start`] it
/// to obtain an [`IngestController`].
///
/// [`start`]: IngestEngine::start
pub struct IngestEngine {
    config: IngestConfig,
    db: Arc<Database>,
    providers: ProviderSet,
    predictor: Arc<dyn Predictor>,
    mode: IngestMode,
    status_manager: Arc<IngestStatusManager>,
    update_tx: IngestTransmitter,
}

impl IngestEngine {
    pub fn new(
        config: impl Into<IngestConfig>,
        db: Arc<Database>,
        providers: ProviderSet,
        predictor: Arc<dyn Predictor>,
        mode: IngestMode,
    ) -> Self {
        let (update_tx, _) = broadcast::channel::<IngestUpdate>(100);

        let status_manager = IngestStatusManager::new(update_tx.clone());

        Self {
            config: config.into(),
            db,
            providers,
            predictor,
            mode,
            status_manager,
            update_tx,
        }
    }

    pub fn reader(&self) -> Arc<dyn IngestReader> {
        self.status_manager.clone()
    }

    pub fn update_receiver(&self) -> IngestReceiver {
        self.status_manager.update_receiver()
    }

    pub fn status_snapshot(&self) -> IngestStatus {
        self.status_manager.status_snapshot()
    }

    pub fn start(self) -> Arc<IngestController> {
        // Internal channel for shutdown signal
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        let handle = IngestProcess::spawn(
            &self.config,
            self.db,
            self.providers,
            self.predictor,
            self.mode,
            shutdown_tx.clone(),
            self.status_manager.clone(),
            self.update_tx,
        );

        IngestController::new(&self.config, handle, shutdown_tx, self.status_manager)
    }
}
