use std::sync::Arc;

use chrono::Utc;
use futures::TryFutureExt;
use tokio::{sync::broadcast, time};

use crate::{
    db::Database,
    predict::Predictor,
    util::{AbortOnDropHandle, Never},
};

use super::{
    config::{IngestConfig, IngestProcessConfig},
    engine::{IngestMode, ProviderSet},
    state::{CycleState, IngestStatus, IngestStatusManager, IngestStatusNotReady, IngestTransmitter},
};

pub(crate) mod analytics_task;
pub(crate) mod error;
pub(crate) mod market_data_task;
pub(crate) mod news_feed_task;

use analytics_task::AnalyticsTask;
use error::{IngestProcessError, IngestProcessFatalError, IngestProcessRecoverableError, Result};
use market_data_task::MarketDataTask;
use news_feed_task::NewsFeedTask;

pub(super) struct IngestProcess {
    config: IngestProcessConfig,
    db: Arc<Database>,
    providers: ProviderSet,
    predictor: Arc<dyn Predictor>,
    mode: IngestMode,
    shutdown_tx: broadcast::Sender<()>,
    status_manager: Arc<IngestStatusManager>,
    update_tx: IngestTransmitter,
}

impl IngestProcess {
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        config: &IngestConfig,
        db: Arc<Database>,
        providers: ProviderSet,
        predictor: Arc<dyn Predictor>,
        mode: IngestMode,
        shutdown_tx: broadcast::Sender<()>,
        status_manager: Arc<IngestStatusManager>,
        update_tx: IngestTransmitter,
    ) -> AbortOnDropHandle<()> {
        let config = config.into();

        tokio::spawn(async move {
            let process = Self {
                config,
                db,
                providers,
                predictor,
                mode,
                shutdown_tx,
                status_manager,
                update_tx,
            };

            process.recovery_loop().await
        })
        .into()
    }

    async fn recovery_loop(self) {
        self.status_manager
            .update(IngestStatusNotReady::Starting.into());

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut cycle_state = CycleState::default();

        loop {
            let run_res = tokio::select! {
                run_res = self.run_mode(&mut cycle_state) => run_res,
                shutdown_res = shutdown_rx.recv() => {
                    let Err(e) = shutdown_res else {
                        // Shutdown signal received
                        return;
                    };

                    Err(IngestProcessFatalError::ShutdownSignalRecv(e).into())
                }
            };

            match run_res {
                Ok(()) => {
                    // One-shot run finished its single cycle
                    self.status_manager.update(IngestStatus::Completed);
                    return;
                }
                Err(IngestProcessError::Fatal(err)) => {
                    self.status_manager.update(err.into());
                    return;
                }
                Err(IngestProcessError::Recoverable(err)) => {
                    self.status_manager.update(err.into());
                }
            }

            // Handle shutdown signals while waiting for `restart_interval`

            tokio::select! {
                _ = time::sleep(self.config.restart_interval()) => {} // Loop restarts
                shutdown_res = shutdown_rx.recv() => {
                    if let Err(e) = shutdown_res {
                        let status = IngestProcessFatalError::ShutdownSignalRecv(e).into();
                        self.status_manager.update(status);
                    }
                    return;
                }
            }

            self.status_manager
                .update(IngestStatusNotReady::Restarting.into());
        }
    }

    /// Runs the configured mode. Returns `Ok(())` only for a completed one-shot run;
    /// continuous mode cycles until an error or shutdown.
    async fn run_mode(&self, cycle_state: &mut CycleState) -> Result<()> {
        match self.mode {
            IngestMode::OneShot => {
                self.run_cycle(cycle_state).await?;
                self.status_manager.update(IngestStatus::Ready);

                Ok(())
            }
            IngestMode::Continuous => match self.run_continuous(cycle_state).await {
                Ok(never) => match never {},
                Err(e) => Err(e),
            },
        }
    }

    async fn run_continuous(&self, cycle_state: &mut CycleState) -> Result<Never> {
        loop {
            self.run_cycle(cycle_state).await?;
            self.status_manager.update(IngestStatus::Ready);

            time::sleep(self.config.cycle_interval()).await;
        }
    }

    async fn run_cycle(&self, cycle_state: &mut CycleState) -> Result<()> {
        if cycle_state.completed_cycles == 0 {
            self.status_manager
                .update(IngestStatusNotReady::CycleInProgress.into());
        }

        let assets = self
            .db
            .assets
            .list_all()
            .await
            .map_err(IngestProcessRecoverableError::Db)?;

        cycle_state.begin_cycle(Utc::now(), assets.len());
        self.send_cycle_state(cycle_state);

        // Market data and news touch different providers and tables, so they run
        // concurrently; analytics needs the fresh prices and runs after.

        let market_data_fut = MarketDataTask::new(
            &self.config,
            self.db.clone(),
            self.providers.stocks.clone(),
            self.providers.crypto.clone(),
        )
        .run(&assets)
        .map_err(IngestProcessRecoverableError::MarketData);

        let news_feed_fut =
            NewsFeedTask::new(&self.config, self.db.clone(), self.providers.news.clone())
                .run(&assets)
                .map_err(IngestProcessRecoverableError::NewsFeed);

        let (market_data_report, news_feed_report) =
            futures::try_join!(market_data_fut, news_feed_fut)?;

        cycle_state.prices_stored = market_data_report.prices_stored;
        cycle_state.assets_skipped = market_data_report.assets_skipped;
        cycle_state.backfilled_assets = market_data_report.backfilled_assets;
        cycle_state.articles_fetched = news_feed_report.articles_fetched;
        cycle_state.articles_stored = news_feed_report.articles_stored;
        cycle_state.sentiments_stored = news_feed_report.sentiments_stored;
        self.send_cycle_state(cycle_state);

        let analytics_report = AnalyticsTask::new(&self.config, self.db.clone(), self.predictor.clone())
            .run(&assets)
            .await
            .map_err(IngestProcessRecoverableError::Analytics)?;

        cycle_state.stats_updated = analytics_report.stats_updated;
        cycle_state.predictions_stored = analytics_report.predictions_stored;

        cycle_state.complete_cycle();
        self.send_cycle_state(cycle_state);

        Ok(())
    }

    fn send_cycle_state(&self, cycle_state: &CycleState) {
        // Ignore no-receivers errors
        let _ = self.update_tx.send(cycle_state.clone().into());
    }
}
