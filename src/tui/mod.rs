use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::{Arc, Mutex},
    time::Duration,
};

use ratatui::crossterm::event::{self, Event, KeyCode};
use tokio::{
    sync::{OnceCell, broadcast::error::RecvError, mpsc},
    task, time,
};

use crate::{
    ingest::{IngestController, IngestEngine, IngestReceiver, IngestUpdate},
    util::AbortOnDropHandle,
};

mod error;
mod status;
mod terminal;
mod view;

use error::Result;
use status::TuiStatusManager;
use terminal::TuiTerminal;
use view::DashboardView;

pub use error::TuiError;
pub use status::{TuiStatus, TuiStatusStopped};

/// Configuration for the dashboard TUI.
#[derive(Clone, Debug)]
pub struct DashboardTuiConfig {
    event_check_interval: Duration,
    max_tui_log_len: usize,
    shutdown_timeout: Duration,
}

impl Default for DashboardTuiConfig {
    fn default() -> Self {
        Self {
            event_check_interval: Duration::from_millis(50),
            max_tui_log_len: 10_000,
            shutdown_timeout: Duration::from_secs(6),
        }
    }
}

impl DashboardTuiConfig {
    pub fn event_check_interval(&self) -> Duration {
        self.event_check_interval
    }

    pub fn max_tui_log_len(&self) -> usize {
        self.max_tui_log_len
    }

    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }

    pub fn with_event_check_interval(mut self, millis: u64) -> Self {
        self.event_check_interval = Duration::from_millis(millis);
        self
    }

    pub fn with_max_tui_log_len(mut self, len: usize) -> Self {
        self.max_tui_log_len = len;
        self
    }

    pub fn with_shutdown_timeout(mut self, secs: u64) -> Self {
        self.shutdown_timeout = Duration::from_secs(secs);
        self
    }
}

#[derive(Debug)]
enum UiMessage {
    LogEntry(String),
    StateUpdate(String),
    ShutdownCompleted,
}

/// Terminal dashboard showing the ingest engine's state and log.
///
/// Launch it first, then [`couple`](DashboardTui::couple) an [`IngestEngine`]; the TUI owns
/// the resulting controller and shuts the engine down when the user quits.
pub struct DashboardTui {
    event_check_interval: Duration,
    shutdown_timeout: Duration,
    status_manager: Arc<TuiStatusManager>,
    // Retain ownership to ensure `TuiTerminal` destructor is executed when
    // `DashboardTui` is dropped.
    _tui_terminal: Arc<TuiTerminal>,
    ui_tx: mpsc::Sender<UiMessage>,
    // Explicitly aborted on drop, to ensure the terminal is restored before
    // `DashboardTui`'s drop is completed.
    ui_task_handle: Arc<Mutex<Option<AbortOnDropHandle<()>>>>,
    _shutdown_listener_handle: AbortOnDropHandle<()>,
    ingest_controller: Arc<OnceCell<Arc<IngestController>>>,
    ingest_update_listener_handle: OnceCell<AbortOnDropHandle<()>>,
}

impl DashboardTui {
    async fn run_ui(
        event_check_interval: Duration,
        tui_view: Arc<DashboardView>,
        terminal: Arc<TuiTerminal>,
        mut ui_rx: mpsc::Receiver<UiMessage>,
        shutdown_tx: mpsc::Sender<()>,
    ) -> Result<()> {
        let handle_ui_message = |msg: UiMessage, view: &DashboardView| -> Result<bool> {
            match msg {
                UiMessage::LogEntry(entry) => {
                    view.add_log_entry(entry)?;
                    Ok(false)
                }
                UiMessage::StateUpdate(state) => {
                    view.update_ingest_state(state);
                    Ok(false)
                }
                UiMessage::ShutdownCompleted => Ok(true),
            }
        };

        loop {
            task::yield_now().await;
            terminal.draw(&tui_view)?;

            if let Ok(message) = ui_rx.try_recv() {
                let is_shutdown_completed = handle_ui_message(message, &tui_view)?;
                if is_shutdown_completed {
                    return Ok(());
                }
            }

            if event::poll(event_check_interval).map_err(|e| TuiError::Generic(e.to_string()))? {
                if let Event::Key(key) =
                    event::read().map_err(|e| TuiError::Generic(e.to_string()))?
                {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => {
                            tui_view.add_log_entry("'q' pressed".to_string())?;

                            shutdown_tx.send(()).await.map_err(|e| {
                                TuiError::Generic(format!(
                                    "Failed to send TUI shutdown signal {:?}",
                                    e
                                ))
                            })?;

                            break;
                        }
                        KeyCode::Up => tui_view.scroll_up(),
                        KeyCode::Down => tui_view.scroll_down(),
                        KeyCode::Left => tui_view.scroll_left(),
                        KeyCode::Right => tui_view.scroll_right(),
                        KeyCode::Char('t') | KeyCode::Char('T') => tui_view.reset_scroll(),
                        KeyCode::Char('b') | KeyCode::Char('B') => tui_view.scroll_to_bottom(),
                        KeyCode::Tab => tui_view.switch_pane(),
                        _ => {}
                    }
                }
            }
        }

        loop {
            terminal.draw(&tui_view)?;
            time::sleep(event_check_interval).await;

            if let Ok(message) = ui_rx.try_recv() {
                let is_shutdown_completed = handle_ui_message(message, &tui_view)?;
                if is_shutdown_completed {
                    return Ok(());
                }
            }
        }
    }

    fn spawn_ui_task(
        event_check_interval: Duration,
        tui_view: Arc<DashboardView>,
        status_manager: Arc<TuiStatusManager>,
        terminal: Arc<TuiTerminal>,
        ui_rx: mpsc::Receiver<UiMessage>,
        shutdown_tx: mpsc::Sender<()>,
    ) -> Arc<Mutex<Option<AbortOnDropHandle<()>>>> {
        Arc::new(Mutex::new(Some(
            tokio::spawn(async move {
                if let Err(e) =
                    Self::run_ui(event_check_interval, tui_view, terminal, ui_rx, shutdown_tx).await
                {
                    status_manager.set_crashed(e);
                }
            })
            .into(),
        )))
    }

    async fn shutdown_inner(
        shutdown_timeout: Duration,
        status_manager: Arc<TuiStatusManager>,
        ui_task_handle: Arc<Mutex<Option<AbortOnDropHandle<()>>>>,
        ui_tx: mpsc::Sender<UiMessage>,
        ingest_controller: Option<Arc<IngestController>>,
    ) -> Result<()> {
        let Some(mut handle) = ui_task_handle
            .lock()
            .expect("`ui_task_handle` mutex can't be poisoned")
            .take()
        else {
            return Err(TuiError::Generic(
                "Dashboard TUI shutdown can only be run once".to_string(),
            ));
        };

        if handle.is_finished() {
            // Edge case. UI task crashed just after the shutdown signal was sent, or just
            // after the `DashboardTui::shutdown` guard. It can be assumed that the error
            // state is available in `TuiStatus`.

            let status_not_running = match status_manager.status() {
                // "Should Never Happen" case
                TuiStatus::Running => status_manager
                    .set_crashed(TuiError::Generic(
                        "UI task crashed without corresponding status update".to_string(),
                    ))
                    .into(),
                status_not_running => status_not_running,
            };

            return Err(TuiError::Generic(format!(
                "Tried to shutdown TUI that is not running: {:?}",
                status_not_running
            )));
        }

        status_manager.set_shutdown_initiated();

        let shutdown_procedure = async move || -> Result<()> {
            let shutdown_res = match ingest_controller {
                Some(controller) => controller
                    .shutdown()
                    .await
                    .map_err(TuiError::IngestShutdownFailed),
                None => Ok(()),
            };

            let ui_message_res = ui_tx.send(UiMessage::ShutdownCompleted).await.map_err(|e| {
                handle.abort();
                TuiError::Generic(format!("Failed to send shutdown confirmation, {e}"))
            });

            shutdown_res.and(ui_message_res)?;

            tokio::select! {
                join_res = &mut handle => {
                    join_res.map_err(|e| TuiError::Generic(e.to_string()))?;
                    Ok(())
                }
                _ = time::sleep(shutdown_timeout) => {
                    handle.abort();
                    Err(TuiError::Generic("Shutdown timeout".to_string()))
                }
            }
        };

        if let Err(e) = shutdown_procedure().await {
            let status_stopped = status_manager.set_crashed(e);
            Err(TuiError::Generic(format!(
                "Shutdown failed: {:?}",
                status_stopped
            )))
        } else {
            status_manager.set_shutdown();
            Ok(())
        }
    }

    fn spawn_shutdown_signal_listener(
        shutdown_timeout: Duration,
        status_manager: Arc<TuiStatusManager>,
        mut shutdown_rx: mpsc::Receiver<()>,
        ui_task_handle: Arc<Mutex<Option<AbortOnDropHandle<()>>>>,
        ui_tx: mpsc::Sender<UiMessage>,
        ingest_controller: Arc<OnceCell<Arc<IngestController>>>,
    ) -> AbortOnDropHandle<()> {
        tokio::spawn(async move {
            // If `shutdown_tx` is dropped, UI task is finished

            if shutdown_rx.recv().await.is_some() {
                let ingest_controller = ingest_controller.get().map(|inner_ref| inner_ref.clone());

                // Error handling via `TuiStatus`
                let _ = Self::shutdown_inner(
                    shutdown_timeout,
                    status_manager,
                    ui_task_handle,
                    ui_tx.clone(),
                    ingest_controller,
                )
                .await;
            }
        })
        .into()
    }

    pub async fn launch(config: DashboardTuiConfig, log_file_path: Option<&str>) -> Result<Self> {
        let log_file = log_file_path
            .map(|log_file_path| {
                if let Some(parent) = Path::new(log_file_path).parent() {
                    fs::create_dir_all(parent).map_err(|e| {
                        TuiError::Generic(format!("couldn't create log_file parent {}", e))
                    })?;
                }

                OpenOptions::new()
                    .read(true)
                    .append(true)
                    .create(true)
                    .open(log_file_path)
                    .map_err(|e| TuiError::Generic(format!("couldn't open the log file. {}", e)))
            })
            .transpose()?;

        let (ui_tx, ui_rx) = mpsc::channel::<UiMessage>(100);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(10);

        let tui_terminal = TuiTerminal::new()?;

        let tui_view = DashboardView::new(config.max_tui_log_len, log_file);

        let status_manager = TuiStatusManager::new_running(tui_view.clone());

        let ui_task_handle = Self::spawn_ui_task(
            config.event_check_interval,
            tui_view,
            status_manager.clone(),
            tui_terminal.clone(),
            ui_rx,
            shutdown_tx,
        );

        let ingest_controller = Arc::new(OnceCell::new());

        let _shutdown_listener_handle = Self::spawn_shutdown_signal_listener(
            config.shutdown_timeout,
            status_manager.clone(),
            shutdown_rx,
            ui_task_handle.clone(),
            ui_tx.clone(),
            ingest_controller.clone(),
        );

        Ok(Self {
            event_check_interval: config.event_check_interval,
            shutdown_timeout: config.shutdown_timeout,
            status_manager,
            _tui_terminal: tui_terminal,
            ui_tx,
            ui_task_handle,
            _shutdown_listener_handle,
            ingest_controller,
            ingest_update_listener_handle: OnceCell::new(),
        })
    }

    pub fn status(&self) -> TuiStatus {
        self.status_manager.status()
    }

    pub async fn log(&self, log_entry: impl Into<String>) -> Result<()> {
        self.status_manager.require_running()?;

        // An error here would be an edge case

        self.ui_tx
            .send(UiMessage::LogEntry(log_entry.into()))
            .await
            .map_err(|_| TuiError::Generic("TUI is not running".to_string()))
    }

    fn spawn_ingest_update_listener(
        status_manager: Arc<TuiStatusManager>,
        mut ingest_rx: IngestReceiver,
        ui_tx: mpsc::Sender<UiMessage>,
    ) -> AbortOnDropHandle<()> {
        tokio::spawn(async move {
            let handle_ingest_update = async |ingest_update: IngestUpdate| -> Result<()> {
                match ingest_update {
                    IngestUpdate::StatusChange(status) => {
                        ui_tx
                            .send(UiMessage::LogEntry(format!("Ingest status: {status}")))
                            .await
                            .map_err(|e| TuiError::Generic(e.to_string()))?;
                    }
                    IngestUpdate::CycleState(cycle_state) => {
                        ui_tx
                            .send(UiMessage::StateUpdate(cycle_state.summary()))
                            .await
                            .map_err(|e| TuiError::Generic(e.to_string()))?;
                    }
                }
                Ok(())
            };

            loop {
                match ingest_rx.recv().await {
                    Ok(ingest_update) => {
                        if let Err(e) = handle_ingest_update(ingest_update).await {
                            status_manager.set_crashed(e);
                            return;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        let log_msg = format!("Ingest updates lagged by {skipped} messages");
                        if let Err(e) = ui_tx.send(UiMessage::LogEntry(log_msg)).await {
                            status_manager.set_crashed(TuiError::Generic(e.to_string()));
                            return;
                        }

                        // Keep trying to receive
                    }
                    Err(e) => {
                        // `ingest_rx` is expected to be dropped during shutdown

                        let status = status_manager.status();
                        if status.is_shutdown_initiated() || status.is_shutdown() {
                            return;
                        }

                        status_manager.set_crashed(TuiError::Generic(format!(
                            "`ingest_rx` returned err {:?}",
                            e
                        )));

                        return;
                    }
                }
            }
        })
        .into()
    }

    /// Couples an [`IngestEngine`] to the dashboard and starts it.
    ///
    /// The TUI takes ownership of the resulting controller; quitting the dashboard shuts
    /// the engine down.
    pub fn couple(&self, engine: IngestEngine) -> Result<()> {
        if self.ingest_controller.initialized() {
            return Err(TuiError::Generic(
                "`ingest_engine` was already coupled".to_string(),
            ));
        }

        let ingest_rx = engine.update_receiver();

        let ingest_update_listener_handle = Self::spawn_ingest_update_listener(
            self.status_manager.clone(),
            ingest_rx,
            self.ui_tx.clone(),
        );

        let ingest_controller = engine.start();

        self.ingest_controller
            .set(ingest_controller)
            .map_err(|_| TuiError::Generic("Failed to set `ingest_controller`".to_string()))?;

        self.ingest_update_listener_handle
            .set(ingest_update_listener_handle)
            .map_err(|_| {
                TuiError::Generic("Failed to set `ingest_update_listener_handle`".to_string())
            })?;

        Ok(())
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.status_manager.require_running()?;

        let ingest_controller = self
            .ingest_controller
            .get()
            .map(|inner_ref| inner_ref.clone());

        Self::shutdown_inner(
            self.shutdown_timeout,
            self.status_manager.clone(),
            self.ui_task_handle.clone(),
            self.ui_tx.clone(),
            ingest_controller,
        )
        .await
    }

    pub async fn until_stopped(self) -> Arc<TuiStatusStopped> {
        loop {
            if let TuiStatus::Stopped(status_stopped) = self.status() {
                return status_stopped;
            }

            time::sleep(self.event_check_interval).await;
        }
    }
}

impl Drop for DashboardTui {
    fn drop(&mut self) {
        if let Some(ui_handle) = self
            .ui_task_handle
            .lock()
            .expect("`ui_task_handle` mutex can't be poisoned")
            .take()
        {
            ui_handle.abort();
        };
    }
}
