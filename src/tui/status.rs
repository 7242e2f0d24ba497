use std::sync::{Arc, Mutex};

use super::{
    error::{Result, TuiError},
    view::DashboardView,
};

#[derive(Debug)]
pub enum TuiStatusStopped {
    Crashed(TuiError),
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum TuiStatus {
    Running,
    ShutdownInitiated,
    Stopped(Arc<TuiStatusStopped>),
}

impl TuiStatus {
    pub fn is_crashed(&self) -> bool {
        if let TuiStatus::Stopped(ref status_stopped) = *self {
            if let TuiStatusStopped::Crashed(_) = status_stopped.as_ref() {
                return true;
            }
        }
        false
    }

    pub fn is_shutdown_initiated(&self) -> bool {
        matches!(self, TuiStatus::ShutdownInitiated)
    }

    pub fn is_shutdown(&self) -> bool {
        if let TuiStatus::Stopped(ref status_stopped) = *self {
            if let TuiStatusStopped::Shutdown = status_stopped.as_ref() {
                return true;
            }
        }
        false
    }
}

impl From<TuiStatusStopped> for TuiStatus {
    fn from(value: TuiStatusStopped) -> Self {
        Self::Stopped(Arc::new(value))
    }
}

impl From<Arc<TuiStatusStopped>> for TuiStatus {
    fn from(value: Arc<TuiStatusStopped>) -> Self {
        Self::Stopped(value)
    }
}

pub(super) struct TuiStatusManager {
    view: Arc<DashboardView>,
    status: Mutex<TuiStatus>,
}

impl TuiStatusManager {
    pub fn new_running(view: Arc<DashboardView>) -> Arc<Self> {
        Arc::new(Self {
            view,
            status: Mutex::new(TuiStatus::Running),
        })
    }

    pub fn status(&self) -> TuiStatus {
        self.status.lock().expect("not poisoned").clone()
    }

    fn set(&self, new_status: TuiStatus) {
        let mut status = self.status.lock().expect("not poisoned");

        if status.is_crashed() {
            // Don't overwrite 'crashed' status
            return;
        }

        let _ = self
            .view
            .add_log_entry(format!("TUI status: {:?}", new_status));

        *status = new_status
    }

    pub fn set_crashed(&self, error: TuiError) -> Arc<TuiStatusStopped> {
        let status_stopped = Arc::new(TuiStatusStopped::Crashed(error));
        self.set(status_stopped.clone().into());

        status_stopped
    }

    pub fn set_shutdown_initiated(&self) {
        self.set(TuiStatus::ShutdownInitiated);
    }

    pub fn set_shutdown(&self) {
        self.set(TuiStatusStopped::Shutdown.into());
    }

    pub fn require_running(&self) -> Result<()> {
        match self.status() {
            TuiStatus::Running => Ok(()),
            status_not_running => Err(TuiError::Generic(format!(
                "TUI is not running {:?}",
                status_not_running
            ))),
        }
    }
}
