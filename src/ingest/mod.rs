mod config;
mod engine;
pub(crate) mod error;
pub(crate) mod process;
mod state;

pub use config::IngestConfig;
pub use engine::{IngestController, IngestEngine, IngestMode, ProviderSet};
pub use state::{
    CycleState, IngestReader, IngestReceiver, IngestStatus, IngestStatusNotReady, IngestUpdate,
};
