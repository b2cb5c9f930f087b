use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Pause between two iterations of the sync loop.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Ceiling for the exponential backoff applied while the ledger indexer
    /// is catching up or unreachable.
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
}

impl SyncConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_interval_ms: default_min_interval_ms(),
            max_backoff_secs: default_max_backoff_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_min_interval_ms() -> u64 {
    250
}

fn default_max_backoff_secs() -> u64 {
    60
}
