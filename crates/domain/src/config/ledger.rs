use serde::{Deserialize, Serialize};

/// First block at which issuance descriptions carry zone directives.
/// Earlier blocks are never scanned.
pub const DEFAULT_ACTIVATION_HEIGHT: u64 = 1_150_000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    #[serde(default = "default_rpc_username")]
    pub rpc_username: String,

    #[serde(default = "default_rpc_password")]
    pub rpc_password: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_activation_height")]
    pub activation_height: u64,
}

impl LedgerConfig {
    /// Cursor value used before the first block has been processed.
    pub fn initial_cursor(&self) -> u64 {
        self.activation_height.saturating_sub(1)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            rpc_username: default_rpc_username(),
            rpc_password: default_rpc_password(),
            request_timeout_secs: default_request_timeout_secs(),
            activation_height: default_activation_height(),
        }
    }
}

fn default_rpc_url() -> String {
    "http://localhost:14000/api/".to_string()
}

fn default_rpc_username() -> String {
    "rpc".to_string()
}

fn default_rpc_password() -> String {
    "rpc".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_activation_height() -> u64 {
    DEFAULT_ACTIVATION_HEIGHT
}
