use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Prefix of `GET {base_url}{asset}/{page}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on pages fetched per asset.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_base_url() -> String {
    "https://testnet.counterpartychain.io/api/issuances/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_pages() -> u32 {
    1000
}
