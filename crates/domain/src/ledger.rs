use serde::{Deserialize, Serialize};

pub const ISSUANCES_CATEGORY: &str = "issuances";

/// Answer to `get_running_info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunningInfo {
    #[serde(default)]
    pub db_caught_up: bool,
    /// Null while the indexer is still bootstrapping.
    #[serde(default)]
    pub bitcoin_block_count: Option<u64>,
}

/// One entry of `get_messages`; `bindings` is JSON encoded as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LedgerMessage {
    pub category: String,
    pub bindings: String,
    #[serde(default)]
    pub message_index: Option<u64>,
}

impl LedgerMessage {
    pub fn new(category: impl Into<String>, bindings: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            bindings: bindings.into(),
            message_index: None,
        }
    }

    pub fn is_issuance(&self) -> bool {
        self.category == ISSUANCES_CATEGORY
    }
}

/// The subset of issuance bindings this service reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Issuance {
    pub asset: String,
    pub description: String,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub block_index: Option<u64>,
}

impl Issuance {
    pub fn new(asset: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            description: description.into(),
            tx_hash: None,
            block_index: None,
        }
    }
}

/// Issuance as returned by the history read API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoricIssuance {
    #[serde(default)]
    pub description: String,
}

/// One page of `GET /issuances/{asset}/{page}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IssuancePage {
    #[serde(default)]
    pub data: Vec<HistoricIssuance>,
    #[serde(default)]
    pub total: u64,
}
