use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt document under key {key}: {reason}")]
    CorruptDocument { key: String, reason: String },

    #[error("Sync cursor cannot move backwards (current {current}, attempted {attempted})")]
    CursorRegression { current: u64, attempted: u64 },

    /// Only raised for store failures that may clear on their own.
    #[error("Block {height} incomplete: {failed} merge(s) failed")]
    BlockIncomplete { height: u64, failed: usize },

    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),

    #[error("Ledger RPC error {code}: {message}")]
    LedgerRpc { code: i64, message: String },

    #[error("Invalid ledger response: {0}")]
    InvalidLedgerResponse(String),

    #[error("Issuance history API error: {0}")]
    HistoryApi(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Upstream failures worth retrying on the next loop turn.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::LedgerUnavailable(_)
                | DomainError::HistoryApi(_)
                | DomainError::QueryTimeout
                | DomainError::DatabaseError(_)
                | DomainError::BlockIncomplete { .. }
        )
    }
}
