use async_trait::async_trait;
use ledger_dns_domain::{DomainError, LedgerMessage, RunningInfo};

#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// `get_running_info`: chain height and indexer catch-up state.
    async fn running_info(&self) -> Result<RunningInfo, DomainError>;

    /// `get_messages` for a single block.
    async fn block_messages(&self, height: u64) -> Result<Vec<LedgerMessage>, DomainError>;
}
