use async_trait::async_trait;
use ledger_dns_domain::{DomainError, IssuancePage};

/// Paginated read API over an asset's issuance history. Pages start at 1.
#[async_trait]
pub trait IssuanceHistory: Send + Sync {
    async fn fetch_page(&self, asset: &str, page: u32) -> Result<IssuancePage, DomainError>;
}
