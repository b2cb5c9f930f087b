use async_trait::async_trait;
use ledger_dns_domain::DomainError;

/// Durable string-to-string store shared by the sync job and the query path.
///
/// A missing key is `Ok(None)`. Any `Err` from `get` is a real read failure.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    async fn put(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
