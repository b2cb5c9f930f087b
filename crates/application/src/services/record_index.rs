use crate::ports::KeyValueStore;
use ledger_dns_domain::{DomainError, ZoneDocument};
use std::sync::Arc;
use tracing::debug;

const CURSOR_KEY: &str = "sync:cursor";
const ZONE_KEY_PREFIX: &str = "zone:";

/// Typed view of the key/value store: per-asset zone documents plus the
/// sync cursor.
#[derive(Clone)]
pub struct RecordIndex {
    store: Arc<dyn KeyValueStore>,
}

impl RecordIndex {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn zone_key(asset: &str) -> String {
        format!("{}{}", ZONE_KEY_PREFIX, asset)
    }

    /// Document for `asset`, empty if none has been written yet.
    pub async fn load(&self, asset: &str) -> Result<ZoneDocument, DomainError> {
        let key = Self::zone_key(asset);
        match self.store.get(&key).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| DomainError::CorruptDocument {
                key,
                reason: e.to_string(),
            }),
            None => Ok(ZoneDocument::new()),
        }
    }

    pub async fn save(&self, asset: &str, document: &ZoneDocument) -> Result<(), DomainError> {
        let key = Self::zone_key(asset);
        let raw = serde_json::to_string(document).map_err(|e| DomainError::CorruptDocument {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.store.put(&key, &raw).await
    }

    /// Last fully processed block, or `default` before the first one.
    pub async fn cursor(&self, default: u64) -> Result<u64, DomainError> {
        match self.store.get(CURSOR_KEY).await? {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| DomainError::CorruptDocument {
                    key: CURSOR_KEY.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(default),
        }
    }

    /// Persist a new cursor. Moving it backwards is refused.
    pub async fn advance_cursor(&self, current: u64, height: u64) -> Result<(), DomainError> {
        if height < current {
            return Err(DomainError::CursorRegression {
                current,
                attempted: height,
            });
        }
        self.store.put(CURSOR_KEY, &height.to_string()).await?;
        debug!(cursor = height, "Sync cursor advanced");
        Ok(())
    }
}
