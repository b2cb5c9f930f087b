#![allow(dead_code)]

use async_trait::async_trait;
use ledger_dns_application::ports::{KeyValueStore, LedgerRpc};
use ledger_dns_domain::{DomainError, LedgerMessage, RunningInfo};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MockKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MockKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct MockLedgerRpc {
    info: Arc<RwLock<RunningInfo>>,
    blocks: Arc<RwLock<HashMap<u64, Vec<LedgerMessage>>>>,
    should_fail: Arc<RwLock<bool>>,
    info_calls: Arc<AtomicU64>,
}

impl MockLedgerRpc {
    pub fn new() -> Self {
        Self {
            info: Arc::new(RwLock::new(RunningInfo::default())),
            blocks: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(RwLock::new(false)),
            info_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn set_running_info(&self, caught_up: bool, height: Option<u64>) {
        *self.info.write().await = RunningInfo {
            db_caught_up: caught_up,
            bitcoin_block_count: height,
        };
    }

    pub async fn add_block(&self, height: u64, messages: Vec<LedgerMessage>) {
        self.blocks.write().await.insert(height, messages);
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub fn info_calls(&self) -> u64 {
        self.info_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LedgerRpc for MockLedgerRpc {
    async fn running_info(&self) -> Result<RunningInfo, DomainError> {
        self.info_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::LedgerUnavailable("connection refused".to_string()));
        }
        Ok(self.info.read().await.clone())
    }

    async fn block_messages(&self, height: u64) -> Result<Vec<LedgerMessage>, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::LedgerUnavailable("connection refused".to_string()));
        }
        Ok(self
            .blocks
            .read()
            .await
            .get(&height)
            .cloned()
            .unwrap_or_default())
    }
}

pub fn issuance_message(asset: &str, description: &str) -> LedgerMessage {
    let bindings = serde_json::json!({
        "asset": asset,
        "description": description,
    });
    LedgerMessage::new("issuances", bindings.to_string())
}
