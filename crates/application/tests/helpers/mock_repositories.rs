#![allow(dead_code)]

use async_trait::async_trait;
use ledger_dns_application::ports::{IssuanceHistory, KeyValueStore, LedgerRpc};
use ledger_dns_domain::{
    DomainError, HistoricIssuance, IssuancePage, LedgerMessage, RunningInfo,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MockKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    failing_reads: Arc<RwLock<HashSet<String>>>,
    failing_writes: Arc<RwLock<HashSet<String>>>,
    put_count: Arc<AtomicU64>,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            failing_reads: Arc::new(RwLock::new(HashSet::new())),
            failing_writes: Arc::new(RwLock::new(HashSet::new())),
            put_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn insert(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn fail_reads_for(&self, key: &str) {
        self.failing_reads.write().await.insert(key.to_string());
    }

    pub async fn fail_writes_for(&self, key: &str) {
        self.failing_writes.write().await.insert(key.to_string());
    }

    pub async fn heal(&self) {
        self.failing_reads.write().await.clear();
        self.failing_writes.write().await.clear();
    }

    pub fn put_count(&self) -> u64 {
        self.put_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl KeyValueStore for MockKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        if self.failing_reads.read().await.contains(key) {
            return Err(DomainError::DatabaseError(format!("read failed for {}", key)));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), DomainError> {
        if self.failing_writes.read().await.contains(key) {
            return Err(DomainError::DatabaseError(format!("write failed for {}", key)));
        }
        self.put_count.fetch_add(1, Ordering::Relaxed);
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
    fetched: Arc<RwLock<Vec<u64>>>,
    should_fail: Arc<RwLock<bool>>,
    info_calls: Arc<AtomicU64>,
}

impl MockLedgerRpc {
    pub fn new() -> Self {
        Self {
            info: Arc::new(RwLock::new(RunningInfo::default())),
            blocks: Arc::new(RwLock::new(HashMap::new())),
            fetched: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(RwLock::new(false)),
            info_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn at_height(height: u64) -> Self {
        let mock = Self::new();
        mock.info.try_write().unwrap().db_caught_up = true;
        mock.info.try_write().unwrap().bitcoin_block_count = Some(height);
        mock
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

    pub async fn fetched_heights(&self) -> Vec<u64> {
        self.fetched.read().await.clone()
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
        self.fetched.write().await.push(height);
        Ok(self
            .blocks
            .read()
            .await
            .get(&height)
            .cloned()
            .unwrap_or_default())
    }
}

pub struct MockIssuanceHistory {
    descriptions: Arc<RwLock<HashMap<String, Vec<String>>>>,
    page_size: usize,
    declared_total: Arc<RwLock<Option<u64>>>,
    page_calls: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockIssuanceHistory {
    pub fn new(page_size: usize) -> Self {
        Self {
            descriptions: Arc::new(RwLock::new(HashMap::new())),
            page_size,
            declared_total: Arc::new(RwLock::new(None)),
            page_calls: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_history(&self, asset: &str, descriptions: &[&str]) {
        self.descriptions.write().await.insert(
            asset.to_string(),
            descriptions.iter().map(|d| d.to_string()).collect(),
        );
    }

    /// Override the `total` reported on every page.
    pub async fn declare_total(&self, total: u64) {
        *self.declared_total.write().await = Some(total);
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub fn page_calls(&self) -> u64 {
        self.page_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl IssuanceHistory for MockIssuanceHistory {
    async fn fetch_page(&self, asset: &str, page: u32) -> Result<IssuancePage, DomainError> {
        self.page_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::HistoryApi("HTTP 503".to_string()));
        }

        let all = self
            .descriptions
            .read()
            .await
            .get(asset)
            .cloned()
            .unwrap_or_default();
        let start = (page.saturating_sub(1) as usize) * self.page_size;
        let data = all
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|d| HistoricIssuance {
                description: d.clone(),
            })
            .collect();
        let total = self
            .declared_total
            .read()
            .await
            .unwrap_or(all.len() as u64);

        Ok(IssuancePage { data, total })
    }
}

pub fn issuance_message(asset: &str, description: &str) -> LedgerMessage {
    let bindings = serde_json::json!({
        "asset": asset,
        "description": description,
        "tx_hash": format!("{}-{}", asset, description.len()),
    });
    LedgerMessage::new("issuances", bindings.to_string())
}

pub fn other_message(category: &str) -> LedgerMessage {
    LedgerMessage::new(category, r#"{"source":"mxyz"}"#)
}
