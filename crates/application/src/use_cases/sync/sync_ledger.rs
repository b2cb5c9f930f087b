use crate::ports::LedgerRpc;
use crate::services::{filter_issuances, RecordIndex};
use crate::use_cases::zones::MergeIssuanceUseCase;
use futures::future::join_all;
use ledger_dns_domain::{BlockReport, DomainError, Issuance, SyncOutcome};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Issuances already applied, per asset, for a block that has not committed.
#[derive(Debug, Default)]
struct PendingBlock {
    height: u64,
    applied: HashMap<String, usize>,
}

#[derive(Debug, Default)]
struct GroupResult {
    applied: usize,
    merged: usize,
    rejected: usize,
    failed: usize,
}

/// Use case: advance the record index by at most one ledger block.
///
/// Blocks are taken strictly in height order. The cursor only moves once
/// every merge of the block has either succeeded or been rejected for good,
/// so a block hit by a store outage is retried on the next call. Issuances
/// applied before the outage are not applied a second time by that retry.
pub struct SyncLedgerUseCase {
    ledger: Arc<dyn LedgerRpc>,
    index: RecordIndex,
    merge: Arc<MergeIssuanceUseCase>,
    initial_cursor: u64,
    pending: Mutex<PendingBlock>,
}

impl SyncLedgerUseCase {
    /// `initial_cursor` is the cursor assumed before any block was processed.
    pub fn new(
        ledger: Arc<dyn LedgerRpc>,
        index: RecordIndex,
        merge: Arc<MergeIssuanceUseCase>,
        initial_cursor: u64,
    ) -> Self {
        Self {
            ledger,
            index,
            merge,
            initial_cursor,
            pending: Mutex::new(PendingBlock::default()),
        }
    }

    pub async fn run_iteration(&self) -> Result<SyncOutcome, DomainError> {
        let cursor = self.index.cursor(self.initial_cursor).await?;
        let info = self.ledger.running_info().await?;

        if !info.db_caught_up {
            debug!(cursor, "Ledger indexer catching up");
            return Ok(SyncOutcome::CatchingUp);
        }

        let chain_height = match info.bitcoin_block_count {
            Some(h) => h,
            None => return Ok(SyncOutcome::CatchingUp),
        };

        if cursor >= chain_height {
            return Ok(SyncOutcome::Idle { cursor });
        }

        let height = cursor + 1;
        let report = self.process_block(height).await?;
        self.index.advance_cursor(cursor, height).await?;

        if report.issuances > 0 {
            info!(
                height,
                issuances = report.issuances,
                merged = report.merged,
                malformed = report.malformed,
                rejected = report.rejected,
                "Block processed"
            );
        } else {
            debug!(height, messages = report.messages, "Block processed");
        }

        Ok(SyncOutcome::Processed(report))
    }

    async fn process_block(&self, height: u64) -> Result<BlockReport, DomainError> {
        let messages = self.ledger.block_messages(height).await?;
        let filtered = filter_issuances(&messages);

        for bad in &filtered.malformed {
            warn!(
                height,
                message_index = ?bad.message_index,
                reason = %bad.reason,
                "Skipping issuance with unreadable bindings"
            );
        }

        let mut report = BlockReport {
            height,
            messages: messages.len(),
            issuances: filtered.issuances.len(),
            malformed: filtered.malformed.len(),
            ..BlockReport::default()
        };

        let mut pending = self.pending.lock().await;
        if pending.height != height {
            *pending = PendingBlock {
                height,
                applied: HashMap::new(),
            };
        }

        // Different assets merge concurrently; one asset's issuances stay in
        // ledger order so its document is never written by two tasks at once.
        let mut by_asset: BTreeMap<&str, Vec<&Issuance>> = BTreeMap::new();
        for issuance in &filtered.issuances {
            by_asset.entry(issuance.asset.as_str()).or_default().push(issuance);
        }

        let groups: Vec<_> = by_asset
            .into_iter()
            .map(|(asset, issuances)| {
                let skip = pending
                    .applied
                    .get(asset)
                    .map_or(0, |&applied| applied.min(issuances.len()));
                (asset, issuances, skip)
            })
            .collect();

        let results = join_all(groups.iter().map(|(asset, issuances, skip)| async move {
            (*asset, self.merge_sequentially(height, &issuances[*skip..]).await)
        }))
        .await;

        let mut failed = 0;
        for (asset, result) in results {
            report.merged += result.merged;
            report.rejected += result.rejected;
            failed += result.failed;
            *pending.applied.entry(asset.to_string()).or_default() += result.applied;
        }

        if failed > 0 {
            return Err(DomainError::BlockIncomplete { height, failed });
        }

        pending.applied.clear();
        Ok(report)
    }

    async fn merge_sequentially(&self, height: u64, issuances: &[&Issuance]) -> GroupResult {
        let mut result = GroupResult::default();

        for issuance in issuances {
            match self.merge.execute(issuance).await {
                Ok(Some(_)) => result.merged += 1,
                Ok(None) => {}
                Err(e) if e.is_transient() => {
                    result.failed += 1;
                    warn!(
                        height,
                        asset = %issuance.asset,
                        tx_hash = ?issuance.tx_hash,
                        error = %e,
                        "Issuance merge failed, block will be retried"
                    );
                    // Later issuances of this asset wait for the block retry
                    // so the document keeps ledger order.
                    break;
                }
                Err(e) => {
                    result.rejected += 1;
                    error!(
                        height,
                        asset = %issuance.asset,
                        tx_hash = ?issuance.tx_hash,
                        error = %e,
                        "Issuance rejected"
                    );
                }
            }
            result.applied += 1;
        }

        result
    }
}
