use super::LedgerClients;
use ledger_dns_application::ports::KeyValueStore;
use ledger_dns_application::services::RecordIndex;
use ledger_dns_application::use_cases::{
    MergeIssuanceUseCase, ResolveZoneRecordsUseCase, SyncLedgerUseCase,
};
use ledger_dns_domain::{Config, ResolutionMode};
use std::sync::Arc;
use tracing::info;

pub struct UseCases {
    pub sync_ledger: Arc<SyncLedgerUseCase>,
    pub resolve_zone_records: Arc<ResolveZoneRecordsUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, store: Arc<dyn KeyValueStore>, clients: &LedgerClients) -> Self {
        let index = RecordIndex::new(store);
        let merge = Arc::new(MergeIssuanceUseCase::new(index.clone()));

        let resolve_zone_records = match config.resolution.mode {
            ResolutionMode::Indexed => ResolveZoneRecordsUseCase::indexed(index.clone()),
            ResolutionMode::Live => {
                ResolveZoneRecordsUseCase::live(clients.history.clone(), config.history.max_pages)
            }
        };
        info!(mode = %config.resolution.mode, "Resolution mode selected");

        Self {
            sync_ledger: Arc::new(SyncLedgerUseCase::new(
                clients.rpc.clone(),
                index,
                merge,
                config.ledger.initial_cursor(),
            )),
            resolve_zone_records: Arc::new(resolve_zone_records),
        }
    }
}
