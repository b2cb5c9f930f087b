pub mod sync_ledger;

pub use sync_ledger::SyncLedgerUseCase;
