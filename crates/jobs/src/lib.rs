pub mod ledger_sync;
pub mod runner;

pub use ledger_sync::{Backoff, LedgerSyncJob};
pub use runner::JobRunner;
