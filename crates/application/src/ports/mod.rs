mod issuance_history;
mod key_value_store;
mod ledger_rpc;

pub use issuance_history::IssuanceHistory;
pub use key_value_store::KeyValueStore;
pub use ledger_rpc::LedgerRpc;
