pub mod dns;
pub mod sync;
pub mod zones;

// Re-export use cases
pub use dns::ResolveZoneRecordsUseCase;
pub use sync::SyncLedgerUseCase;
pub use zones::MergeIssuanceUseCase;
