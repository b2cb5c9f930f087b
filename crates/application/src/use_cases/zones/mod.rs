pub mod merge_issuance;

pub use merge_issuance::MergeIssuanceUseCase;
