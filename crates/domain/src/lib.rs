//! Ledger DNS Domain Layer
pub mod config;
pub mod description;
pub mod errors;
pub mod ledger;
pub mod record_directive;
pub mod sync;
pub mod zone;

pub use config::{CliOverrides, Config, ResolutionMode};
pub use description::{decode_description, DescriptionError};
pub use errors::DomainError;
pub use ledger::{HistoricIssuance, Issuance, IssuancePage, LedgerMessage, RunningInfo};
pub use record_directive::{RecordDirective, StoredDirective, ZoneDocument};
pub use sync::{BlockReport, SyncOutcome};
pub use zone::{QueryType, ZoneName, ZoneQuery};
