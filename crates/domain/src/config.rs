pub mod database;
pub mod errors;
pub mod history;
pub mod ledger;
pub mod logging;
pub mod resolution;
pub mod root;
pub mod server;
pub mod sync;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use history::HistoryConfig;
pub use ledger::LedgerConfig;
pub use logging::LoggingConfig;
pub use resolution::{ResolutionConfig, ResolutionMode};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use sync::SyncConfig;
