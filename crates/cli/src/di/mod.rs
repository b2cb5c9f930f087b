mod clients;
mod use_cases;

pub use clients::LedgerClients;
pub use use_cases::UseCases;
