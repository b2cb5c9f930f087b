pub mod answer;
pub mod server;

pub use answer::compose_answers;
pub use server::LedgerDnsHandler;
