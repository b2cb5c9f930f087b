//! Ledger DNS Infrastructure Layer
pub mod database;
pub mod dns;
pub mod ledger;
pub mod repositories;
