//! Synthetic ledger seeding: a random round generator and a batched
//! loader that writes generated rounds with bounded concurrency.

pub mod generator;
pub mod loader;

pub use generator::TransactionGenerator;
pub use loader::{BatchLoader, LoadReport};
