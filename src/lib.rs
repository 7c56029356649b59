//! # casino-analytics
//!
//! Analytics over a casino transaction ledger: gross gaming revenue per
//! currency, daily wagered volume, and a player's wager percentile, plus a
//! synthetic ledger seeder for load and demo data.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── Aggregators (service/)        BatchLoader (seed/)
//!     │                      \             /
//!     ├── LedgerStore trait (persistence/)
//!     │
//!     └── PostgreSQL  |  in-memory ledger
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod seed;
pub mod service;
