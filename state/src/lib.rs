//! TIDEMARK Epoch Ledger View
//!
//! Models the authenticated chain indices as an ordered, prefix-scannable
//! key-value store: candidate registry, delegations, per-epoch mint counts,
//! account balances, and the persisted validator set.

pub mod memory;
pub mod store;

pub use memory::*;
pub use store::*;
