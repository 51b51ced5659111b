//! TIDEMARK Consensus Engine
//!
//! Epoch transition and validator election for delegated proof of stake:
//! - Delegated vote tallying over the candidate index
//! - Activity-based validator eviction behind a safety floor
//! - Deterministic ranking and shuffling of the elected set
//! - Producer-turn lookup by block timestamp

pub mod engine;
pub mod eviction;
pub mod ordering;
pub mod shuffle;
pub mod tally;

pub use engine::*;
pub use ordering::*;
pub use shuffle::*;
