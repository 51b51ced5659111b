//! Core traits defining TIDEMARK interfaces
//!
//! These traits model the authenticated chain indices the election engine
//! consumes. The host supplies an already-opened view with exclusive access
//! for the duration of block processing, so every method is synchronous and
//! takes `&self`; implementations that need interior mutability manage it
//! themselves. Iteration order must be deterministic and identical across
//! nodes: ascending raw key bytes.

use crate::types::*;

/// Result type for TIDEMARK operations
pub type TidemarkResult<T> = Result<T, crate::error::TidemarkError>;

/// Ordered index of registered validator candidates
pub trait CandidateIndex {
    /// All registered candidates, in ascending address order
    fn candidates(&self) -> TidemarkResult<Vec<Address>>;

    /// Count candidates, scanning at most `cap` entries
    ///
    /// Callers that only need to know whether the pool clears a floor use
    /// this instead of a full walk.
    fn count_candidates(&self, cap: usize) -> TidemarkResult<usize>;

    /// Whether an address is currently registered as a candidate
    fn contains_candidate(&self, candidate: &Address) -> TidemarkResult<bool>;

    /// Remove a candidate from the index (eviction or withdrawal)
    fn remove_candidate(&self, candidate: &Address) -> TidemarkResult<()>;
}

/// Candidate-prefixed index of delegations
pub trait DelegationIndex {
    /// Delegators backing a candidate, in ascending address order
    fn delegators_of(&self, candidate: &Address) -> TidemarkResult<Vec<Address>>;
}

/// Per-epoch block production counters
pub trait MintCountStore {
    /// Blocks the validator produced during the epoch; zero when no record
    fn mint_count(&self, epoch: EpochId, validator: &Address) -> TidemarkResult<MintCount>;

    /// Whether any validator has a production record for the epoch
    fn has_mint_records(&self, epoch: EpochId) -> TidemarkResult<bool>;

    /// Record one produced block; returns the updated count
    ///
    /// Written by the block-seal path, not by the election engine.
    fn increment_mint(&self, epoch: EpochId, validator: &Address) -> TidemarkResult<MintCount>;
}

/// The persisted, ordered validator set
pub trait ValidatorSetStore {
    /// Current validator set in rotation order
    fn validators(&self) -> TidemarkResult<Vec<Address>>;

    /// Replace the whole set for the given epoch
    ///
    /// A full replace, never a merge; implementations also recreate their
    /// head-of-epoch lookup structure here.
    fn set_validators(&self, epoch: EpochId, validators: Vec<Address>) -> TidemarkResult<()>;
}

/// Read-only view of account balances
pub trait LedgerState {
    /// Current balance, used as instantaneous voting weight; zero when the
    /// account is unknown
    fn balance_of(&self, address: &Address) -> TidemarkResult<Weight>;
}

/// The full ledger view an epoch transition operates over
pub trait ChainState:
    CandidateIndex + DelegationIndex + MintCountStore + ValidatorSetStore + LedgerState
{
}

impl<T> ChainState for T where
    T: CandidateIndex + DelegationIndex + MintCountStore + ValidatorSetStore + LedgerState
{
}
