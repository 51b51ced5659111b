//! Vote tallying
//!
//! Delegated weight is recomputed from scratch at every epoch transition:
//! a candidate's score is the sum of its delegators' instantaneous ledger
//! balances, at unbounded precision.

use std::collections::BTreeMap;
use tidemark_core::{Address, ChainState, TidemarkError, TidemarkResult, Weight};

use crate::engine::EpochContext;

impl<S: ChainState> EpochContext<'_, S> {
    /// Tally delegated votes for every registered candidate
    ///
    /// Every candidate in the index appears in the result, zero-weighted
    /// when nobody delegates to it. An empty candidate index is fatal: an
    /// election with no candidates has no meaningful outcome. Pure read.
    pub fn count_votes(&self) -> TidemarkResult<BTreeMap<Address, Weight>> {
        let candidates = self.state.candidates()?;
        if candidates.is_empty() {
            return Err(TidemarkError::NoCandidates);
        }

        let mut votes = BTreeMap::new();
        for candidate in candidates {
            let mut score = Weight::default();
            for delegator in self.state.delegators_of(&candidate)? {
                score += self.state.balance_of(&delegator)?;
            }
            votes.insert(candidate, score);
        }
        Ok(votes)
    }
}
