//! Epoch transition engine
//!
//! One `EpochContext` is built per processed block. Block
//! production/verification asks it for the producer of the current slot,
//! and runs `try_elect` when the block's timestamp crosses one or more
//! epoch boundaries. All reads and writes go against the caller-supplied
//! ledger view; the engine holds no state of its own and performs no
//! locking.

use tidemark_core::{
    Address, BlockHeader, ChainState, DposConfig, EpochId, TidemarkError, TidemarkResult,
    Timestamp,
};
use tracing::info;

use crate::ordering::WeightedCandidate;
use crate::shuffle::{shuffle_seed, shuffle_validators};

/// Per-block election context over a chain state view
pub struct EpochContext<'a, S: ChainState> {
    pub(crate) timestamp: Timestamp,
    pub(crate) config: &'a DposConfig,
    pub(crate) state: &'a S,
}

impl<'a, S: ChainState> EpochContext<'a, S> {
    /// Create a context for the block being processed at `timestamp`
    pub fn new(timestamp: Timestamp, config: &'a DposConfig, state: &'a S) -> Self {
        Self {
            timestamp,
            config,
            state,
        }
    }

    /// Map a block timestamp to the validator whose turn it is
    ///
    /// Timestamps must land exactly on a producer slot boundary; the slot
    /// index then wraps around the persisted rotation order.
    pub fn lookup_validator(&self, now: Timestamp) -> TidemarkResult<Address> {
        let offset = now.as_secs() % self.config.epoch_interval;
        if offset % self.config.block_interval != 0 {
            return Err(TidemarkError::InvalidMintTime(now));
        }
        let slot = offset / self.config.block_interval;

        let validators = self.state.validators()?;
        if validators.is_empty() {
            return Err(TidemarkError::ValidatorLookupFailed);
        }
        Ok(validators[(slot % validators.len() as u64) as usize])
    }

    /// Run every epoch transition between the parent block and this context
    ///
    /// A no-op while both timestamps fall inside the same epoch. Each
    /// crossed boundary evicts inactive validators, tallies delegated
    /// votes, and installs a ranked, deterministically shuffled validator
    /// set. Boundaries commit one at a time; the first failure aborts the
    /// call.
    pub fn try_elect(&self, genesis: &BlockHeader, parent: &BlockHeader) -> TidemarkResult<()> {
        let genesis_epoch = self.config.epoch_of(genesis.timestamp);
        let mut prev_epoch = self.config.epoch_of(parent.timestamp);
        let current_epoch = self.config.epoch_of(self.timestamp);

        // Collapse any pre-genesis drift into a single synthetic prior epoch
        let prev_epoch_is_genesis = prev_epoch == genesis_epoch;
        if prev_epoch_is_genesis && prev_epoch < current_epoch {
            prev_epoch = EpochId(current_epoch.0 - 1);
        }

        for i in prev_epoch.0..current_epoch.0 {
            // Right after genesis nobody has minted yet, so there is no
            // activity record to judge validators by
            if !prev_epoch_is_genesis && self.state.has_mint_records(prev_epoch)? {
                self.kickout_validators(prev_epoch)?;
            }

            let votes = self.count_votes()?;
            if votes.len() < self.config.safe_size {
                return Err(TidemarkError::TooFewCandidates {
                    required: self.config.safe_size,
                    got: votes.len(),
                });
            }

            let mut candidates: Vec<WeightedCandidate> = votes
                .into_iter()
                .map(|(address, weight)| WeightedCandidate::new(address, weight))
                .collect();
            candidates.sort();
            candidates.truncate(self.config.max_validator_size);

            shuffle_validators(&mut candidates, shuffle_seed(&parent.hash, i));

            let elected: Vec<Address> = candidates.into_iter().map(|c| c.address).collect();
            self.state.set_validators(EpochId(i + 1), elected)?;
            info!(prev_epoch = i, next_epoch = i + 1, "came to new epoch");
        }
        Ok(())
    }
}
