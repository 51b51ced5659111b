//! Validator eviction
//!
//! Validators that produced too few blocks over the previous epoch lose
//! their candidacy, bounded by a floor on the remaining candidate pool.

use tidemark_core::{ChainState, EpochId, TidemarkError, TidemarkResult, Weight};
use tracing::info;

use crate::engine::EpochContext;
use crate::ordering::WeightedCandidate;

impl<S: ChainState> EpochContext<'_, S> {
    /// Evict validators that were inactive during `epoch`
    ///
    /// Inactive means fewer than half the blocks an evenly rotated set
    /// would have given them. Inactive validators are processed in
    /// descending mint-count order (ties by ascending address), so when the
    /// candidate pool hits `safe_size` mid-pass it is the worst offenders
    /// that escape eviction.
    pub fn kickout_validators(&self, epoch: EpochId) -> TidemarkResult<()> {
        let validators = self.state.validators()?;
        if validators.is_empty() {
            return Err(TidemarkError::NoValidatorsToEvict);
        }

        // The first epoch can span less wall-clock time than a full
        // interval when the chain's first block lands off-boundary; judge
        // activity against the span actually elapsed.
        let mut epoch_duration = self.config.epoch_interval;
        let elapsed = self
            .timestamp
            .as_secs()
            .saturating_sub(self.config.time_of_first_block);
        if elapsed < self.config.epoch_interval {
            epoch_duration = elapsed;
        }

        let threshold =
            epoch_duration / self.config.block_interval / self.config.max_validator_size as u64 / 2;

        let mut inactive = Vec::new();
        for validator in validators {
            let cnt = self.state.mint_count(epoch, &validator)?;
            if cnt < threshold {
                inactive.push(WeightedCandidate::new(validator, Weight::from(cnt)));
            }
        }
        if inactive.is_empty() {
            return Ok(());
        }
        inactive.sort();

        let need = inactive.len();
        let mut candidate_count = self
            .state
            .count_candidates(need + self.config.safe_size)?;

        for (evicted, validator) in inactive.iter().enumerate() {
            // The pool must never drop to safe_size, no matter how many
            // validators are nominally inactive
            if candidate_count <= self.config.safe_size {
                info!(
                    prev_epoch = %epoch,
                    candidate_count,
                    remaining = need - evicted,
                    "no more candidates can be kicked out"
                );
                return Ok(());
            }

            self.state.remove_candidate(&validator.address)?;
            candidate_count -= 1;
            info!(
                prev_epoch = %epoch,
                candidate = %validator.address,
                mint_count = %validator.weight,
                "kicked out inactive validator"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tidemark_core::{
        Address, CandidateIndex, DposConfig, EpochId, MintCountStore, TidemarkError, Timestamp,
        ValidatorSetStore,
    };
    use tidemark_state::MemoryChainState;

    use crate::engine::EpochContext;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    /// Threshold works out to 600 / 10 / 3 / 2 = 10 blocks per epoch
    fn test_config(safe_size: usize) -> DposConfig {
        DposConfig {
            epoch_interval: 600,
            block_interval: 10,
            max_validator_size: 3,
            safe_size,
            time_of_first_block: 0,
        }
    }

    fn mint(state: &MemoryChainState, epoch: EpochId, validator: &Address, count: u64) {
        for _ in 0..count {
            state.increment_mint(epoch, validator).unwrap();
        }
    }

    #[test]
    fn test_kickout_needs_validators() {
        let config = test_config(2);
        let state = MemoryChainState::new();
        let ctx = EpochContext::new(Timestamp::from_secs(1_200), &config, &state);

        let err = ctx.kickout_validators(EpochId(0)).unwrap_err();
        assert!(matches!(err, TidemarkError::NoValidatorsToEvict));
    }

    #[test]
    fn test_active_validators_survive() {
        let config = test_config(2);
        let epoch = EpochId(1);
        let state = MemoryChainState::with_candidates([addr(1), addr(2), addr(3)]);
        state
            .set_validators(epoch, vec![addr(1), addr(2), addr(3)])
            .unwrap();
        for i in 1..=3 {
            mint(&state, epoch, &addr(i), 10);
        }
        let ctx = EpochContext::new(Timestamp::from_secs(1_200), &config, &state);

        ctx.kickout_validators(epoch).unwrap();

        assert_eq!(state.candidates().unwrap().len(), 3);
    }

    #[test]
    fn test_threshold_is_strictly_less() {
        let config = test_config(1);
        let epoch = EpochId(1);
        let state = MemoryChainState::with_candidates([addr(1), addr(2)]);
        state.set_validators(epoch, vec![addr(1), addr(2)]).unwrap();
        // Exactly at threshold stays, one below goes
        mint(&state, epoch, &addr(1), 10);
        mint(&state, epoch, &addr(2), 9);
        let ctx = EpochContext::new(Timestamp::from_secs(1_200), &config, &state);

        ctx.kickout_validators(epoch).unwrap();

        assert!(state.contains_candidate(&addr(1)).unwrap());
        assert!(!state.contains_candidate(&addr(2)).unwrap());
    }

    #[test]
    fn test_short_first_epoch_lowers_the_bar() {
        // Chain started 300 seconds ago: threshold is 300 / 10 / 3 / 2 = 5
        let mut config = test_config(1);
        config.time_of_first_block = 900;
        let epoch = EpochId(1);
        let state = MemoryChainState::with_candidates([addr(1), addr(2)]);
        state.set_validators(epoch, vec![addr(1), addr(2)]).unwrap();
        mint(&state, epoch, &addr(1), 7);
        mint(&state, epoch, &addr(2), 4);
        let ctx = EpochContext::new(Timestamp::from_secs(1_200), &config, &state);

        ctx.kickout_validators(epoch).unwrap();

        // Seven blocks clear the shortened bar; under a full epoch they
        // would not have
        assert!(state.contains_candidate(&addr(1)).unwrap());
        assert!(!state.contains_candidate(&addr(2)).unwrap());
    }

    #[test]
    fn test_eviction_order_prefers_higher_counts() {
        // A(5) and C(5) outrank B(2); the floor leaves room for two
        // evictions, so the worst offender B survives
        let config = test_config(1);
        let epoch = EpochId(1);
        let a = addr(1);
        let b = addr(2);
        let c = addr(3);
        let state = MemoryChainState::with_candidates([a, b, c]);
        state.set_validators(epoch, vec![a, b, c]).unwrap();
        mint(&state, epoch, &a, 5);
        mint(&state, epoch, &b, 2);
        mint(&state, epoch, &c, 5);
        let ctx = EpochContext::new(Timestamp::from_secs(1_200), &config, &state);

        ctx.kickout_validators(epoch).unwrap();

        assert!(!state.contains_candidate(&a).unwrap());
        assert!(!state.contains_candidate(&c).unwrap());
        assert!(state.contains_candidate(&b).unwrap());
    }

    #[test]
    fn test_count_ties_break_by_address() {
        // Room for a single eviction: of the tied pair it is the lower
        // address that goes first
        let config = test_config(2);
        let epoch = EpochId(1);
        let state = MemoryChainState::with_candidates([addr(1), addr(2), addr(3)]);
        state
            .set_validators(epoch, vec![addr(1), addr(3)])
            .unwrap();
        mint(&state, epoch, &addr(1), 5);
        mint(&state, epoch, &addr(3), 5);
        let ctx = EpochContext::new(Timestamp::from_secs(1_200), &config, &state);

        ctx.kickout_validators(epoch).unwrap();

        assert!(!state.contains_candidate(&addr(1)).unwrap());
        assert!(state.contains_candidate(&addr(3)).unwrap());
    }

    #[test]
    fn test_pool_never_drops_below_safe_size() {
        let config = test_config(2);
        let epoch = EpochId(1);
        let state = MemoryChainState::with_candidates([addr(1), addr(2), addr(3)]);
        state
            .set_validators(epoch, vec![addr(1), addr(2), addr(3)])
            .unwrap();
        // Everyone inactive; only one eviction fits above the floor
        let ctx = EpochContext::new(Timestamp::from_secs(1_200), &config, &state);

        ctx.kickout_validators(epoch).unwrap();

        assert_eq!(state.candidates().unwrap().len(), 2);
    }
}
