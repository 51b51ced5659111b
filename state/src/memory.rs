//! In-memory ledger view for testing and light hosts
//!
//! A single ordered key-value map stands in for the authenticated tries a
//! full node would back this with. `BTreeMap` gives the deterministic
//! ascending-byte iteration the engine's consensus safety depends on.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use tidemark_core::{
    Address, CandidateIndex, DelegationIndex, EpochId, LedgerState, MintCount, MintCountStore,
    TidemarkResult, ValidatorSetStore, Weight,
};
use tracing::debug;

use crate::store::{
    account_key, candidate_key, candidate_prefix, delegate_key, delegate_prefix, mint_cnt_key,
    mint_cnt_prefix, parse_candidate_key, parse_delegate_key, AccountState, ValidatorList,
    VALIDATORS_KEY,
};

/// In-memory chain state
pub struct MemoryChainState {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryChainState {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create with an initial candidate registry
    pub fn with_candidates<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        let state = Self::new();
        for candidate in candidates {
            state.register_candidate(&candidate);
        }
        state
    }

    /// Register a candidate (the external registration transaction)
    pub fn register_candidate(&self, candidate: &Address) {
        self.data
            .write()
            .insert(candidate_key(candidate), Vec::new());
    }

    /// Delegate voting weight from `delegator` to `candidate` (the external
    /// vote transaction)
    pub fn delegate(&self, candidate: &Address, delegator: &Address) {
        self.data
            .write()
            .insert(delegate_key(candidate, delegator), Vec::new());
    }

    /// Withdraw a delegation (the external unvote transaction)
    pub fn undelegate(&self, candidate: &Address, delegator: &Address) {
        self.data.write().remove(&delegate_key(candidate, delegator));
    }

    /// Set an account's balance
    pub fn credit(&self, address: &Address, balance: Weight) {
        self.data
            .write()
            .insert(account_key(address), AccountState::new(balance).to_bytes());
    }

    /// Epoch the current validator set was installed for, if any
    pub fn installed_epoch(&self) -> Option<EpochId> {
        let data = self.data.read();
        let bytes = data.get(VALIDATORS_KEY)?;
        ValidatorList::from_bytes(bytes).ok().map(|list| list.epoch)
    }
}

impl Default for MemoryChainState {
    fn default() -> Self {
        Self::new()
    }
}

fn prefix_entries<'a>(
    map: &'a BTreeMap<Vec<u8>, Vec<u8>>,
    prefix: &'a [u8],
) -> impl Iterator<Item = (&'a Vec<u8>, &'a Vec<u8>)> {
    map.range(prefix.to_vec()..)
        .take_while(move |(key, _)| key.starts_with(prefix))
}

impl CandidateIndex for MemoryChainState {
    fn candidates(&self) -> TidemarkResult<Vec<Address>> {
        let data = self.data.read();
        Ok(prefix_entries(&data, &candidate_prefix())
            .filter_map(|(key, _)| parse_candidate_key(key))
            .collect())
    }

    fn count_candidates(&self, cap: usize) -> TidemarkResult<usize> {
        let data = self.data.read();
        Ok(prefix_entries(&data, &candidate_prefix()).take(cap).count())
    }

    fn contains_candidate(&self, candidate: &Address) -> TidemarkResult<bool> {
        Ok(self.data.read().contains_key(&candidate_key(candidate)))
    }

    fn remove_candidate(&self, candidate: &Address) -> TidemarkResult<()> {
        let mut data = self.data.write();
        data.remove(&candidate_key(candidate));

        // A removed candidate takes its delegations with it
        let prefix = delegate_prefix(candidate);
        let stale: Vec<Vec<u8>> = prefix_entries(&data, &prefix)
            .map(|(key, _)| key.clone())
            .collect();
        for key in stale {
            data.remove(&key);
        }
        debug!(candidate = %candidate, "removed candidate");
        Ok(())
    }
}

impl DelegationIndex for MemoryChainState {
    fn delegators_of(&self, candidate: &Address) -> TidemarkResult<Vec<Address>> {
        let data = self.data.read();
        let prefix = delegate_prefix(candidate);
        Ok(prefix_entries(&data, &prefix)
            .filter_map(|(key, _)| parse_delegate_key(key, candidate))
            .collect())
    }
}

impl MintCountStore for MemoryChainState {
    fn mint_count(&self, epoch: EpochId, validator: &Address) -> TidemarkResult<MintCount> {
        let data = self.data.read();
        match data.get(&mint_cnt_key(epoch, validator)) {
            Some(bytes) => {
                let arr: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    tidemark_core::TidemarkError::SerializationError(
                        "mint count record is not 8 bytes".into(),
                    )
                })?;
                Ok(u64::from_be_bytes(arr))
            }
            None => Ok(0),
        }
    }

    fn has_mint_records(&self, epoch: EpochId) -> TidemarkResult<bool> {
        let data = self.data.read();
        let has_any = prefix_entries(&data, &mint_cnt_prefix(epoch)).next().is_some();
        Ok(has_any)
    }

    fn increment_mint(&self, epoch: EpochId, validator: &Address) -> TidemarkResult<MintCount> {
        let next = self.mint_count(epoch, validator)? + 1;
        self.data
            .write()
            .insert(mint_cnt_key(epoch, validator), next.to_be_bytes().to_vec());
        Ok(next)
    }
}

impl ValidatorSetStore for MemoryChainState {
    fn validators(&self) -> TidemarkResult<Vec<Address>> {
        let data = self.data.read();
        match data.get(VALIDATORS_KEY) {
            Some(bytes) => Ok(ValidatorList::from_bytes(bytes)?.validators),
            None => Ok(Vec::new()),
        }
    }

    fn set_validators(&self, epoch: EpochId, validators: Vec<Address>) -> TidemarkResult<()> {
        debug!(%epoch, count = validators.len(), "installed validator set");
        let list = ValidatorList::new(epoch, validators);
        self.data
            .write()
            .insert(VALIDATORS_KEY.to_vec(), list.to_bytes());
        Ok(())
    }
}

impl LedgerState for MemoryChainState {
    fn balance_of(&self, address: &Address) -> TidemarkResult<Weight> {
        let data = self.data.read();
        match data.get(&account_key(address)) {
            Some(bytes) => Ok(AccountState::from_bytes(bytes)?.balance),
            None => Ok(Weight::default()),
        }
    }
}
