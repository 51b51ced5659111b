//! Ledger key schema and stored value types
//!
//! Keys are laid out so that lexicographic byte order gives the iteration
//! and prefix-scan semantics the election engine depends on: delegations
//! group under their candidate, mint counts group under their epoch (epoch
//! numbers are big-endian so byte order equals numeric order).

use serde::{Deserialize, Serialize};
use tidemark_core::{Address, EpochId, TidemarkResult, Weight};

/// Key prefix for candidate registrations
const CANDIDATE_PREFIX: &[u8] = b"candidate:";

/// Key prefix for delegations, scoped by candidate
const DELEGATE_PREFIX: &[u8] = b"vote:";

/// Key prefix for per-epoch mint counters
const MINT_CNT_PREFIX: &[u8] = b"mintcnt:";

/// Key prefix for account balances
const ACCOUNT_PREFIX: &[u8] = b"account:";

/// Key holding the current validator set
pub const VALIDATORS_KEY: &[u8] = b"validators";

/// Account state held by the ledger for each address
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccountState {
    pub balance: Weight,
}

impl AccountState {
    pub fn new(balance: Weight) -> Self {
        Self { balance }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).unwrap_or_default()
    }

    pub fn from_bytes(bytes: &[u8]) -> TidemarkResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// The persisted validator set together with the epoch it was installed for
///
/// Rewritten wholesale on every epoch transition; the epoch field is the
/// head-of-epoch lookup structure, recreated alongside the set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorList {
    pub epoch: EpochId,
    pub validators: Vec<Address>,
}

impl ValidatorList {
    pub fn new(epoch: EpochId, validators: Vec<Address>) -> Self {
        Self { epoch, validators }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).unwrap_or_default()
    }

    pub fn from_bytes(bytes: &[u8]) -> TidemarkResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Build a candidate registration key
pub fn candidate_key(candidate: &Address) -> Vec<u8> {
    let mut key = CANDIDATE_PREFIX.to_vec();
    key.extend_from_slice(candidate.as_bytes());
    key
}

/// Prefix covering every candidate key
pub fn candidate_prefix() -> Vec<u8> {
    CANDIDATE_PREFIX.to_vec()
}

/// Parse a candidate address back out of its key
pub fn parse_candidate_key(key: &[u8]) -> Option<Address> {
    parse_address_suffix(key, CANDIDATE_PREFIX)
}

/// Build a delegation key: candidate first so a candidate's delegators are
/// one contiguous range
pub fn delegate_key(candidate: &Address, delegator: &Address) -> Vec<u8> {
    let mut key = delegate_prefix(candidate);
    key.extend_from_slice(delegator.as_bytes());
    key
}

/// Prefix covering all delegations to one candidate
pub fn delegate_prefix(candidate: &Address) -> Vec<u8> {
    let mut key = DELEGATE_PREFIX.to_vec();
    key.extend_from_slice(candidate.as_bytes());
    key
}

/// Parse the delegator address out of a delegation key
pub fn parse_delegate_key(key: &[u8], candidate: &Address) -> Option<Address> {
    parse_address_suffix(key, &delegate_prefix(candidate))
}

/// Build a mint-count key: epoch first (big-endian) so one epoch's counters
/// are one contiguous range
pub fn mint_cnt_key(epoch: EpochId, validator: &Address) -> Vec<u8> {
    let mut key = mint_cnt_prefix(epoch);
    key.extend_from_slice(validator.as_bytes());
    key
}

/// Prefix covering all mint counters of one epoch
pub fn mint_cnt_prefix(epoch: EpochId) -> Vec<u8> {
    let mut key = MINT_CNT_PREFIX.to_vec();
    key.extend_from_slice(&epoch.0.to_be_bytes());
    key
}

/// Build an account key
pub fn account_key(address: &Address) -> Vec<u8> {
    let mut key = ACCOUNT_PREFIX.to_vec();
    key.extend_from_slice(address.as_bytes());
    key
}

fn parse_address_suffix(key: &[u8], prefix: &[u8]) -> Option<Address> {
    let rest = key.strip_prefix(prefix)?;
    let bytes: [u8; 20] = rest.try_into().ok()?;
    Some(Address::from_bytes(bytes))
}
