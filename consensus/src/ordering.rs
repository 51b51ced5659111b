//! Candidate ordering
//!
//! One strict total order shared by the selector and the evictor: heavier
//! candidates first, ties broken by ascending address. Validator rankings
//! are consensus-critical, so this order must be reproduced bit-for-bit on
//! every node.

use std::cmp::Ordering;
use tidemark_core::{Address, Weight};

/// A candidate paired with a weight (tallied votes, or a mint count)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedCandidate {
    pub address: Address,
    pub weight: Weight,
}

impl WeightedCandidate {
    pub fn new(address: Address, weight: Weight) -> Self {
        Self { address, weight }
    }
}

impl Ord for WeightedCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Descending weight, then ascending raw address bytes. The address
        // comparison is over the canonical 20-byte form, never a printable
        // encoding.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| self.address.cmp(&other.address))
    }
}

impl PartialOrd for WeightedCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
