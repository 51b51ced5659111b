//! Deterministic validator shuffling
//!
//! The elected set's rotation order must be identical on every node, so the
//! permutation is a pure function of already-agreed chain data: the parent
//! block hash and the epoch boundary being crossed. No wall-clock time, no
//! OS entropy.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tidemark_core::Hash;
use tidemark_crypto::hashing::keccak512;

use crate::ordering::WeightedCandidate;

/// Derive the shuffle seed for one epoch boundary
///
/// Low 32 bits (little-endian) of Keccak-512 over the parent block hash,
/// offset by the boundary's epoch index: skipped epochs processed in a
/// single call each draw a distinct permutation from the same parent.
pub fn shuffle_seed(parent_hash: &Hash, epoch_index: u64) -> u64 {
    let digest = keccak512(parent_hash.as_bytes());
    let low = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    (low as u64).wrapping_add(epoch_index)
}

/// Back-to-front Fisher–Yates over the ranked candidate list
pub fn shuffle_validators(candidates: &mut [WeightedCandidate], seed: u64) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    for i in (1..candidates.len()).rev() {
        let j = uniform_below(&mut rng, (i + 1) as u32) as usize;
        candidates.swap(i, j);
    }
}

/// Unbiased draw in `[0, n)` taken straight from the ChaCha20 stream
///
/// Rejection sampling over `next_u32`, so the result depends only on the
/// cipher stream and `n`, never on distribution code that may change
/// between library versions.
fn uniform_below(rng: &mut ChaCha20Rng, n: u32) -> u32 {
    debug_assert!(n > 0);
    if n.is_power_of_two() {
        return rng.next_u32() & (n - 1);
    }
    // Largest multiple of n representable in u32; values past it would skew
    // the low residues
    let limit = u32::MAX - u32::MAX % n;
    loop {
        let v = rng.next_u32();
        if v < limit {
            return v % n;
        }
    }
}
