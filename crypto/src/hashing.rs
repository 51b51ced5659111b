//! Hashing functions using Keccak (with SHA-256 fallback)

use sha2::Sha256;
use sha3::{Digest, Keccak256, Keccak512};
use tidemark_core::Hash;

/// Compute Keccak-256 hash of data
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    Hash::from_bytes(bytes)
}

/// Compute Keccak-512 hash of data
///
/// 64-byte digest; the shuffle seed is derived from its low bytes.
pub fn keccak512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Keccak512::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&result);
    bytes
}

/// Compute SHA-256 hash of data (fallback)
pub fn sha256_hash(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    Hash::from_bytes(bytes)
}

/// Default hash function (Keccak-256)
pub fn hash(data: &[u8]) -> Hash {
    keccak256(data)
}

/// Hash multiple pieces of data
pub fn hash_multiple(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    Hash::from_bytes(bytes)
}

/// Incremental hasher for large data
pub struct IncrementalHasher {
    hasher: Keccak256,
}

impl IncrementalHasher {
    pub fn new() -> Self {
        Self {
            hasher: Keccak256::new(),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    pub fn finalize(self) -> Hash {
        let result = self.hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&result);
        Hash::from_bytes(bytes)
    }
}

impl Default for IncrementalHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty_vector() {
        // Known Keccak-256 of the empty string
        let h = keccak256(b"");
        assert_eq!(
            h.to_hex(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_abc_vector() {
        let h = keccak256(b"abc");
        assert_eq!(
            h.to_hex(),
            "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn test_keccak512_deterministic() {
        let a = keccak512(b"Hello, TIDEMARK!");
        let b = keccak512(b"Hello, TIDEMARK!");
        assert_eq!(a[..], b[..]);
        assert_ne!(a[..], [0u8; 64][..]);
    }

    #[test]
    fn test_sha256_hash() {
        let data = b"Hello, TIDEMARK!";
        let hash1 = sha256_hash(data);
        let hash2 = sha256_hash(data);

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, Hash::ZERO);
    }

    #[test]
    fn test_different_hashes() {
        let data = b"Hello, TIDEMARK!";
        let keccak = keccak256(data);
        let sha256 = sha256_hash(data);

        // Different algorithms should produce different hashes
        assert_ne!(keccak, sha256);
    }

    #[test]
    fn test_incremental_hasher() {
        let mut hasher = IncrementalHasher::new();
        hasher.update(b"Hello, ");
        hasher.update(b"TIDEMARK!");
        let hash1 = hasher.finalize();

        let hash2 = hash(b"Hello, TIDEMARK!");

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_multiple_matches_concat() {
        let joined = hash(b"epoch-seed");
        let parts = hash_multiple(&[b"epoch-", b"seed"]);
        assert_eq!(joined, parts);
    }
}
