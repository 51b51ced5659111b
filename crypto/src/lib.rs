//! TIDEMARK Cryptography Module
//!
//! Provides hashing primitives using standard, audited algorithms:
//! - Keccak-256 for general hashing (SHA-256 fallback)
//! - Keccak-512 for shuffle-seed material

pub mod hashing;

pub use hashing::*;
