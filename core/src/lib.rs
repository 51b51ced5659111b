//! TIDEMARK Core Library
//!
//! Core types, traits, and abstractions for the TIDEMARK delegated-proof-of-stake
//! election engine. This crate provides the foundation for all other TIDEMARK
//! components.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use traits::*;
pub use types::*;
