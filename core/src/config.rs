//! Configuration types for TIDEMARK

use crate::error::TidemarkError;
use crate::types::{EpochId, Timestamp};
use serde::{Deserialize, Serialize};

/// Epoch and election configuration
///
/// These were package-level constants in earlier designs; they are explicit
/// configuration now and travel with the epoch context instead of living in
/// ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DposConfig {
    /// Seconds per epoch
    pub epoch_interval: u64,

    /// Seconds per producer slot
    pub block_interval: u64,

    /// Maximum validator set size
    pub max_validator_size: usize,

    /// Minimum candidate pool size eviction must never breach
    pub safe_size: usize,

    /// Timestamp of the chain's first block, in seconds
    ///
    /// Zero until the host observes the first block; used to shorten the
    /// first epoch's activity accounting.
    pub time_of_first_block: u64,
}

impl Default for DposConfig {
    fn default() -> Self {
        Self {
            epoch_interval: 86_400,
            block_interval: 10,
            max_validator_size: 21,
            safe_size: 21 * 2 / 3 + 1,
            time_of_first_block: 0,
        }
    }
}

impl DposConfig {
    /// Epoch containing the given timestamp
    pub fn epoch_of(&self, timestamp: Timestamp) -> EpochId {
        EpochId(timestamp.as_secs() / self.epoch_interval)
    }

    /// Check internal consistency of the timing parameters
    pub fn validate(&self) -> Result<(), TidemarkError> {
        if self.block_interval == 0 {
            return Err(TidemarkError::ConfigError(
                "block_interval must be nonzero".into(),
            ));
        }
        if self.epoch_interval == 0 || self.epoch_interval % self.block_interval != 0 {
            return Err(TidemarkError::ConfigError(format!(
                "epoch_interval {} must be a nonzero multiple of block_interval {}",
                self.epoch_interval, self.block_interval
            )));
        }
        if self.max_validator_size == 0 {
            return Err(TidemarkError::ConfigError(
                "max_validator_size must be nonzero".into(),
            ));
        }
        if self.safe_size == 0 || self.safe_size > self.max_validator_size {
            return Err(TidemarkError::ConfigError(format!(
                "safe_size {} must be in 1..={}",
                self.safe_size, self.max_validator_size
            )));
        }
        Ok(())
    }
}
