//! Engine configuration.
//!
//! [`EngineConfig`] is plain serde data. Hosts typically embed it in their own
//! settings document and hand the JSON fragment to
//! [`EngineConfig::from_json_str`], which fills in defaults for missing fields
//! and validates the result.
//!
//! # Example
//!
//! ```
//! use glamour_core::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "troubleshooting": true }"#).unwrap();
//! assert!(config.troubleshooting);
//! assert_eq!(config.max_retry_attempts, 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::port::ContainerId;

/// Default attempt ceiling for the retry loop.
pub const DEFAULT_MAX_RETRY_ATTEMPTS: u32 = 5;

/// Default number of rotating-storage slots. Entries at or beyond are malformed.
pub const DEFAULT_STORAGE_SLOT_LIMIT: u32 = 800;

/// Tunables for the resolution engine and convergence loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Failed passes after which a pending configuration is abandoned.
    pub max_retry_attempts: u32,
    /// Rotating-storage slot indices must be below this.
    pub storage_slot_limit: u32,
    /// Inventory containers searched for dye donors, in search order.
    pub donor_containers: Vec<ContainerId>,
    /// Emit decision traces at `info` instead of `debug`.
    pub troubleshooting: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_retry_attempts: DEFAULT_MAX_RETRY_ATTEMPTS,
            storage_slot_limit: DEFAULT_STORAGE_SLOT_LIMIT,
            donor_containers: (0..4).map(ContainerId::new).collect(),
            troubleshooting: false,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching
    /// validation error for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retry_attempts == 0 {
            return Err(ConfigError::InvalidRetryCeiling);
        }
        if self.storage_slot_limit == 0 {
            return Err(ConfigError::InvalidStorageSlotLimit);
        }
        if self.donor_containers.is_empty() {
            return Err(ConfigError::NoDonorContainers);
        }
        Ok(())
    }
}
