//! Error types for the resolution engine.
//!
//! None of these are fatal. [`PortError`]s are absorbed by the engine, which
//! degrades to skipping the affected slot or tick; [`ConfigError`]s are
//! returned to the host when an [`EngineConfig`](crate::config::EngineConfig)
//! cannot be loaded.

use thiserror::Error;

use glamour_model::PlateSlot;

/// A read against the external system could not be served.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    /// The external data structure backing this read is not initialised yet.
    #[error("external surface unavailable: {surface}")]
    Unavailable {
        /// Which surface was read (e.g. "plate", "rotating storage").
        surface: &'static str,
    },

    /// The external system returned data for a slot it should not have.
    #[error("external read out of range for slot {slot}")]
    OutOfRange {
        /// The slot being read.
        slot: PlateSlot,
    },
}

impl PortError {
    /// Shorthand for [`PortError::Unavailable`].
    #[must_use]
    pub const fn unavailable(surface: &'static str) -> Self {
        Self::Unavailable { surface }
    }
}

/// Engine configuration could not be loaded.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for [`EngineConfig`](crate::config::EngineConfig).
    #[error("failed to parse engine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A retry ceiling of zero would abandon before the first retry.
    #[error("max_retry_attempts must be at least 1")]
    InvalidRetryCeiling,

    /// Storage slot limit of zero would reject every storage entry.
    #[error("storage_slot_limit must be at least 1")]
    InvalidStorageSlotLimit,

    /// Donor search needs at least one inventory container.
    #[error("donor_containers must name at least one container")]
    NoDonorContainers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            PortError::unavailable("plate").to_string(),
            "external surface unavailable: plate"
        );
        assert_eq!(
            PortError::OutOfRange {
                slot: PlateSlot::Head
            }
            .to_string(),
            "external read out of range for slot Head"
        );
        assert_eq!(
            ConfigError::InvalidRetryCeiling.to_string(),
            "max_retry_attempts must be at least 1"
        );
    }

    #[test]
    fn parse_error_converts() {
        let err: ConfigError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
