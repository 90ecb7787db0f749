//! Engine configuration
//!
//! Defines [`EngineConfig`], which sizes the pointer cache, toggles the
//! direct descent-copy shortcut and picks the logging profile.
//!
//! # Example (TOML)
//!
//! ```toml
//! cache_capacity = 200
//! descent_fast_path = true
//! log_profile = "production"
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{PointerError, Result};
use crate::logging_facility::{self, Profile};
use crate::path::cache::DEFAULT_CACHE_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on cached single-segment pointers.
    pub cache_capacity: usize,

    /// Copy straight through a `**` stage that ends the path when no filter is set.
    pub descent_fast_path: bool,

    /// Profile passed to `logging_facility::init`.
    pub log_profile: Profile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            descent_fast_path: true,
            log_profile: Profile::Development,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the TOML does not parse or a value is out of range.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(input).map_err(|e| PointerError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Install the global subscriber for `log_profile`
    ///
    /// Only the first initialization in a process takes effect.
    pub fn init_logging(&self) {
        logging_facility::init(self.log_profile);
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` when `cache_capacity` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(PointerError::InvalidConfig {
                reason: "cache_capacity must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
