//! Configuration Module
//!
//! Describes how a cache is built. The hosting application decides where the
//! values come from; this module only parses and validates them.

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{QuickLruError, Result};

/// Default label attached to log records.
pub const DEFAULT_NAME: &str = "quick_lru";

/// Cache configuration parameters.
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of entries the recent generation holds before a rollover
    pub capacity: usize,
    /// Label used in log records emitted by the cache
    pub name: String,
}

impl Config {
    /// Creates a config with the given capacity and the default name.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Replaces the log label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Checks that the config describes a buildable cache.
    ///
    /// A zero capacity is rejected rather than clamped.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(QuickLruError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    /// Parses a JSON document and validates it.
    ///
    /// # Errors
    /// - `InvalidConfig` if the text is not a valid config (including negative capacities)
    /// - `InvalidCapacity` if the capacity is zero
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            name: DEFAULT_NAME.to_string(),
        }
    }
}
