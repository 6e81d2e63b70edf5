//! Report presentation settings

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Settings for [`crate::StatsSnapshot::render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Rows printed in each ranked table (at least 1)
    pub top_n: usize,
}

impl StatsConfig {
    /// 15 rows per table
    pub const DEFAULT: Self = Self { top_n: 15 };

    /// Create a new configuration with validation
    pub const fn new(top_n: usize) -> Result<Self, ConfigError> {
        if top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        Ok(Self { top_n })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        Ok(())
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for StatsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatsConfig {{ top_n: {} }}", self.top_n)
    }
}

/// Configuration error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("top_n must be at least 1")]
    ZeroTopN,
}
