//! Key input configuration module.
//!
//! Controls how lines read from files or standard input become keys.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Key input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Strip leading and trailing whitespace from every line
    pub trim_whitespace: bool,

    /// Ignore lines that are empty after trimming
    pub skip_blank_lines: bool,

    /// Lines starting with this marker are ignored
    pub comment_prefix: Option<String>,

    /// Longest accepted key, in bytes
    pub max_key_len: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
            skip_blank_lines: true,
            comment_prefix: None,
            max_key_len: 4096,
        }
    }
}

impl Validate for InputConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_key_len == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "input.max_key_len".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if matches!(self.comment_prefix.as_deref(), Some("")) {
            return Err(ConfigError::ValidationError(
                "comment_prefix must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
