//! Output configuration module.

use std::fmt;
use std::str::FromStr;

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// How key listings are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One key per line
    #[default]
    Text,
    /// A JSON array of strings
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::ValidationError(format!(
                "Unknown output format: {other}"
            ))),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(Default)]
pub struct OutputConfig {
    /// Listing format
    pub format: OutputFormat,

    /// Indent JSON output
    pub pretty: bool,
}

impl Validate for OutputConfig {
    fn validate(&self) -> ConfigResult<()> {
        // every combination is usable; `pretty` is ignored for text
        Ok(())
    }
}
