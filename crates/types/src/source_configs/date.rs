//! Date source configuration types.

use serde::{Deserialize, Serialize};

fn default_formatting() -> String {
    "EEE d MMM t".to_string()
}

/// Date source configuration
///
/// `formatting` uses the engine's date pattern syntax (e.g. `yyyy LLLL dd cccc`);
/// the formatted string comes back verbatim in the source's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSourceConfig {
    #[serde(default = "default_formatting")]
    pub formatting: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_ms: Option<u64>,
}

impl DateSourceConfig {
    pub fn with_formatting(formatting: &str) -> Self {
        Self {
            formatting: formatting.to_string(),
            refresh_interval_ms: None,
        }
    }
}

impl Default for DateSourceConfig {
    fn default() -> Self {
        Self {
            formatting: default_formatting(),
            refresh_interval_ms: None,
        }
    }
}
