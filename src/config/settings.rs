//! Bar configuration
//!
//! Read once at startup and never written back; the source map is handed to
//! the engine as-is.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use zpanel_types::SourceConfig;

use super::defaults::{default_layout, default_sources};

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Bar-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Sources to subscribe to, keyed by source name
    #[serde(default = "default_sources")]
    pub sources: BTreeMap<String, SourceConfig>,
    /// Which source goes where
    #[serde(default = "default_layout")]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub units: UnitsConfig,
}

impl BarConfig {
    /// Load configuration from the default location, or use built-in defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            info!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        if config.version > CONFIG_VERSION {
            warn!(
                "Config {} has version {}, newer than supported {}",
                path.display(),
                config.version,
                CONFIG_VERSION
            );
        }
        for problem in config.validate() {
            warn!("{}", problem);
        }

        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "zpanel", "zpanel")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Layout entries that do not refer to a configured source, or repeat one
    ///
    /// These are skipped at render time; nothing else is affected.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for name in self.layout.all() {
            if !self.sources.contains_key(name) {
                problems.push(format!("Layout refers to unknown source '{}'", name));
            } else if !seen.insert(name) {
                problems.push(format!("Source '{}' appears more than once in the layout", name));
            }
        }

        problems
    }
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            sources: default_sources(),
            layout: default_layout(),
            units: UnitsConfig::default(),
        }
    }
}

/// Panel order in each section of the bar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub left: Vec<String>,
    #[serde(default)]
    pub center: Vec<String>,
    #[serde(default)]
    pub right: Vec<String>,
}

impl LayoutConfig {
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.left
            .iter()
            .chain(&self.center)
            .chain(&self.right)
            .map(String::as_str)
    }
}

/// Temperature unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitsConfig {
    #[serde(default)]
    pub temperature: TemperatureUnit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zpanel_types::SourceKind;

    #[test]
    fn test_default_layout_is_valid() {
        let config = BarConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.sources.len(), 9);
        assert_eq!(
            config.sources.get("calendar").map(SourceConfig::kind),
            Some(SourceKind::Date)
        );
    }

    #[test]
    fn test_load_from_path_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "sources": {{
                    "battery": {{"type": "battery"}},
                    "audio": {{"type": "audio", "refresh_interval_ms": 250}}
                }},
                "layout": {{"right": ["audio", "battery", "gpu", "battery"]}},
                "units": {{"temperature": "fahrenheit"}}
            }}"#
        )
        .unwrap();

        let config = BarConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.sources.len(), 2);
        assert!(config.layout.left.is_empty());
        assert_eq!(config.units.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(
            config.sources["audio"].refresh_interval_ms(),
            Some(250)
        );

        let problems = config.validate();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("'gpu'"));
        assert!(problems[1].contains("more than once"));
    }

    #[test]
    fn test_load_from_path_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = BarConfig::load_from_path(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }
}
