//! Source configuration types for all provider kinds.
//!
//! A `SourceConfig` is handed to the widget engine once, at startup, when the
//! source is registered. The engine owns sampling; these records only carry
//! the options it needs (formatting strings, coordinates, polling hints).

pub mod date;
pub mod weather;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use date::DateSourceConfig;
pub use weather::WeatherSourceConfig;

/// Configuration for sources that take no options beyond a polling hint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicSourceConfig {
    /// Polling hint forwarded to the engine untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_ms: Option<u64>,
}

/// Kind of provider behind a source.
///
/// Several sources may share a kind (e.g. a `calendar` and a `date` source
/// are both `Date` providers with different formatting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Glazewm,
    Date,
    Cpu,
    Memory,
    Battery,
    Weather,
    Audio,
    Media,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Glazewm => "glazewm",
            SourceKind::Date => "date",
            SourceKind::Cpu => "cpu",
            SourceKind::Memory => "memory",
            SourceKind::Battery => "battery",
            SourceKind::Weather => "weather",
            SourceKind::Audio => "audio",
            SourceKind::Media => "media",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-safe enum for all source configurations.
/// Uses serde tag for JSON serialization: {"type": "date", "formatting": ...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SourceConfig {
    #[serde(rename = "glazewm")]
    Glazewm(BasicSourceConfig),

    #[serde(rename = "date")]
    Date(DateSourceConfig),

    #[serde(rename = "cpu")]
    Cpu(BasicSourceConfig),

    #[serde(rename = "memory")]
    Memory(BasicSourceConfig),

    #[serde(rename = "battery")]
    Battery(BasicSourceConfig),

    #[serde(rename = "weather")]
    Weather(WeatherSourceConfig),

    #[serde(rename = "audio")]
    Audio(BasicSourceConfig),

    #[serde(rename = "media")]
    Media(BasicSourceConfig),
}

impl SourceConfig {
    /// Get the provider kind for this config
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceConfig::Glazewm(_) => SourceKind::Glazewm,
            SourceConfig::Date(_) => SourceKind::Date,
            SourceConfig::Cpu(_) => SourceKind::Cpu,
            SourceConfig::Memory(_) => SourceKind::Memory,
            SourceConfig::Battery(_) => SourceKind::Battery,
            SourceConfig::Weather(_) => SourceKind::Weather,
            SourceConfig::Audio(_) => SourceKind::Audio,
            SourceConfig::Media(_) => SourceKind::Media,
        }
    }

    /// Get the polling hint, if one was configured
    pub fn refresh_interval_ms(&self) -> Option<u64> {
        match self {
            SourceConfig::Glazewm(cfg)
            | SourceConfig::Cpu(cfg)
            | SourceConfig::Memory(cfg)
            | SourceConfig::Battery(cfg)
            | SourceConfig::Audio(cfg)
            | SourceConfig::Media(cfg) => cfg.refresh_interval_ms,
            SourceConfig::Date(cfg) => cfg.refresh_interval_ms,
            SourceConfig::Weather(cfg) => cfg.refresh_interval_ms,
        }
    }
}
