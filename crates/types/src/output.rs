//! Provider output shapes.
//!
//! Each source kind produces exactly one shape. Values are produced entirely
//! by the widget engine and arrive as JSON objects using the engine's
//! camelCase field names. Fields a provider may leave out are `Option`s so a
//! missing reading is never mistaken for a real one.

use crate::source_configs::SourceKind;
use serde::{Deserialize, Serialize};

/// CPU usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuOutput {
    /// Usage percentage (0.0 to 100.0)
    pub usage: f64,
}

/// Memory usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryOutput {
    /// Usage percentage (0.0 to 100.0)
    pub usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryOutput {
    pub charge_percent: f64,
    pub is_charging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherOutput {
    #[serde(default)]
    pub celsius_temp: Option<f64>,
    #[serde(default)]
    pub fahrenheit_temp: Option<f64>,
    /// Day/night condition token such as `clear_day` or `snow_night`.
    /// Kept raw: tokens outside the known set are valid output, they just
    /// have no icon.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

/// Playback session reported by the media provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSession {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album_title: Option<String>,
    pub is_playing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaOutput {
    /// `None` when nothing is playing or paused anywhere
    #[serde(default)]
    pub current_session: Option<MediaSession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub has_focus: bool,
    #[serde(default)]
    pub is_displayed: Option<bool>,
}

impl Workspace {
    /// Label shown on the workspace button
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlazeWmOutput {
    pub all_workspaces: Vec<Workspace>,
}

impl GlazeWmOutput {
    pub fn focused_workspace(&self) -> Option<&Workspace> {
        self.all_workspaces.iter().find(|w| w.has_focus)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioOutput {
    /// Volume of the default playback device (0 to 100)
    #[serde(default)]
    pub volume: Option<u32>,
    #[serde(default)]
    pub device_name: Option<String>,
}

/// Pre-formatted timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateOutput {
    pub formatted: String,
}

/// Latest output of one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutputValue {
    Glazewm(GlazeWmOutput),
    Date(DateOutput),
    Cpu(CpuOutput),
    Memory(MemoryOutput),
    Battery(BatteryOutput),
    Weather(WeatherOutput),
    Audio(AudioOutput),
    Media(MediaOutput),
}

impl OutputValue {
    /// Parse a raw engine payload for a source of the given kind
    pub fn from_json(kind: SourceKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            SourceKind::Glazewm => OutputValue::Glazewm(serde_json::from_value(value)?),
            SourceKind::Date => OutputValue::Date(serde_json::from_value(value)?),
            SourceKind::Cpu => OutputValue::Cpu(serde_json::from_value(value)?),
            SourceKind::Memory => OutputValue::Memory(serde_json::from_value(value)?),
            SourceKind::Battery => OutputValue::Battery(serde_json::from_value(value)?),
            SourceKind::Weather => OutputValue::Weather(serde_json::from_value(value)?),
            SourceKind::Audio => OutputValue::Audio(serde_json::from_value(value)?),
            SourceKind::Media => OutputValue::Media(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            OutputValue::Glazewm(_) => SourceKind::Glazewm,
            OutputValue::Date(_) => SourceKind::Date,
            OutputValue::Cpu(_) => SourceKind::Cpu,
            OutputValue::Memory(_) => SourceKind::Memory,
            OutputValue::Battery(_) => SourceKind::Battery,
            OutputValue::Weather(_) => SourceKind::Weather,
            OutputValue::Audio(_) => SourceKind::Audio,
            OutputValue::Media(_) => SourceKind::Media,
        }
    }

    pub fn as_battery(&self) -> Option<&BatteryOutput> {
        match self {
            OutputValue::Battery(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_weather(&self) -> Option<&WeatherOutput> {
        match self {
            OutputValue::Weather(w) => Some(w),
            _ => None,
        }
    }
}
