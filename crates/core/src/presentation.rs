//! Presentation mapping: raw provider values to display categories
//!
//! Every function here is pure and total over its input. Categories are
//! recomputed on each render and never stored.

use crate::error::{PanelError, PanelResult};
use serde::Serialize;

pub const CPU_ICON: &str = "nf-oct-cpu";
pub const MEMORY_ICON: &str = "nf-fae-chip";
pub const CHARGING_ICON: &str = "nf-md-power_plug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeIcon {
    Muted,
    Medium,
    High,
}

impl VolumeIcon {
    pub fn class(&self) -> &'static str {
        match self {
            VolumeIcon::Muted => "nf-md-volume_mute",
            VolumeIcon::Medium => "nf-md-volume_medium",
            VolumeIcon::High => "nf-md-volume_high",
        }
    }
}

/// `0` is muted, `1..=50` medium, anything louder high
pub fn volume_icon(volume: u32) -> VolumeIcon {
    match volume {
        0 => VolumeIcon::Muted,
        1..=50 => VolumeIcon::Medium,
        _ => VolumeIcon::High,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryTier {
    Low,
    MediumLow,
    MediumHigh,
    High,
}

impl BatteryTier {
    pub fn class(&self) -> &'static str {
        match self {
            BatteryTier::Low => "nf-fa-battery_1",
            BatteryTier::MediumLow => "nf-fa-battery_2",
            BatteryTier::MediumHigh => "nf-fa-battery_3",
            BatteryTier::High => "nf-fa-battery_4",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            BatteryTier::Low => "text-red-400",
            BatteryTier::MediumLow => "text-orange-300",
            BatteryTier::MediumHigh => "text-yellow-200",
            BatteryTier::High => "text-green-300",
        }
    }
}

/// Battery tier for a charge percentage.
///
/// Intervals are open: exactly 40, 60 and 80 (and 0) land in `High`
/// together with full charge. Keep it that way; the bar has always shown it.
pub fn battery_tier(charge_percent: f64) -> BatteryTier {
    if charge_percent > 0.0 && charge_percent < 40.0 {
        BatteryTier::Low
    } else if charge_percent > 40.0 && charge_percent < 60.0 {
        BatteryTier::MediumLow
    } else if charge_percent > 60.0 && charge_percent < 80.0 {
        BatteryTier::MediumHigh
    } else {
        BatteryTier::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    CloudyDay,
    CloudyNight,
    LightRainDay,
    LightRainNight,
    HeavyRainDay,
    HeavyRainNight,
    SnowDay,
    SnowNight,
    ThunderDay,
    ThunderNight,
}

impl WeatherIcon {
    pub const ALL: [WeatherIcon; 12] = [
        WeatherIcon::ClearDay,
        WeatherIcon::ClearNight,
        WeatherIcon::CloudyDay,
        WeatherIcon::CloudyNight,
        WeatherIcon::LightRainDay,
        WeatherIcon::LightRainNight,
        WeatherIcon::HeavyRainDay,
        WeatherIcon::HeavyRainNight,
        WeatherIcon::SnowDay,
        WeatherIcon::SnowNight,
        WeatherIcon::ThunderDay,
        WeatherIcon::ThunderNight,
    ];

    /// Status token the weather provider reports for this condition
    pub fn status(&self) -> &'static str {
        match self {
            WeatherIcon::ClearDay => "clear_day",
            WeatherIcon::ClearNight => "clear_night",
            WeatherIcon::CloudyDay => "cloudy_day",
            WeatherIcon::CloudyNight => "cloudy_night",
            WeatherIcon::LightRainDay => "light_rain_day",
            WeatherIcon::LightRainNight => "light_rain_night",
            WeatherIcon::HeavyRainDay => "heavy_rain_day",
            WeatherIcon::HeavyRainNight => "heavy_rain_night",
            WeatherIcon::SnowDay => "snow_day",
            WeatherIcon::SnowNight => "snow_night",
            WeatherIcon::ThunderDay => "thunder_day",
            WeatherIcon::ThunderNight => "thunder_night",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            WeatherIcon::ClearDay => "nf-weather-day_sunny",
            WeatherIcon::ClearNight => "nf-weather-night_clear",
            WeatherIcon::CloudyDay => "nf-weather-day_cloudy",
            WeatherIcon::CloudyNight => "nf-weather-night_alt_cloudy",
            WeatherIcon::LightRainDay => "nf-weather-day_sprinkle",
            WeatherIcon::LightRainNight => "nf-weather-night_alt_sprinkle",
            WeatherIcon::HeavyRainDay => "nf-weather-day_rain",
            WeatherIcon::HeavyRainNight => "nf-weather-night_alt_rain",
            WeatherIcon::SnowDay => "nf-weather-day_snow",
            WeatherIcon::SnowNight => "nf-weather-night_alt_snow",
            WeatherIcon::ThunderDay => "nf-weather-day_lightning",
            WeatherIcon::ThunderNight => "nf-weather-night_alt_lightning",
        }
    }
}

/// Parse a weather status token, reporting tokens outside the known set
pub fn parse_weather_status(status: &str) -> PanelResult<WeatherIcon> {
    WeatherIcon::ALL
        .iter()
        .copied()
        .find(|icon| icon.status() == status)
        .ok_or_else(|| PanelError::OutOfDomainValue {
            field: "weather status",
            value: status.to_string(),
        })
}

/// Icon for a weather status; `None` for anything outside the known set
pub fn weather_icon(status: &str) -> Option<WeatherIcon> {
    parse_weather_status(status).ok()
}

/// Round half up (toward positive infinity), for percentage and temperature text
///
/// `-2.5` becomes `-2`.
pub fn round_display(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
