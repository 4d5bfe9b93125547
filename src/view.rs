//! View model: what the bar shows for a given snapshot
//!
//! `render` is a pure function of (snapshot, config, toggles). Rendering the
//! same inputs twice gives equal views, so re-rendering after an unrelated
//! source ticks is harmless.

use crate::config::{BarConfig, TemperatureUnit};
use log::{debug, trace};
use serde::Serialize;
use zpanel_core::presentation::{
    battery_tier, parse_weather_status, round_display, volume_icon, BatteryTier, VolumeIcon,
    WeatherIcon, CHARGING_ICON, CPU_ICON, MEMORY_ICON,
};
use zpanel_core::{Snapshot, ToggleState};
use zpanel_types::{
    AudioOutput, BatteryOutput, GlazeWmOutput, MediaOutput, OutputValue, WeatherOutput,
};

/// Text shown in place of a reading the provider has not supplied
pub const MISSING_READING: &str = "--";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    pub left: Vec<PanelView>,
    pub center: Vec<PanelView>,
    pub right: Vec<PanelView>,
}

impl BarView {
    pub fn panels(&self) -> impl Iterator<Item = &PanelView> {
        self.left.iter().chain(&self.center).chain(&self.right)
    }

    /// Panel rendered for `source`, if any
    pub fn panel(&self, source: &str) -> Option<&PanelView> {
        self.panels().find(|p| p.source == source)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub source: String,
    #[serde(flatten)]
    pub body: PanelBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceButton {
    /// Workspace name, used for the focus command
    pub name: String,
    pub label: String,
    pub focused: bool,
    pub displayed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum PanelBody {
    Workspaces {
        buttons: Vec<WorkspaceButton>,
    },
    Date {
        text: String,
    },
    Cpu {
        icon: &'static str,
        text: String,
    },
    Memory {
        icon: &'static str,
        text: String,
    },
    Battery {
        tier: BatteryTier,
        icon: &'static str,
        color: &'static str,
        /// Charging indicator class, present only while charging
        charging: Option<&'static str>,
        text: String,
    },
    Weather {
        icon: Option<WeatherIcon>,
        icon_class: Option<&'static str>,
        text: String,
    },
    Audio {
        icon: Option<VolumeIcon>,
        icon_class: Option<&'static str>,
        text: String,
        slider_open: bool,
    },
    Media {
        title: Option<String>,
        artist: Option<String>,
        playing: bool,
        expanded: bool,
    },
}

/// Build the whole bar from the current snapshot
pub fn render(snapshot: &Snapshot, config: &BarConfig, toggles: ToggleState) -> BarView {
    let section = |names: &[String]| -> Vec<PanelView> {
        names
            .iter()
            .filter(|name| config.sources.contains_key(name.as_str()))
            .filter_map(|name| render_panel(snapshot, name, config, toggles))
            .collect()
    };

    BarView {
        left: section(&config.layout.left),
        center: section(&config.layout.center),
        right: section(&config.layout.right),
    }
}

/// Panel for one source; `None` until the source has produced a value
fn render_panel(
    snapshot: &Snapshot,
    source: &str,
    config: &BarConfig,
    toggles: ToggleState,
) -> Option<PanelView> {
    let value = match snapshot.require(source) {
        Ok(value) => value,
        Err(e) => {
            trace!("Omitting panel: {}", e);
            return None;
        }
    };

    let body = match value {
        OutputValue::Glazewm(wm) => workspaces(wm),
        OutputValue::Date(date) => PanelBody::Date {
            text: date.formatted.clone(),
        },
        OutputValue::Cpu(cpu) => PanelBody::Cpu {
            icon: CPU_ICON,
            text: percent(cpu.usage),
        },
        OutputValue::Memory(memory) => PanelBody::Memory {
            icon: MEMORY_ICON,
            text: percent(memory.usage),
        },
        OutputValue::Battery(battery) => battery_panel(battery),
        OutputValue::Weather(weather) => weather_panel(weather, config.units.temperature),
        OutputValue::Audio(audio) => audio_panel(audio, toggles),
        OutputValue::Media(media) => media_panel(media, toggles),
    };

    Some(PanelView {
        source: source.to_string(),
        body,
    })
}

fn percent(value: f64) -> String {
    format!("{}%", round_display(value))
}

fn workspaces(wm: &GlazeWmOutput) -> PanelBody {
    PanelBody::Workspaces {
        buttons: wm
            .all_workspaces
            .iter()
            .map(|w| WorkspaceButton {
                name: w.name.clone(),
                label: w.label().to_string(),
                focused: w.has_focus,
                displayed: w.is_displayed.unwrap_or(w.has_focus),
            })
            .collect(),
    }
}

fn battery_panel(battery: &BatteryOutput) -> PanelBody {
    let tier = battery_tier(battery.charge_percent);
    PanelBody::Battery {
        tier,
        icon: tier.class(),
        color: tier.color_class(),
        charging: battery.is_charging.then_some(CHARGING_ICON),
        text: percent(battery.charge_percent),
    }
}

fn weather_panel(weather: &WeatherOutput, unit: TemperatureUnit) -> PanelBody {
    let icon = weather
        .status
        .as_deref()
        .and_then(|status| match parse_weather_status(status) {
            Ok(icon) => Some(icon),
            Err(e) => {
                debug!("{}", e);
                None
            }
        });

    let temp = match unit {
        TemperatureUnit::Celsius => weather.celsius_temp,
        TemperatureUnit::Fahrenheit => weather.fahrenheit_temp,
    };
    let text = match temp {
        Some(t) => format!("{}{}", round_display(t), unit.suffix()),
        None => MISSING_READING.to_string(),
    };

    PanelBody::Weather {
        icon,
        icon_class: icon.map(|i| i.class()),
        text,
    }
}

fn audio_panel(audio: &AudioOutput, toggles: ToggleState) -> PanelBody {
    let icon = audio.volume.map(volume_icon);
    PanelBody::Audio {
        icon,
        icon_class: icon.map(|i| i.class()),
        text: match audio.volume {
            Some(v) => format!("{}%", v),
            None => MISSING_READING.to_string(),
        },
        slider_open: toggles.volume_slider,
    }
}

fn media_panel(media: &MediaOutput, toggles: ToggleState) -> PanelBody {
    let session = media.current_session.as_ref();
    PanelBody::Media {
        title: session.and_then(|s| s.title.clone()),
        artist: session.and_then(|s| s.artist.clone()),
        playing: session.map(|s| s.is_playing).unwrap_or(false),
        expanded: toggles.media_panel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zpanel_types::{CpuOutput, DateOutput, MediaSession, Workspace};

    fn snapshot(values: Vec<(&str, OutputValue)>) -> Snapshot {
        values
            .into_iter()
            .fold(Snapshot::new(), |s, (id, v)| s.with_update(id, v))
    }

    #[test]
    fn test_absent_sources_render_no_panel() {
        let config = BarConfig::default();
        let view = render(&Snapshot::new(), &config, ToggleState::default());
        assert_eq!(view.panels().count(), 0);

        let snap = snapshot(vec![("cpu", OutputValue::Cpu(CpuOutput { usage: 12.6 }))]);
        let view = render(&snap, &config, ToggleState::default());
        assert_eq!(view.panels().count(), 1);
        assert_eq!(
            view.panel("cpu").unwrap().body,
            PanelBody::Cpu {
                icon: CPU_ICON,
                text: "13%".to_string()
            }
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let config = BarConfig::default();
        let snap = snapshot(vec![
            (
                "battery",
                OutputValue::Battery(BatteryOutput {
                    charge_percent: 72.0,
                    is_charging: false,
                }),
            ),
            (
                "date",
                OutputValue::Date(DateOutput {
                    formatted: "09:41:00 AM".to_string(),
                }),
            ),
        ]);
        let toggles = ToggleState::default();
        assert_eq!(render(&snap, &config, toggles), render(&snap, &config, toggles));
    }

    #[test]
    fn test_panels_follow_layout_sections() {
        let config = BarConfig::default();
        let snap = snapshot(vec![
            (
                "date",
                OutputValue::Date(DateOutput {
                    formatted: "09:41:00 AM".to_string(),
                }),
            ),
            (
                "calendar",
                OutputValue::Date(DateOutput {
                    formatted: "2026 October 18 Sunday".to_string(),
                }),
            ),
        ]);
        let view = render(&snap, &config, ToggleState::default());
        assert!(view.left.is_empty());
        let order: Vec<_> = view.center.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(order, vec!["calendar", "date"]);
    }

    #[test]
    fn test_workspace_buttons() {
        let config = BarConfig::default();
        let snap = snapshot(vec![(
            "glazewm",
            OutputValue::Glazewm(GlazeWmOutput {
                all_workspaces: vec![
                    Workspace {
                        name: "1".to_string(),
                        display_name: None,
                        has_focus: true,
                        is_displayed: None,
                    },
                    Workspace {
                        name: "2".to_string(),
                        display_name: Some("web".to_string()),
                        has_focus: false,
                        is_displayed: Some(false),
                    },
                ],
            }),
        )]);
        let view = render(&snap, &config, ToggleState::default());
        match &view.left[0].body {
            PanelBody::Workspaces { buttons } => {
                assert_eq!(buttons.len(), 2);
                assert!(buttons[0].focused && buttons[0].displayed);
                assert_eq!(buttons[1].label, "web");
                assert_eq!(buttons[1].name, "2");
                assert!(!buttons[1].focused);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_weather_units_and_missing_temperature() {
        let mut config = BarConfig::default();
        let weather = WeatherOutput {
            celsius_temp: Some(21.5),
            fahrenheit_temp: Some(70.7),
            status: Some("snow_night".to_string()),
            wind_speed: None,
        };
        let snap = snapshot(vec![("weather", OutputValue::Weather(weather.clone()))]);

        let view = render(&snap, &config, ToggleState::default());
        assert_eq!(
            view.panel("weather").unwrap().body,
            PanelBody::Weather {
                icon: Some(WeatherIcon::SnowNight),
                icon_class: Some("nf-weather-night_alt_snow"),
                text: "22°C".to_string(),
            }
        );

        config.units.temperature = TemperatureUnit::Fahrenheit;
        let view = render(&snap, &config, ToggleState::default());
        match &view.panel("weather").unwrap().body {
            PanelBody::Weather { text, .. } => assert_eq!(text, "71°F"),
            other => panic!("unexpected {:?}", other),
        }

        let bare = snapshot(vec![(
            "weather",
            OutputValue::Weather(WeatherOutput {
                celsius_temp: None,
                fahrenheit_temp: None,
                status: None,
                wind_speed: None,
            }),
        )]);
        let view = render(&bare, &BarConfig::default(), ToggleState::default());
        assert_eq!(
            view.panel("weather").unwrap().body,
            PanelBody::Weather {
                icon: None,
                icon_class: None,
                text: MISSING_READING.to_string(),
            }
        );
    }

    #[test]
    fn test_negative_half_degrees_round_up() {
        let config = BarConfig::default();
        for (celsius, expected) in [(-2.5, "-2°C"), (-0.5, "0°C"), (-7.51, "-8°C")] {
            let snap = snapshot(vec![(
                "weather",
                OutputValue::Weather(WeatherOutput {
                    celsius_temp: Some(celsius),
                    fahrenheit_temp: None,
                    status: Some("clear_night".to_string()),
                    wind_speed: None,
                }),
            )]);
            let view = render(&snap, &config, ToggleState::default());
            match &view.panel("weather").unwrap().body {
                PanelBody::Weather { text, .. } => assert_eq!(text, expected, "{}", celsius),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_toggles_only_change_their_panels() {
        let config = BarConfig::default();
        let snap = snapshot(vec![
            (
                "media",
                OutputValue::Media(MediaOutput {
                    current_session: Some(MediaSession {
                        title: Some("Song".to_string()),
                        artist: None,
                        album_title: None,
                        is_playing: true,
                    }),
                }),
            ),
            (
                "audio",
                OutputValue::Audio(AudioOutput {
                    volume: Some(64),
                    device_name: None,
                }),
            ),
        ]);
        let closed = render(&snap, &config, ToggleState::default());
        let open = render(
            &snap,
            &config,
            ToggleState {
                media_panel: true,
                volume_slider: false,
            },
        );

        assert_eq!(closed.panel("audio"), open.panel("audio"));
        match &open.panel("media").unwrap().body {
            PanelBody::Media {
                title,
                playing,
                expanded,
                ..
            } => {
                assert_eq!(title.as_deref(), Some("Song"));
                assert!(*playing);
                assert!(*expanded);
            }
            other => panic!("unexpected {:?}", other),
        }
        match &closed.panel("audio").unwrap().body {
            PanelBody::Audio { icon, text, slider_open, .. } => {
                assert_eq!(*icon, Some(VolumeIcon::High));
                assert_eq!(text, "64%");
                assert!(!slider_open);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_view_serializes_with_panel_tag() {
        let config = BarConfig::default();
        let snap = snapshot(vec![("cpu", OutputValue::Cpu(CpuOutput { usage: 3.2 }))]);
        let json = serde_json::to_value(render(&snap, &config, ToggleState::default())).unwrap();
        assert_eq!(json["right"][0]["source"], "cpu");
        assert_eq!(json["right"][0]["panel"], "cpu");
        assert_eq!(json["right"][0]["text"], "3%");
    }
}
