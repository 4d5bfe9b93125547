//! Built-in bar configuration
//!
//! Used when no config file exists. Mirrors the stock bar: workspaces on the
//! left, calendar and clock in the middle, system readouts on the right.

use std::collections::BTreeMap;
use zpanel_types::{
    BasicSourceConfig, DateSourceConfig, SourceConfig, WeatherSourceConfig,
};

use super::LayoutConfig;

/// Default source set, keyed by source name
pub fn default_sources() -> BTreeMap<String, SourceConfig> {
    let basic = BasicSourceConfig::default;
    let mut sources = BTreeMap::new();
    sources.insert("glazewm".to_string(), SourceConfig::Glazewm(basic()));
    sources.insert(
        "calendar".to_string(),
        SourceConfig::Date(DateSourceConfig::with_formatting("yyyy LLLL dd cccc")),
    );
    sources.insert(
        "date".to_string(),
        SourceConfig::Date(DateSourceConfig::with_formatting("hh:mm:ss a")),
    );
    sources.insert("cpu".to_string(), SourceConfig::Cpu(basic()));
    sources.insert("memory".to_string(), SourceConfig::Memory(basic()));
    sources.insert("battery".to_string(), SourceConfig::Battery(basic()));
    sources.insert(
        "weather".to_string(),
        SourceConfig::Weather(WeatherSourceConfig::default()),
    );
    sources.insert("audio".to_string(), SourceConfig::Audio(basic()));
    sources.insert("media".to_string(), SourceConfig::Media(basic()));
    sources
}

pub fn default_layout() -> LayoutConfig {
    let names = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
    LayoutConfig {
        left: names(&["glazewm"]),
        center: names(&["calendar", "date"]),
        right: names(&["media", "audio", "memory", "cpu", "battery", "weather"]),
    }
}
