//! Configuration management

mod defaults;
mod settings;

pub use defaults::{default_layout, default_sources};
pub use settings::{BarConfig, LayoutConfig, TemperatureUnit, UnitsConfig};
