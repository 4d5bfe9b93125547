//! zpanel-core: Provider registry, output aggregation and interaction
//! dispatch for the zpanel status bar.
//!
//! Updates flow one way: provider handles → `OutputAggregator` → render.
//! User actions flow back through `InteractionController` to the handles.
//! The presentation functions in `presentation` sit in between and are pure.

pub mod aggregator;
pub mod controller;
pub mod error;
pub mod in_process;
pub mod presentation;
pub mod provider;
pub mod registry;
pub mod snapshot;

pub use aggregator::{OutputAggregator, SnapshotListener, SourceUpdate};
pub use controller::{DispatchOutcome, InteractionController, Toggle, ToggleState};
pub use error::{PanelError, PanelResult};
pub use in_process::{InProcessEngine, InProcessHandle};
pub use presentation::{
    battery_tier, volume_icon, weather_icon, BatteryTier, VolumeIcon, WeatherIcon,
};
pub use provider::{ProviderEngine, ProviderHandle, SharedHandle, UpdateListener};
pub use registry::ProviderRegistry;
pub use snapshot::Snapshot;

// Re-export types used in trait signatures for convenience
pub use zpanel_types::{Command, OutputValue, SourceConfig, SourceKind};
