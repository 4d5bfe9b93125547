//! zpanel-types: Shared data types for the zpanel status bar.
//!
//! This crate contains pure data types (source configs, provider output
//! shapes and commands) that are shared across all zpanel crates. Nothing
//! here talks to the widget engine; these are the shapes that cross its
//! boundary.

pub mod command;
pub mod output;
pub mod source_configs;

// Re-export commonly used types at the crate root for convenience
pub use command::{Command, MediaTransport};
pub use output::{
    AudioOutput, BatteryOutput, CpuOutput, DateOutput, GlazeWmOutput, MediaOutput, MediaSession,
    MemoryOutput, OutputValue, WeatherOutput, Workspace,
};
pub use source_configs::{
    BasicSourceConfig, DateSourceConfig, SourceConfig, SourceKind, WeatherSourceConfig,
};
