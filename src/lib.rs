//! zpanel: a reactive desktop status bar
//!
//! This library provides the parts of zpanel that sit around the core:
//! - Bar configuration (sources, layout, units)
//! - The view model rendered from each snapshot
//! - A line-delimited JSON bridge to the widget engine
//! - `Bar`, which wires registry, aggregator and controller together

pub mod app;
pub mod config;
pub mod engine;
pub mod view;

// Re-export commonly used types
pub use app::{ActionOutcome, Bar, UserAction};
pub use config::BarConfig;
pub use view::{render, BarView, PanelBody, PanelView};
