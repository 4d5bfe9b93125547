//! Provider traits: the boundary with the widget engine
//!
//! The engine owns sampling and command execution. The core only sees a
//! handle per source, obtained once at startup from the `ProviderRegistry`
//! and passed explicitly to whatever needs it.

use anyhow::Result;
use std::sync::Arc;
use zpanel_types::{Command, OutputValue, SourceConfig};

/// Callback invoked with each new value a source emits
pub type UpdateListener = Box<dyn Fn(OutputValue) + Send + Sync>;

/// Handle to one subscribed source
///
/// Implementations must not call listeners while holding a lock that
/// `current_value` or `run_command` also takes.
pub trait ProviderHandle: Send + Sync {
    /// Source name the handle was registered under
    fn name(&self) -> &str;

    /// Last value the source produced, if any
    fn current_value(&self) -> Option<OutputValue>;

    /// Register a listener called on every later update of this source
    fn on_update(&self, listener: UpdateListener);

    /// Fire a command at the provider
    ///
    /// Returning `Ok` only means the engine accepted the request. Its effect,
    /// if any, shows up later as an ordinary update.
    fn run_command(&self, command: &Command) -> Result<()>;
}

/// Shared, type-erased handle
pub type SharedHandle = Arc<dyn ProviderHandle>;

/// The widget engine, as seen at registration time
pub trait ProviderEngine {
    /// Subscribe to one source. Called once per source at startup.
    fn register(&self, name: &str, config: &SourceConfig) -> Result<SharedHandle>;
}
