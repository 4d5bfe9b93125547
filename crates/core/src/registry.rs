//! Registry of subscribed sources
//!
//! Built once at startup from the configured `name -> SourceConfig` map. A
//! source that fails to register stays known (so its updates are not
//! mistaken for stray ones and its panel can be reported as unavailable) but
//! has no handle. Nothing is added or removed after construction.

use crate::aggregator::SourceUpdate;
use crate::error::{PanelError, PanelResult};
use crate::provider::{ProviderEngine, SharedHandle};
use log::{debug, info, trace, warn};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use zpanel_types::{OutputValue, SourceConfig};

pub struct ProviderRegistry {
    configs: BTreeMap<String, SourceConfig>,
    handles: HashMap<String, SharedHandle>,
}

impl ProviderRegistry {
    /// Register every configured source with the engine
    ///
    /// Failures are logged and isolated to the failing source.
    pub fn register_all<E>(engine: &E, sources: &BTreeMap<String, SourceConfig>) -> Self
    where
        E: ProviderEngine + ?Sized,
    {
        let mut handles = HashMap::with_capacity(sources.len());

        for (name, config) in sources {
            match engine.register(name, config) {
                Ok(handle) => {
                    debug!("Registered source {} ({})", name, config.kind());
                    handles.insert(name.clone(), handle);
                }
                Err(e) => {
                    let err = PanelError::Registration {
                        name: name.clone(),
                        reason: format!("{:#}", e),
                    };
                    warn!("{}", err);
                }
            }
        }

        info!(
            "Registered {} of {} sources",
            handles.len(),
            sources.len()
        );

        Self {
            configs: sources.clone(),
            handles,
        }
    }

    /// Whether `id` names a configured source (live or not)
    pub fn contains(&self, id: &str) -> bool {
        self.configs.contains_key(id)
    }

    /// Live handle for a source, if it registered successfully
    pub fn handle(&self, id: &str) -> Option<&SharedHandle> {
        self.handles.get(id)
    }

    /// Live handle for a command target
    pub fn dispatch_target(&self, id: &str) -> PanelResult<&SharedHandle> {
        self.handles
            .get(id)
            .ok_or_else(|| PanelError::StaleDispatch(id.to_string()))
    }

    /// All configured source ids, in name order
    pub fn source_ids(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    /// Configured sources that have no live handle
    pub fn unavailable(&self) -> Vec<&str> {
        self.source_ids()
            .filter(|id| !self.handles.contains_key(*id))
            .collect()
    }

    /// Route every handle's updates into `sink`, tagged with the source id
    ///
    /// Values a handle already holds are forwarded immediately so the first
    /// snapshot does not wait for the next tick of each source. The seed is
    /// skipped once the listener has delivered anything, so it can never land
    /// after a newer update.
    pub fn connect(&self, sink: &UnboundedSender<SourceUpdate>) {
        for (id, handle) in &self.handles {
            let fired = Arc::new(Mutex::new(false));

            let tx = sink.clone();
            let source = id.clone();
            let listener_fired = Arc::clone(&fired);
            handle.on_update(Box::new(move |value| {
                let mut fired = listener_fired.lock().unwrap_or_else(PoisonError::into_inner);
                *fired = true;
                forward(&tx, &source, value);
            }));

            let delivered = fired.lock().unwrap_or_else(PoisonError::into_inner);
            if *delivered {
                trace!("Skipping seed for {}, a live update arrived first", id);
                continue;
            }
            if let Some(value) = handle.current_value() {
                forward(sink, id, value);
            }
        }
    }
}

fn forward(sink: &UnboundedSender<SourceUpdate>, source: &str, value: OutputValue) {
    let update = SourceUpdate {
        source: source.to_string(),
        value,
    };
    if sink.send(update).is_err() {
        trace!("Update for {} dropped, aggregator has shut down", source);
    }
}
