//! In-process provider engine
//!
//! Sources are fed by calling `push`; commands are recorded instead of
//! executed. Backs the test suites and the binary's `--demo` mode.

use crate::provider::{ProviderEngine, ProviderHandle, SharedHandle, UpdateListener};
use anyhow::{anyhow, bail, Result};
use arc_swap::ArcSwapOption;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use zpanel_types::{Command, OutputValue, SourceConfig};

type CommandLog = Arc<Mutex<Vec<(String, Command)>>>;

pub struct InProcessHandle {
    name: String,
    latest: ArcSwapOption<OutputValue>,
    listeners: RwLock<Vec<UpdateListener>>,
    rejects_commands: bool,
    commands: CommandLog,
}

impl InProcessHandle {
    /// Store a new value and notify listeners
    pub fn push(&self, value: OutputValue) {
        self.latest.store(Some(Arc::new(value.clone())));
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(value.clone());
        }
    }
}

impl ProviderHandle for InProcessHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn current_value(&self) -> Option<OutputValue> {
        self.latest.load_full().map(|v| (*v).clone())
    }

    fn on_update(&self, listener: UpdateListener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    fn run_command(&self, command: &Command) -> Result<()> {
        if self.rejects_commands {
            bail!("{} does not accept commands", self.name);
        }
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((self.name.clone(), command.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct InProcessEngine {
    handles: Mutex<HashMap<String, Arc<InProcessHandle>>>,
    failing: HashSet<String>,
    rejecting: HashSet<String>,
    commands: CommandLog,
}

impl InProcessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make registration of `name` fail
    pub fn fail_source(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Make every command sent to `name` fail
    pub fn reject_commands(mut self, name: &str) -> Self {
        self.rejecting.insert(name.to_string());
        self
    }

    pub fn handle(&self, name: &str) -> Option<Arc<InProcessHandle>> {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Emit a value from source `name`. Returns false if it never registered.
    pub fn push(&self, name: &str, value: OutputValue) -> bool {
        // Clone the handle out so listeners run without the map locked
        match self.handle(name) {
            Some(handle) => {
                handle.push(value);
                true
            }
            None => {
                debug!("No registered source {}, dropping value", name);
                false
            }
        }
    }

    /// Commands accepted so far, oldest first
    pub fn commands(&self) -> Vec<(String, Command)> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProviderEngine for InProcessEngine {
    fn register(&self, name: &str, config: &SourceConfig) -> Result<SharedHandle> {
        if self.failing.contains(name) {
            return Err(anyhow!("{} provider failed to start", config.kind()));
        }

        let handle = Arc::new(InProcessHandle {
            name: name.to_string(),
            latest: ArcSwapOption::empty(),
            listeners: RwLock::new(Vec::new()),
            rejects_commands: self.rejecting.contains(name),
            commands: Arc::clone(&self.commands),
        });
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Arc::clone(&handle));
        Ok(handle)
    }
}
