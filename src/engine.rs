//! Line-delimited JSON bridge to an external widget engine
//!
//! Outbound events (one JSON object per line on the writer):
//! - `{"event":"subscribe","source":"cpu","config":{"type":"cpu"}}`
//! - `{"event":"command","source":"glazewm","command":{...},"line":"focus --workspace 2"}`
//! - `{"event":"render","view":{...}}`
//!
//! Inbound messages (one per line, from the engine or the UI host):
//! - `{"type":"output","source":"cpu","output":{"usage":12.5}}`
//! - `{"type":"error","source":"weather","message":"offline"}`
//! - `{"type":"action","action":{"kind":"toggle","name":"media_panel"}}`

use crate::app::UserAction;
use crate::view::BarView;
use anyhow::{bail, Result};
use arc_swap::ArcSwapOption;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use thiserror::Error;
use zpanel_core::{ProviderEngine, ProviderHandle, SharedHandle, UpdateListener};
use zpanel_types::{Command, OutputValue, SourceConfig, SourceKind};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("output for unsubscribed source '{0}'")]
    UnknownSource(String),

    #[error("bad {kind} payload from '{source_id}': {error}")]
    BadPayload {
        source_id: String,
        kind: SourceKind,
        error: serde_json::Error,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OutboundEvent<'a> {
    Subscribe {
        source: &'a str,
        config: &'a SourceConfig,
    },
    Command {
        source: &'a str,
        command: &'a Command,
        line: String,
    },
    Render {
        view: &'a BarView,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    Output {
        source: String,
        output: serde_json::Value,
    },
    Error {
        source: String,
        message: String,
    },
    Action {
        action: UserAction,
    },
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

fn write_event(out: &SharedWriter, event: &OutboundEvent<'_>) -> Result<()> {
    let line = serde_json::to_string(event)?;
    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}

pub struct StdioHandle {
    name: String,
    kind: SourceKind,
    latest: ArcSwapOption<OutputValue>,
    listeners: RwLock<Vec<UpdateListener>>,
    /// Set while the engine reports the provider as broken
    failed: AtomicBool,
    out: SharedWriter,
}

impl StdioHandle {
    fn deliver(&self, value: OutputValue) {
        self.failed.store(false, Ordering::Relaxed);
        self.latest.store(Some(Arc::new(value.clone())));
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(value.clone());
        }
    }
}

impl ProviderHandle for StdioHandle {
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
        if self.failed.load(Ordering::Relaxed) {
            bail!("{} provider is reporting an error", self.kind);
        }
        write_event(
            &self.out,
            &OutboundEvent::Command {
                source: &self.name,
                command,
                line: command.to_string(),
            },
        )
    }
}

pub struct StdioEngine {
    out: SharedWriter,
    handles: Mutex<HashMap<String, Arc<StdioHandle>>>,
}

impl StdioEngine {
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(out))),
            handles: Mutex::new(HashMap::new()),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    pub fn emit_render(&self, view: &BarView) -> Result<()> {
        write_event(&self.out, &OutboundEvent::Render { view })
    }

    fn handle(&self, name: &str) -> Option<Arc<StdioHandle>> {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Process one inbound line
    ///
    /// Provider outputs and errors are routed to their handles; user actions
    /// are returned for the caller to run. Blank lines are ignored.
    pub fn handle_line(&self, line: &str) -> Result<Option<UserAction>, ProtocolError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<InboundMessage>(line)? {
            InboundMessage::Output { source, output } => {
                let handle = self
                    .handle(&source)
                    .ok_or_else(|| ProtocolError::UnknownSource(source.clone()))?;
                let value = OutputValue::from_json(handle.kind, output).map_err(|error| {
                    ProtocolError::BadPayload {
                        source_id: source.clone(),
                        kind: handle.kind,
                        error,
                    }
                })?;
                handle.deliver(value);
                Ok(None)
            }
            InboundMessage::Error { source, message } => {
                match self.handle(&source) {
                    Some(handle) => {
                        warn!("Provider {} reported an error: {}", source, message);
                        handle.failed.store(true, Ordering::Relaxed);
                    }
                    None => debug!("Error for unsubscribed source {}: {}", source, message),
                }
                Ok(None)
            }
            InboundMessage::Action { action } => Ok(Some(action)),
        }
    }
}

impl ProviderEngine for StdioEngine {
    fn register(&self, name: &str, config: &SourceConfig) -> Result<SharedHandle> {
        write_event(
            &self.out,
            &OutboundEvent::Subscribe {
                source: name,
                config,
            },
        )?;

        let handle = Arc::new(StdioHandle {
            name: name.to_string(),
            kind: config.kind(),
            latest: ArcSwapOption::empty(),
            listeners: RwLock::new(Vec::new()),
            failed: AtomicBool::new(false),
            out: Arc::clone(&self.out),
        });
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Arc::clone(&handle));
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use zpanel_types::BasicSourceConfig;

    /// Writer whose contents stay readable after being moved into the engine
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }
    }

    fn engine_with(source: &str, config: SourceConfig) -> (StdioEngine, SharedHandle, Captured) {
        let out = Captured::default();
        let engine = StdioEngine::new(out.clone());
        let handle = engine.register(source, &config).unwrap();
        (engine, handle, out)
    }

    #[test]
    fn test_register_emits_subscribe() {
        let (_engine, _handle, out) =
            engine_with("cpu", SourceConfig::Cpu(BasicSourceConfig::default()));
        let lines = out.lines();
        assert_eq!(lines[0]["event"], "subscribe");
        assert_eq!(lines[0]["source"], "cpu");
        assert_eq!(lines[0]["config"]["type"], "cpu");
    }

    #[test]
    fn test_output_reaches_listeners() {
        let (engine, handle, _out) =
            engine_with("battery", SourceConfig::Battery(BasicSourceConfig::default()));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        handle.on_update(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let action = engine
            .handle_line(r#"{"type":"output","source":"battery","output":{"chargePercent":55,"isCharging":true}}"#)
            .unwrap();
        assert!(action.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let value = handle.current_value().unwrap();
        assert_eq!(value.as_battery().unwrap().charge_percent, 55.0);
    }

    #[test]
    fn test_bad_lines_are_reported() {
        let (engine, handle, _out) =
            engine_with("cpu", SourceConfig::Cpu(BasicSourceConfig::default()));
        assert!(matches!(
            engine.handle_line("not json"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            engine.handle_line(r#"{"type":"output","source":"gpu","output":{}}"#),
            Err(ProtocolError::UnknownSource(_))
        ));
        assert!(matches!(
            engine.handle_line(r#"{"type":"output","source":"cpu","output":{"volume":3}}"#),
            Err(ProtocolError::BadPayload { kind: SourceKind::Cpu, .. })
        ));
        assert!(engine.handle_line("   ").unwrap().is_none());
        assert!(handle.current_value().is_none());
    }

    #[test]
    fn test_commands_are_written_until_provider_errors() {
        let (engine, handle, out) =
            engine_with("glazewm", SourceConfig::Glazewm(BasicSourceConfig::default()));
        handle
            .run_command(&Command::FocusWorkspace {
                name: "2".to_string(),
            })
            .unwrap();
        let lines = out.lines();
        assert_eq!(lines[1]["event"], "command");
        assert_eq!(lines[1]["line"], "focus --workspace 2");
        assert_eq!(lines[1]["command"]["type"], "focus_workspace");

        engine
            .handle_line(r#"{"type":"error","source":"glazewm","message":"ipc closed"}"#)
            .unwrap();
        assert!(handle.run_command(&Command::Next).is_err());
        assert_eq!(out.lines().len(), 2);
    }

    #[test]
    fn test_action_lines_are_returned() {
        let engine = StdioEngine::new(Captured::default());
        let action = engine
            .handle_line(r#"{"type":"action","action":{"kind":"toggle","name":"media_panel"}}"#)
            .unwrap();
        assert_eq!(
            action,
            Some(UserAction::Toggle {
                name: "media_panel".to_string()
            })
        );
    }
}
