//! Bar: wires the registry, aggregator and controller together
//!
//! Pipeline: provider handle → update channel → `OutputAggregator::apply` →
//! snapshot listeners → `render` → host. User actions go the other way
//! through the `InteractionController` and never touch the snapshot.

use crate::config::BarConfig;
use crate::view::{render, BarView};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use zpanel_core::{
    DispatchOutcome, InteractionController, OutputAggregator, PanelError, ProviderEngine,
    ProviderRegistry, Snapshot, SourceUpdate, Toggle,
};
use zpanel_types::{Command, MediaTransport};

/// Something the user did in the rendered bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserAction {
    Toggle { name: String },
    FocusWorkspace { source: String, workspace: String },
    Media { source: String, transport: MediaTransport },
    SetVolume { source: String, volume: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Toggled { toggle: Toggle, shown: bool },
    Dispatched(DispatchOutcome),
    Ignored,
}

pub struct Bar {
    config: BarConfig,
    registry: Arc<ProviderRegistry>,
    aggregator: Arc<OutputAggregator>,
    controller: InteractionController,
}

impl Bar {
    /// Register every configured source and connect it to a fresh aggregator
    ///
    /// Returns the bar and the receiving end of the update channel, which the
    /// caller drains (see `run`, or `apply` for manual stepping).
    pub fn start<E>(engine: &E, config: BarConfig) -> (Self, UnboundedReceiver<SourceUpdate>)
    where
        E: ProviderEngine + ?Sized,
    {
        let registry = Arc::new(ProviderRegistry::register_all(engine, &config.sources));
        for id in registry.unavailable() {
            warn!("{}; its panel stays hidden", PanelError::SourceUnavailable(id.to_string()));
        }

        let aggregator = Arc::new(OutputAggregator::for_registry(&registry));
        let (tx, rx) = unbounded_channel();
        registry.connect(&tx);

        let controller = InteractionController::new(Arc::clone(&registry));
        info!(
            "Bar started with {} sources",
            registry.source_ids().count()
        );

        (
            Self {
                config,
                registry,
                aggregator,
                controller,
            },
            rx,
        )
    }

    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.aggregator.snapshot()
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Merge one update; unknown sources are logged and dropped
    pub fn apply(&self, update: SourceUpdate) -> Option<Arc<Snapshot>> {
        match self.aggregator.apply(update) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                debug!("Dropping update: {}", e);
                None
            }
        }
    }

    /// Apply every update already waiting in `updates`
    pub fn drain(&self, updates: &mut UnboundedReceiver<SourceUpdate>) -> usize {
        let mut applied = 0;
        while let Ok(update) = updates.try_recv() {
            if self.apply(update).is_some() {
                applied += 1;
            }
        }
        applied
    }

    pub fn render(&self) -> BarView {
        self.render_snapshot(&self.aggregator.snapshot())
    }

    fn render_snapshot(&self, snapshot: &Snapshot) -> BarView {
        render(snapshot, &self.config, self.controller.toggles())
    }

    pub fn handle_action(&mut self, action: UserAction) -> ActionOutcome {
        match action {
            UserAction::Toggle { name } => match name.parse::<Toggle>() {
                Ok(toggle) => ActionOutcome::Toggled {
                    toggle,
                    shown: self.controller.toggle(toggle),
                },
                Err(e) => {
                    warn!("{}", e);
                    ActionOutcome::Ignored
                }
            },
            UserAction::FocusWorkspace { source, workspace } => ActionOutcome::Dispatched(
                self.controller
                    .dispatch(&source, Command::FocusWorkspace { name: workspace }),
            ),
            UserAction::Media { source, transport } => {
                ActionOutcome::Dispatched(self.controller.dispatch(&source, transport.into()))
            }
            UserAction::SetVolume { source, volume } => ActionOutcome::Dispatched(
                self.controller
                    .dispatch(&source, Command::SetVolume { volume }),
            ),
        }
    }

    /// Event loop: merge updates, run actions, emit a view after each change
    ///
    /// Every accepted update publishes a snapshot; a listener forwards it to
    /// the render step. Toggles re-render from the current snapshot. Pending
    /// updates are merged before renders, and renders before actions. Returns
    /// when either input channel closes.
    pub async fn run<F>(
        mut self,
        mut updates: UnboundedReceiver<SourceUpdate>,
        mut actions: UnboundedReceiver<UserAction>,
        mut emit: F,
    ) where
        F: FnMut(&BarView),
    {
        let (published_tx, mut published) = unbounded_channel::<Arc<Snapshot>>();
        self.aggregator.subscribe(Box::new(move |snapshot| {
            let _ = published_tx.send(Arc::clone(snapshot));
        }));

        emit(&self.render());

        loop {
            tokio::select! {
                biased;

                update = updates.recv() => match update {
                    Some(update) => {
                        self.apply(update);
                    }
                    None => break,
                },
                Some(snapshot) = published.recv() => {
                    emit(&self.render_snapshot(&snapshot));
                }
                action = actions.recv() => match action {
                    Some(action) => {
                        if let ActionOutcome::Toggled { .. } = self.handle_action(action) {
                            emit(&self.render());
                        }
                    }
                    None => break,
                },
            }
        }

        debug!("Bar event loop finished");
    }
}
