//! Output aggregator: merges per-source updates into one published snapshot
//!
//! Readers load the current `Arc<Snapshot>` without locking. Writers are
//! serialized so that each accepted update produces exactly one replacement
//! and one round of listener notifications, in arrival order.

use crate::error::{PanelError, PanelResult};
use crate::registry::ProviderRegistry;
use crate::snapshot::Snapshot;
use arc_swap::ArcSwap;
use log::{debug, trace};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::mpsc::UnboundedReceiver;
use zpanel_types::OutputValue;

/// A new value for one source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUpdate {
    pub source: String,
    pub value: OutputValue,
}

/// Called with every newly published snapshot.
///
/// Listeners run while the writer lock and the listener list's read lock
/// are held. They must not call `OutputAggregator::apply` or
/// `OutputAggregator::subscribe`.
pub type SnapshotListener = Box<dyn Fn(&Arc<Snapshot>) + Send + Sync>;

pub struct OutputAggregator {
    known: HashSet<String>,
    current: ArcSwap<Snapshot>,
    writer: Mutex<()>,
    listeners: RwLock<Vec<SnapshotListener>>,
}

impl OutputAggregator {
    /// Aggregator accepting updates for the given source ids only
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: sources.into_iter().map(Into::into).collect(),
            current: ArcSwap::from_pointee(Snapshot::new()),
            writer: Mutex::new(()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn for_registry(registry: &ProviderRegistry) -> Self {
        Self::new(registry.source_ids())
    }

    /// The current merged snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    pub fn subscribe(&self, listener: SnapshotListener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Merge one update and notify listeners
    ///
    /// Only the updated source's entry changes; every other source keeps its
    /// previous value. Updates for unknown sources are refused.
    pub fn apply(&self, update: SourceUpdate) -> PanelResult<Arc<Snapshot>> {
        if !self.known.contains(&update.source) {
            return Err(PanelError::UnknownUpdate(update.source));
        }

        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(self.current.load().with_update(&update.source, update.value));
        self.current.store(Arc::clone(&next));
        trace!(
            "Applied update for {} (revision {})",
            update.source,
            next.revision()
        );

        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(&next);
        }

        Ok(next)
    }

    /// Drain `updates` until every sender is gone, applying each in order
    pub async fn run(&self, mut updates: UnboundedReceiver<SourceUpdate>) {
        while let Some(update) = updates.recv().await {
            if let Err(e) = self.apply(update) {
                debug!("Dropping update: {}", e);
            }
        }
        debug!("Update channel closed, aggregator stopping");
    }
}
