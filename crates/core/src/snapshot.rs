//! Immutable merged view of the latest value per source

use crate::error::{PanelError, PanelResult};
use std::collections::HashMap;
use zpanel_types::OutputValue;

/// Latest known output of every source that has produced one
///
/// Never mutated once published. `with_update` builds the successor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    values: HashMap<String, OutputValue>,
    /// Number of updates merged so far
    revision: u64,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this snapshot with `source` replaced by `value`
    pub fn with_update(&self, source: &str, value: OutputValue) -> Self {
        let mut values = self.values.clone();
        values.insert(source.to_string(), value);
        Self {
            values,
            revision: self.revision + 1,
        }
    }

    pub fn get(&self, source: &str) -> Option<&OutputValue> {
        self.values.get(source)
    }

    /// Like `get`, but reports absence as `SourceUnavailable`
    pub fn require(&self, source: &str) -> PanelResult<&OutputValue> {
        self.values
            .get(source)
            .ok_or_else(|| PanelError::SourceUnavailable(source.to_string()))
    }

    pub fn contains(&self, source: &str) -> bool {
        self.values.contains_key(source)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
