//! Error taxonomy for the aggregation and dispatch layer
//!
//! None of these is fatal. Each one is logged where it is detected and the
//! affected panel degrades on its own (missing, stale, or without an icon).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    /// A configured source has not produced a value (yet, or ever)
    #[error("source '{0}' has not produced a value")]
    SourceUnavailable(String),

    /// A command was addressed to a source without a live handle
    #[error("no live handle for source '{0}'")]
    StaleDispatch(String),

    /// An update arrived for a source that was never configured
    #[error("update for unregistered source '{0}'")]
    UnknownUpdate(String),

    /// A categorical value outside the set the presentation layer knows
    #[error("{field} value '{value}' is not a known category")]
    OutOfDomainValue { field: &'static str, value: String },

    #[error("unknown toggle '{0}'")]
    UnknownToggle(String),

    #[error("failed to register source '{name}': {reason}")]
    Registration { name: String, reason: String },

    #[error("source '{source_id}' did not accept '{command}': {reason}")]
    Command {
        source_id: String,
        command: String,
        reason: String,
    },
}

pub type PanelResult<T> = std::result::Result<T, PanelError>;
