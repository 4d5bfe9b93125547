//! Commands forwarded to providers.
//!
//! The core never validates arguments: an out-of-range volume or a command
//! sent to a provider kind that does not support it is the engine's to
//! reject.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Media transport action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaTransport {
    Play,
    Pause,
    TogglePlayPause,
    Next,
    Previous,
}

/// A command for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    FocusWorkspace { name: String },
    Play,
    Pause,
    TogglePlayPause,
    Next,
    Previous,
    SetVolume { volume: u32 },
}

impl Command {
    /// Short command name, used in logs and on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Command::FocusWorkspace { .. } => "focus_workspace",
            Command::Play => "play",
            Command::Pause => "pause",
            Command::TogglePlayPause => "toggle_play_pause",
            Command::Next => "next",
            Command::Previous => "previous",
            Command::SetVolume { .. } => "set_volume",
        }
    }
}

impl From<MediaTransport> for Command {
    fn from(transport: MediaTransport) -> Self {
        match transport {
            MediaTransport::Play => Command::Play,
            MediaTransport::Pause => Command::Pause,
            MediaTransport::TogglePlayPause => Command::TogglePlayPause,
            MediaTransport::Next => Command::Next,
            MediaTransport::Previous => Command::Previous,
        }
    }
}

/// Renders the engine's command-line form (e.g. `focus --workspace 2`)
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::FocusWorkspace { name } => write!(f, "focus --workspace {}", name),
            Command::SetVolume { volume } => write!(f, "set_volume {}", volume),
            other => f.write_str(other.name()),
        }
    }
}
