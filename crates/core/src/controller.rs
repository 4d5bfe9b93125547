//! Interaction controller: UI-only toggles and command routing
//!
//! Toggles change only through `toggle`. Commands go straight to the
//! source's handle; nothing here touches the aggregated snapshot. A command's
//! effect, if any, arrives later as a regular update.

use crate::error::{PanelError, PanelResult};
use crate::registry::ProviderRegistry;
use log::{debug, trace, warn};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use zpanel_types::Command;

/// Named panel visibility switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    MediaPanel,
    VolumeSlider,
}

impl Toggle {
    pub const ALL: [Toggle; 2] = [Toggle::MediaPanel, Toggle::VolumeSlider];

    pub fn as_str(&self) -> &'static str {
        match self {
            Toggle::MediaPanel => "media_panel",
            Toggle::VolumeSlider => "volume_slider",
        }
    }
}

impl FromStr for Toggle {
    type Err = PanelError;

    /// Accepts both `media_panel` and `mediaPanel` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "media_panel" | "mediaPanel" => Ok(Toggle::MediaPanel),
            "volume_slider" | "volumeSlider" => Ok(Toggle::VolumeSlider),
            other => Err(PanelError::UnknownToggle(other.to_string())),
        }
    }
}

/// Current value of every toggle; `false` means hidden
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ToggleState {
    pub media_panel: bool,
    pub volume_slider: bool,
}

impl ToggleState {
    pub fn is_shown(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::MediaPanel => self.media_panel,
            Toggle::VolumeSlider => self.volume_slider,
        }
    }

    fn slot(&mut self, toggle: Toggle) -> &mut bool {
        match toggle {
            Toggle::MediaPanel => &mut self.media_panel,
            Toggle::VolumeSlider => &mut self.volume_slider,
        }
    }
}

/// What happened to a dispatched command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Handed to the engine
    Sent,
    /// No live handle; nothing was sent
    NoHandle,
    /// The engine refused it
    Rejected,
}

pub struct InteractionController {
    registry: Arc<ProviderRegistry>,
    toggles: ToggleState,
}

impl InteractionController {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            toggles: ToggleState::default(),
        }
    }

    /// Flip a toggle, returning whether it is now shown
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let slot = self.toggles.slot(toggle);
        *slot = !*slot;
        trace!("Toggle {} is now {}", toggle.as_str(), if *slot { "shown" } else { "hidden" });
        *slot
    }

    /// Flip a toggle by name
    pub fn toggle_named(&mut self, name: &str) -> PanelResult<bool> {
        let toggle = name.parse::<Toggle>()?;
        Ok(self.toggle(toggle))
    }

    pub fn is_shown(&self, toggle: Toggle) -> bool {
        self.toggles.is_shown(toggle)
    }

    pub fn toggles(&self) -> ToggleState {
        self.toggles
    }

    /// Fire `command` at `source` and return without waiting for its effect
    ///
    /// Never fails: missing handles and engine refusals are logged and
    /// reported in the outcome only.
    pub fn dispatch(&self, source: &str, command: Command) -> DispatchOutcome {
        let handle = match self.registry.dispatch_target(source) {
            Ok(handle) => handle,
            Err(e) => {
                debug!("Ignoring {}: {}", command.name(), e);
                return DispatchOutcome::NoHandle;
            }
        };

        match handle.run_command(&command) {
            Ok(()) => {
                debug!("Sent {} to {}", command, source);
                DispatchOutcome::Sent
            }
            Err(e) => {
                let err = PanelError::Command {
                    source_id: source.to_string(),
                    command: command.to_string(),
                    reason: format!("{:#}", e),
                };
                warn!("{}", err);
                DispatchOutcome::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_process::InProcessEngine;
    use std::collections::BTreeMap;
    use zpanel_types::{BasicSourceConfig, SourceConfig};

    fn controller(engine: &InProcessEngine, names: &[&str]) -> InteractionController {
        let sources: BTreeMap<String, SourceConfig> = names
            .iter()
            .map(|n| (n.to_string(), SourceConfig::Media(BasicSourceConfig::default())))
            .collect();
        InteractionController::new(Arc::new(ProviderRegistry::register_all(engine, &sources)))
    }

    #[test]
    fn test_toggles_start_hidden() {
        let ctl = controller(&InProcessEngine::new(), &[]);
        for toggle in Toggle::ALL {
            assert!(!ctl.is_shown(toggle));
        }
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut ctl = controller(&InProcessEngine::new(), &[]);
        let before = ctl.toggles();
        assert!(ctl.toggle(Toggle::MediaPanel));
        assert!(!ctl.toggle(Toggle::MediaPanel));
        assert_eq!(ctl.toggles(), before);

        ctl.toggle(Toggle::VolumeSlider);
        let before = ctl.toggles();
        ctl.toggle_named("mediaPanel").unwrap();
        ctl.toggle_named("media_panel").unwrap();
        assert_eq!(ctl.toggles(), before);
        assert!(ctl.is_shown(Toggle::VolumeSlider));
    }

    #[test]
    fn test_unknown_toggle_name() {
        let mut ctl = controller(&InProcessEngine::new(), &[]);
        assert!(matches!(
            ctl.toggle_named("clock_popup"),
            Err(PanelError::UnknownToggle(_))
        ));
        assert_eq!(ctl.toggles(), ToggleState::default());
    }

    #[test]
    fn test_dispatch_reaches_handle() {
        let engine = InProcessEngine::new();
        let ctl = controller(&engine, &["media"]);
        assert_eq!(ctl.dispatch("media", Command::Next), DispatchOutcome::Sent);
        assert_eq!(
            engine.commands(),
            vec![("media".to_string(), Command::Next)]
        );
    }

    #[test]
    fn test_dispatch_without_handle_is_noop() {
        let engine = InProcessEngine::new().fail_source("media");
        let mut ctl = controller(&engine, &["media"]);
        ctl.toggle(Toggle::VolumeSlider);
        let toggles = ctl.toggles();

        assert_eq!(ctl.dispatch("media", Command::Play), DispatchOutcome::NoHandle);
        assert_eq!(ctl.dispatch("never_configured", Command::Pause), DispatchOutcome::NoHandle);
        assert_eq!(ctl.toggles(), toggles);
        assert!(engine.commands().is_empty());
    }

    #[test]
    fn test_rejected_command_is_swallowed() {
        let engine = InProcessEngine::new().reject_commands("media");
        let ctl = controller(&engine, &["media"]);
        assert_eq!(
            ctl.dispatch("media", Command::SetVolume { volume: 250 }),
            DispatchOutcome::Rejected
        );
    }
}
