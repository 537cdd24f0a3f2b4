use tracing::debug;

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsState {
    pub task_reminder_enabled: bool,
}

impl From<&AppConfig> for SettingsState {
    fn from(config: &AppConfig) -> Self {
        Self {
            task_reminder_enabled: config.task_reminder_enabled,
        }
    }
}

/// View-state holder for the settings screen.
#[derive(Default)]
pub struct SettingsController {
    state: SettingsState,
    listeners: Vec<Box<dyn FnMut(&SettingsState)>>,
}

impl SettingsController {
    pub fn new(state: SettingsState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> SettingsState {
        self.state
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SettingsState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn toggle_task_reminder(&mut self) {
        self.state = SettingsState {
            task_reminder_enabled: !self.state.task_reminder_enabled,
        };
        debug!(enabled = self.state.task_reminder_enabled, "task reminder toggled");
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }

    /// Writes the current settings into `config`.
    pub fn apply_to(&self, config: &mut AppConfig) {
        config.task_reminder_enabled = self.state.task_reminder_enabled;
    }
}
