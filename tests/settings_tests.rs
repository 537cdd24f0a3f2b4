use std::cell::Cell;
use std::rc::Rc;

use tasktracker::config::AppConfig;
use tasktracker::settings::{SettingsController, SettingsState};

#[test]
fn test_reminder_defaults_off() {
    let settings = SettingsController::default();
    assert!(!settings.state().task_reminder_enabled);
}

#[test]
fn test_toggle_flips_and_notifies() {
    let mut settings = SettingsController::new(SettingsState::default());
    let notified = Rc::new(Cell::new(0));
    let counter = Rc::clone(&notified);
    settings.subscribe(move |_| counter.set(counter.get() + 1));

    settings.toggle_task_reminder();
    assert!(settings.state().task_reminder_enabled);
    settings.toggle_task_reminder();
    assert!(!settings.state().task_reminder_enabled);
    assert_eq!(notified.get(), 2);
}

#[test]
fn test_apply_to_config() {
    let mut config = AppConfig::default();
    let mut settings = SettingsController::new(SettingsState::from(&config));
    settings.toggle_task_reminder();
    settings.apply_to(&mut config);
    assert!(config.task_reminder_enabled);
    assert_eq!(SettingsState::from(&config), settings.state());
}
