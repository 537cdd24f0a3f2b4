mod common;

use pretty_assertions::assert_eq;
use tasktracker::commands::*;
use tasktracker::config::AppConfig;
use tasktracker::error::{Error, StoreError, TimeError};
use tasktracker::storage::{MemoryStore, TaskStore};
use tasktracker::time_util::today;

use common::{run_task, Call, RecordingStore};

#[test]
fn test_add_and_list() {
    let store = MemoryStore::new();
    let id = cmd_add(
        &store,
        "Test Task".into(),
        Some("2024-01-23".into()),
        Some("9:00".into()),
        Some("10:15".into()),
        true,
    )
    .unwrap();

    let tasks = store.list().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, Some(id));
    assert_eq!(tasks[0].activity_name, "Test Task");
    assert_eq!(tasks[0].start_time, "09:00");
    assert_eq!(tasks[0].duration_minutes, 75);
}

#[test]
fn test_add_defaults_to_today() {
    let store = MemoryStore::new();
    cmd_add(&store, "Now".into(), None, Some("08:00".into()), Some("08:00".into()), true).unwrap();
    assert_eq!(store.list().unwrap()[0].date, today());
}

#[test]
fn test_add_rejects_bad_time_without_writing() {
    let store = RecordingStore::default();
    let err = cmd_add(&store, "X".into(), None, Some("25:00".into()), None, true).unwrap_err();
    assert!(matches!(err, Error::Time(TimeError::InvalidTime(_))));
    assert!(store.calls().is_empty());
}

#[test]
fn test_edit_recomputes_duration() {
    let store = RecordingStore::with_tasks([run_task(1)]);
    cmd_edit(&store, 1, None, None, None, Some("07:00".into()), true).unwrap();

    let task = store.get(1).unwrap().unwrap();
    assert_eq!(task.end_time, "07:00");
    assert_eq!(task.duration_minutes, 60);
    assert_eq!(task.activity_name, "Run");
    assert_eq!(store.calls(), vec![Call::Update(Some(1))]);
}

#[test]
fn test_edit_unknown_task() {
    let store = MemoryStore::new();
    let err = cmd_edit(&store, 42, Some("x".into()), None, None, None, true).unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::NotFound(42))));
}

#[test]
fn test_remove_task() {
    let store = RecordingStore::with_tasks([run_task(1), run_task(2)]);
    cmd_remove(&store, 2, true).unwrap();
    assert_eq!(store.calls(), vec![Call::Delete(Some(2))]);
    assert_eq!(store.list().unwrap().len(), 1);

    assert!(cmd_remove(&store, 2, true).is_err());
}

#[test]
fn test_visible_tasks_filters_and_sorts() {
    let mut early = run_task(1);
    early.start_time = "05:00".into();
    let late = run_task(2);
    let mut other_day = run_task(3);
    other_day.date = "2024-01-24".into();
    let store = MemoryStore::with_tasks([early, late, other_day]);

    let ids: Vec<_> = visible_tasks(&store, None).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![Some(3), Some(2), Some(1)]);

    let day: Vec<_> = visible_tasks(&store, Some("2024-01-23")).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(day, vec![Some(2), Some(1)]);

    assert!(visible_tasks(&store, Some("yesterday")).is_err());
}

#[test]
fn test_total_duration() {
    let mut long = run_task(2);
    long.duration_minutes = 90;
    assert_eq!(total_duration(&[run_task(1), long]).num_minutes(), 120);
    assert_eq!(total_duration(&[]).num_minutes(), 0);
}

#[test]
fn test_settings_toggle_persists() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    let mut config = AppConfig::default();

    let state = cmd_settings(&mut config, &path, false, true).unwrap();
    assert!(!state.task_reminder_enabled);
    assert!(!path.exists());

    let state = cmd_settings(&mut config, &path, true, true).unwrap();
    assert!(state.task_reminder_enabled);
    assert!(config.task_reminder_enabled);
    assert!(AppConfig::load_from(&path).unwrap().task_reminder_enabled);

    let state = cmd_settings(&mut config, &path, true, true).unwrap();
    assert!(!state.task_reminder_enabled);
    assert!(!AppConfig::load_from(&path).unwrap().task_reminder_enabled);
}
