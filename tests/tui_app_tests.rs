mod common;

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::{backend::TestBackend, Terminal};
use tasktracker::config::AppConfig;
use tasktracker::detail::{Overlay, ScreenState};
use tasktracker::storage::{MemoryStore, TaskStore};
use tasktracker::tui::app::{App, DetailField, InputMode};
use tasktracker::tui::ui::ui;

use common::{run_task, Call, RecordingStore};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn render<S: TaskStore + Clone>(app: &mut App<S>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|f| ui(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn app_with<S: TaskStore + Clone>(store: S, tmp: &tempfile::TempDir) -> App<S> {
    App::new(store, AppConfig::default(), tmp.path().join("config.toml"))
}

#[test]
fn test_add_task_through_detail_screen() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = Rc::new(MemoryStore::new());
    let mut app = app_with(Rc::clone(&store), &tmp);
    assert!(app.tasks.is_empty());

    app.start_add();
    assert_eq!(app.input_mode, InputMode::Detail);
    assert_eq!(app.focus, DetailField::Activity);
    for c in "Runx".chars() {
        app.handle_detail_key(key(KeyCode::Char(c)));
    }
    app.handle_detail_key(key(KeyCode::Backspace));
    app.handle_detail_key(ctrl('s'));

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.detail.is_none());
    assert_eq!(app.tasks.len(), 1);
    assert_eq!(app.tasks[0].activity_name, "Run");
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_delete_not_offered_for_new_task() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = Rc::new(RecordingStore::default());
    let mut app = app_with(Rc::clone(&store), &tmp);

    app.start_add();
    app.handle_detail_key(ctrl('d'));

    let screen = app.detail.as_ref().unwrap();
    assert_eq!(screen.state(), ScreenState::Editing);
    assert!(store.calls().is_empty());
}

#[test]
fn test_delete_selected_task_with_confirmation() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = Rc::new(RecordingStore::with_tasks([run_task(1)]));
    let mut app = app_with(Rc::clone(&store), &tmp);

    app.start_edit();
    app.handle_detail_key(ctrl('d'));
    assert_eq!(app.detail.as_ref().unwrap().state(), ScreenState::ConfirmingDelete);
    app.handle_detail_key(key(KeyCode::Char('n')));
    assert_eq!(app.detail.as_ref().unwrap().state(), ScreenState::Editing);

    app.handle_detail_key(ctrl('d'));
    app.handle_detail_key(key(KeyCode::Char('y')));

    assert!(app.detail.is_none());
    assert!(app.tasks.is_empty());
    assert_eq!(store.calls(), vec![Call::Delete(Some(1))]);
}

#[test]
fn test_cancel_discards_edits() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = Rc::new(RecordingStore::with_tasks([run_task(1)]));
    let mut app = app_with(Rc::clone(&store), &tmp);

    app.start_edit();
    app.handle_detail_key(key(KeyCode::Char('!')));
    app.handle_detail_key(key(KeyCode::Esc));
    assert_eq!(app.detail.as_ref().unwrap().state(), ScreenState::ConfirmingCancel);
    app.handle_detail_key(key(KeyCode::Enter));

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.tasks[0].activity_name, "Run");
    assert!(store.calls().is_empty());
}

#[test]
fn test_date_picker_keys() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = Rc::new(MemoryStore::with_tasks([run_task(1)]));
    let mut app = app_with(Rc::clone(&store), &tmp);

    app.start_edit();
    app.handle_detail_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
    assert_eq!(app.focus, DetailField::Date);
    app.handle_detail_key(key(KeyCode::Enter));
    assert!(matches!(app.detail.as_ref().unwrap().overlay(), Overlay::Date(_)));

    app.handle_detail_key(key(KeyCode::Right));
    app.handle_detail_key(key(KeyCode::Down));
    app.handle_detail_key(key(KeyCode::Enter));

    let screen = app.detail.as_ref().unwrap();
    assert_eq!(screen.overlay(), &Overlay::None);
    assert_eq!(screen.draft().date, "2024-01-31");
}

#[test]
fn test_time_picker_escape_keeps_value() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = Rc::new(MemoryStore::with_tasks([run_task(1)]));
    let mut app = app_with(Rc::clone(&store), &tmp);

    app.start_edit();
    app.handle_detail_key(key(KeyCode::Tab));
    app.handle_detail_key(key(KeyCode::Tab));
    assert_eq!(app.focus, DetailField::EndTime);
    app.handle_detail_key(key(KeyCode::Enter));
    app.handle_detail_key(key(KeyCode::Up));
    app.handle_detail_key(key(KeyCode::Esc));

    let screen = app.detail.as_ref().unwrap();
    assert_eq!(screen.overlay(), &Overlay::None);
    assert_eq!(screen.state(), ScreenState::Editing);
    assert_eq!(screen.draft().end_time, "06:30");
}

#[test]
fn test_store_failure_shows_status_and_returns_to_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = Rc::new(RecordingStore::with_tasks([run_task(1)]));
    store.fail_writes.set(true);
    let mut app = app_with(Rc::clone(&store), &tmp);

    app.start_edit();
    app.handle_detail_key(ctrl('s'));

    assert_eq!(app.input_mode, InputMode::Normal);
    let msg = app.status_message.clone().unwrap();
    assert!(msg.contains("disk full"), "{}", msg);
}

#[test]
fn test_rejected_done_shows_error_in_detail_view() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut task = run_task(1);
    task.start_time = "6:5am".to_string();
    let store = Rc::new(RecordingStore::with_tasks([task]));
    let mut app = app_with(Rc::clone(&store), &tmp);

    app.start_edit();
    app.handle_detail_key(ctrl('s'));

    assert_eq!(app.input_mode, InputMode::Detail);
    assert!(store.calls().is_empty());
    let screen = render(&mut app);
    assert!(screen.contains("invalid time '6:5am', use HH:MM"), "{}", screen);
    assert!(screen.contains("Ctrl+S: Done"));

    app.handle_detail_key(key(KeyCode::Char('!')));
    assert_eq!(app.status_message, None);
    assert!(!render(&mut app).contains("invalid time"));
}

#[test]
fn test_toggle_reminder_saves_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut app = app_with(Rc::new(MemoryStore::new()), &tmp);

    app.toggle_reminder();

    assert!(app.config.task_reminder_enabled);
    let saved = AppConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert!(saved.task_reminder_enabled);
    assert_eq!(app.status_message.as_deref(), Some("Task reminder on"));
}

#[test]
fn test_list_navigation_wraps() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = Rc::new(MemoryStore::with_tasks([run_task(1), run_task(2)]));
    let mut app = app_with(store, &tmp);

    assert_eq!(app.state.selected(), Some(0));
    app.previous();
    assert_eq!(app.state.selected(), Some(1));
    app.next();
    assert_eq!(app.state.selected(), Some(0));
    assert_eq!(app.total(), "1h 00m");
}
