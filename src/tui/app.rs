use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;
use tracing::{error, info};

use crate::commands::{total_duration, visible_tasks};
use crate::config::AppConfig;
use crate::detail::{
    Intent, Overlay, PickerStep, ScreenState, TaskDetailController, TaskDetailScreen,
};
use crate::models::Task;
use crate::settings::{SettingsController, SettingsState};
use crate::storage::TaskStore;
use crate::time_util::{format_duration, now_time, today};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Detail,
}

/// Form row that has keyboard focus on the detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Date,
    Activity,
    StartTime,
    EndTime,
}

impl DetailField {
    pub fn next(self) -> Self {
        match self {
            DetailField::Date => DetailField::Activity,
            DetailField::Activity => DetailField::StartTime,
            DetailField::StartTime => DetailField::EndTime,
            DetailField::EndTime => DetailField::Date,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            DetailField::Date => DetailField::EndTime,
            DetailField::Activity => DetailField::Date,
            DetailField::StartTime => DetailField::Activity,
            DetailField::EndTime => DetailField::StartTime,
        }
    }
}

pub struct App<S: TaskStore + Clone> {
    pub store: S,
    pub tasks: Vec<Task>,
    pub state: TableState,
    pub input_mode: InputMode,
    pub detail: Option<TaskDetailScreen<S>>,
    pub focus: DetailField,
    pub settings: SettingsController,
    pub config: AppConfig,
    pub config_path: PathBuf,
    /// One-line, non-blocking notice shown under the list.
    pub status_message: Option<String>,
}

impl<S: TaskStore + Clone> App<S> {
    /// Creates a new App instance and loads initial data.
    pub fn new(store: S, config: AppConfig, config_path: PathBuf) -> Self {
        let settings = SettingsController::new(SettingsState::from(&config));
        let mut app = App {
            store,
            tasks: Vec::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            detail: None,
            focus: DetailField::Activity,
            settings,
            config,
            config_path,
            status_message: None,
        };
        app.reload();
        app
    }

    /// Reloads tasks from storage and keeps the selection in range.
    pub fn reload(&mut self) {
        match visible_tasks(&self.store, None) {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => {
                error!(error = %e, "failed to load tasks");
                self.status_message = Some(format!("Failed to load tasks: {}", e));
            }
        }

        if self.tasks.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.tasks.len() {
                self.state.select(Some(self.tasks.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn total(&self) -> String {
        format_duration(total_duration(&self.tasks))
    }

    /// Selects the next task in the list.
    pub fn next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.tasks.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous task in the list.
    pub fn previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.tasks.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.tasks.get(i))
    }

    /// Opens the detail screen with an empty draft.
    pub fn start_add(&mut self) {
        let controller = TaskDetailController::for_new_task(self.store.clone(), today(), now_time());
        self.open_detail(TaskDetailScreen::new(controller));
    }

    /// Opens the detail screen on the selected task.
    pub fn start_edit(&mut self) {
        if let Some(task) = self.selected_task().cloned() {
            let controller = TaskDetailController::for_task(self.store.clone(), &task);
            self.open_detail(TaskDetailScreen::new(controller));
        }
    }

    fn open_detail(&mut self, screen: TaskDetailScreen<S>) {
        self.detail = Some(screen);
        self.focus = DetailField::Activity;
        self.input_mode = InputMode::Detail;
        self.status_message = None;
    }

    /// Forwards an intent to the open detail screen and returns to the list
    /// if the screen navigated away.
    pub fn dispatch(&mut self, intent: Intent) {
        let Some(screen) = self.detail.as_mut() else {
            return;
        };
        let mut back = false;
        let mut go_to_list = || back = true;
        self.status_message = screen
            .handle(intent, &mut go_to_list)
            .err()
            .map(|e| e.to_string());
        if back {
            self.detail = None;
            self.input_mode = InputMode::Normal;
            self.reload();
        }
    }

    /// Translates a key press on the detail screen into focus moves or intents.
    pub fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(screen) = self.detail.as_ref() else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let intent = match (screen.state(), screen.overlay()) {
            (ScreenState::ConfirmingCancel | ScreenState::ConfirmingDelete, _) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Intent::ConfirmDialog),
                KeyCode::Char('n') | KeyCode::Esc => Some(Intent::DismissDialog),
                _ => None,
            },
            (ScreenState::Editing, Overlay::Date(_)) => match key.code {
                KeyCode::Enter => Some(Intent::ConfirmPicker),
                KeyCode::Esc => Some(Intent::DismissPicker),
                KeyCode::Left => Some(Intent::AdjustPicker(PickerStep::Back)),
                KeyCode::Right => Some(Intent::AdjustPicker(PickerStep::Forward)),
                KeyCode::Up => Some(Intent::AdjustPicker(PickerStep::BackLarge)),
                KeyCode::Down => Some(Intent::AdjustPicker(PickerStep::ForwardLarge)),
                _ => None,
            },
            (ScreenState::Editing, Overlay::StartTime(_) | Overlay::EndTime(_)) => match key.code {
                KeyCode::Enter => Some(Intent::ConfirmPicker),
                KeyCode::Esc => Some(Intent::DismissPicker),
                KeyCode::Up => Some(Intent::AdjustPicker(PickerStep::Forward)),
                KeyCode::Down => Some(Intent::AdjustPicker(PickerStep::Back)),
                KeyCode::Right => Some(Intent::AdjustPicker(PickerStep::ForwardLarge)),
                KeyCode::Left => Some(Intent::AdjustPicker(PickerStep::BackLarge)),
                _ => None,
            },
            (ScreenState::Editing, Overlay::None) => match key.code {
                KeyCode::Char('s') if ctrl => Some(Intent::Done),
                KeyCode::Char('d') if ctrl => Some(Intent::Delete),
                KeyCode::Esc => Some(Intent::Cancel),
                KeyCode::Tab | KeyCode::Down => {
                    self.focus = self.focus.next();
                    None
                }
                KeyCode::BackTab | KeyCode::Up => {
                    self.focus = self.focus.previous();
                    None
                }
                KeyCode::Enter => match self.focus {
                    DetailField::Date => Some(Intent::OpenDatePicker),
                    DetailField::StartTime => Some(Intent::OpenStartTimePicker),
                    DetailField::EndTime => Some(Intent::OpenEndTimePicker),
                    DetailField::Activity => None,
                },
                KeyCode::Char(c) if !ctrl && self.focus == DetailField::Activity => {
                    let mut name = screen.draft().activity_name.clone();
                    name.push(c);
                    Some(Intent::EditActivity(name))
                }
                KeyCode::Backspace if self.focus == DetailField::Activity => {
                    let mut name = screen.draft().activity_name.clone();
                    name.pop();
                    Some(Intent::EditActivity(name))
                }
                _ => None,
            },
            (ScreenState::Exiting, _) => None,
        };

        if let Some(intent) = intent {
            self.dispatch(intent);
        }
    }

    /// Flips the task reminder and persists it.
    pub fn toggle_reminder(&mut self) {
        self.settings.toggle_task_reminder();
        self.settings.apply_to(&mut self.config);
        let enabled = self.settings.state().task_reminder_enabled;
        self.status_message = match self.config.save_to(&self.config_path) {
            Ok(()) => {
                info!(enabled, "task reminder setting saved");
                Some(format!("Task reminder {}", if enabled { "on" } else { "off" }))
            }
            Err(e) => {
                error!(error = %e, "failed to save config");
                Some(format!("Failed to save settings: {}", e))
            }
        };
    }
}
