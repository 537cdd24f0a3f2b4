use chrono::{Duration, Local};
use tracing::{debug, info, warn};

use super::controller::{TaskDetailController, TaskDetailState};
use super::picker::{DatePicker, PickerStep, TimePicker};
use super::Navigator;
use crate::error::{Error, Result};
use crate::models::Task;
use crate::storage::TaskStore;
use crate::time_util::calculate_duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Editing,
    ConfirmingCancel,
    ConfirmingDelete,
    /// Terminal: the screen has navigated back to the list.
    Exiting,
}

/// Modal picker currently open over the form, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Date(DatePicker),
    StartTime(TimePicker),
    EndTime(TimePicker),
}

/// User actions forwarded to the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    EditActivity(String),
    OpenDatePicker,
    OpenStartTimePicker,
    OpenEndTimePicker,
    AdjustPicker(PickerStep),
    ConfirmPicker,
    DismissPicker,
    Cancel,
    Delete,
    Done,
    ConfirmDialog,
    DismissDialog,
}

/// One instance of the task detail screen.
pub struct TaskDetailScreen<S> {
    controller: TaskDetailController<S>,
    state: ScreenState,
    overlay: Overlay,
}

impl<S: TaskStore> TaskDetailScreen<S> {
    pub fn new(controller: TaskDetailController<S>) -> Self {
        Self {
            controller,
            state: ScreenState::Editing,
            overlay: Overlay::None,
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn draft(&self) -> &TaskDetailState {
        self.controller.state()
    }

    /// Delete is only offered for tasks that already exist.
    pub fn delete_available(&self) -> bool {
        self.draft().is_edit_mode
    }

    /// Duration the current draft would be saved with.
    pub fn preview_duration(&self) -> Option<Duration> {
        let draft = self.draft();
        calculate_duration(&draft.start_time, &draft.end_time).ok()
    }

    /// Applies one intent.
    ///
    /// Intents that don't apply to the current state are ignored. A failed
    /// store call doesn't keep the screen open: the screen still exits and
    /// navigates, and the error is returned for the caller to report.
    pub fn handle<N: Navigator>(&mut self, intent: Intent, navigator: &mut N) -> Result<()> {
        match (self.state, intent) {
            (ScreenState::Editing, intent) if self.overlay != Overlay::None => {
                self.handle_overlay(intent);
                Ok(())
            }
            (ScreenState::Editing, Intent::EditActivity(text)) => {
                self.controller.update_activity(text);
                Ok(())
            }
            (ScreenState::Editing, Intent::OpenDatePicker) => {
                let today = Local::now().date_naive();
                self.overlay = Overlay::Date(DatePicker::seeded(&self.draft().date, today));
                Ok(())
            }
            (ScreenState::Editing, Intent::OpenStartTimePicker) => {
                let now = Local::now().time();
                self.overlay = Overlay::StartTime(TimePicker::seeded(&self.draft().start_time, now));
                Ok(())
            }
            (ScreenState::Editing, Intent::OpenEndTimePicker) => {
                let now = Local::now().time();
                self.overlay = Overlay::EndTime(TimePicker::seeded(&self.draft().end_time, now));
                Ok(())
            }
            (ScreenState::Editing, Intent::Cancel) => {
                self.state = ScreenState::ConfirmingCancel;
                Ok(())
            }
            (ScreenState::Editing, Intent::Delete) if self.delete_available() => {
                self.state = ScreenState::ConfirmingDelete;
                Ok(())
            }
            (ScreenState::Editing, Intent::Done) => self.commit(navigator),
            (ScreenState::ConfirmingCancel | ScreenState::ConfirmingDelete, Intent::DismissDialog) => {
                self.state = ScreenState::Editing;
                Ok(())
            }
            (ScreenState::ConfirmingCancel, Intent::ConfirmDialog) => {
                debug!("draft discarded");
                self.exit(navigator);
                Ok(())
            }
            (ScreenState::ConfirmingDelete, Intent::ConfirmDialog) => {
                let task = self.task_for_delete();
                let outcome = self.controller.delete_task(&task);
                self.exit(navigator);
                outcome.map_err(Error::from)
            }
            (state, intent) => {
                debug!(?state, ?intent, "intent ignored");
                Ok(())
            }
        }
    }

    fn handle_overlay(&mut self, intent: Intent) {
        match intent {
            Intent::AdjustPicker(step) => match &mut self.overlay {
                Overlay::Date(p) => p.adjust(step),
                Overlay::StartTime(p) | Overlay::EndTime(p) => p.adjust(step),
                Overlay::None => {}
            },
            Intent::ConfirmPicker => {
                match std::mem::replace(&mut self.overlay, Overlay::None) {
                    Overlay::Date(p) => self.controller.update_date(p.selection()),
                    Overlay::StartTime(p) => self.controller.update_start_time(p.selection()),
                    Overlay::EndTime(p) => self.controller.update_end_time(p.selection()),
                    Overlay::None => {}
                }
            }
            Intent::DismissPicker => self.overlay = Overlay::None,
            other => debug!(intent = ?other, "intent ignored while picker is open"),
        }
    }

    fn commit<N: Navigator>(&mut self, navigator: &mut N) -> Result<()> {
        let task = self.controller.draft_task()?;
        let outcome = if self.draft().is_edit_mode {
            self.controller.update_task(&task)
        } else {
            self.controller.insert_task(&task).map(|id| {
                info!(id, "new task committed");
            })
        };
        self.exit(navigator);
        outcome.map_err(Error::from)
    }

    /// Delete only needs identity, so a draft with unparseable times can
    /// still be deleted.
    fn task_for_delete(&self) -> Task {
        self.controller.draft_task().unwrap_or_else(|e| {
            warn!(error = %e, "deleting task with an invalid draft");
            let draft = self.draft();
            Task {
                id: draft.task_id,
                activity_name: draft.activity_name.clone(),
                date: draft.date.clone(),
                start_time: draft.start_time.clone(),
                end_time: draft.end_time.clone(),
                duration_minutes: 0,
            }
        })
    }

    fn exit<N: Navigator>(&mut self, navigator: &mut N) {
        self.state = ScreenState::Exiting;
        self.overlay = Overlay::None;
        navigator.go_to_list();
    }
}
