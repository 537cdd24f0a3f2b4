use tracing::{debug, warn};

use crate::error::{StoreError, TimeError};
use crate::models::Task;
use crate::storage::TaskStore;
use crate::time_util::calculate_duration;

/// Snapshot of the task being created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailState {
    pub task_id: Option<u64>,
    pub activity_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    /// `true` when editing a stored task, `false` when creating one.
    pub is_edit_mode: bool,
}

impl TaskDetailState {
    /// Empty draft for a new task on `date`, starting and ending at `time`.
    pub fn new_draft(date: impl Into<String>, time: impl Into<String>) -> Self {
        let time = time.into();
        Self {
            task_id: None,
            activity_name: String::new(),
            date: date.into(),
            start_time: time.clone(),
            end_time: time,
            is_edit_mode: false,
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id,
            activity_name: task.activity_name.clone(),
            date: task.date.clone(),
            start_time: task.start_time.clone(),
            end_time: task.end_time.clone(),
            is_edit_mode: true,
        }
    }
}

type Listener = Box<dyn FnMut(&TaskDetailState)>;

/// Owns the draft for one task and mediates every write to the store.
///
/// Each field update replaces the snapshot and notifies subscribers with the
/// new one.
pub struct TaskDetailController<S> {
    store: S,
    state: TaskDetailState,
    listeners: Vec<Listener>,
}

impl<S: TaskStore> TaskDetailController<S> {
    pub fn new(store: S, state: TaskDetailState) -> Self {
        Self {
            store,
            state,
            listeners: Vec::new(),
        }
    }

    /// Controller for a task that doesn't exist yet.
    pub fn for_new_task(store: S, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self::new(store, TaskDetailState::new_draft(date, time))
    }

    /// Controller seeded from a stored task, in edit mode.
    pub fn for_task(store: S, task: &Task) -> Self {
        Self::new(store, TaskDetailState::from_task(task))
    }

    pub fn state(&self) -> &TaskDetailState {
        &self.state
    }

    /// Registers a callback invoked with every new snapshot.
    pub fn subscribe(&mut self, listener: impl FnMut(&TaskDetailState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn set_state(&mut self, state: TaskDetailState) {
        self.state = state;
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }

    pub fn update_activity(&mut self, name: impl Into<String>) {
        let state = TaskDetailState {
            activity_name: name.into(),
            ..self.state.clone()
        };
        self.set_state(state);
    }

    pub fn update_date(&mut self, date: impl Into<String>) {
        let date = date.into();
        debug!(%date, "draft date changed");
        let state = TaskDetailState {
            date,
            ..self.state.clone()
        };
        self.set_state(state);
    }

    pub fn update_start_time(&mut self, time: impl Into<String>) {
        let start_time = time.into();
        debug!(%start_time, "draft start time changed");
        let state = TaskDetailState {
            start_time,
            ..self.state.clone()
        };
        self.set_state(state);
    }

    pub fn update_end_time(&mut self, time: impl Into<String>) {
        let end_time = time.into();
        debug!(%end_time, "draft end time changed");
        let state = TaskDetailState {
            end_time,
            ..self.state.clone()
        };
        self.set_state(state);
    }

    /// Builds a task from the draft with a freshly computed duration.
    pub fn draft_task(&self) -> Result<Task, TimeError> {
        let duration = calculate_duration(&self.state.start_time, &self.state.end_time)?;
        Ok(Task {
            id: self.state.task_id,
            activity_name: self.state.activity_name.clone(),
            date: self.state.date.clone(),
            start_time: self.state.start_time.clone(),
            end_time: self.state.end_time.clone(),
            duration_minutes: duration.num_minutes(),
        })
    }

    pub fn insert_task(&self, task: &Task) -> Result<u64, StoreError> {
        self.store.insert(task).inspect_err(|e| {
            warn!(error = %e, activity = %task.activity_name, "insert failed");
        })
    }

    pub fn update_task(&self, task: &Task) -> Result<(), StoreError> {
        self.store.update(task).inspect_err(|e| {
            warn!(error = %e, id = ?task.id, "update failed");
        })
    }

    pub fn delete_task(&self, task: &Task) -> Result<(), StoreError> {
        self.store.delete(task).inspect_err(|e| {
            warn!(error = %e, id = ?task.id, "delete failed");
        })
    }
}
