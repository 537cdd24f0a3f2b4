use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::StoreError;
use crate::models::Task;

/// Persistence boundary for tasks.
///
/// `update` and `delete` match on `Task::id`.
pub trait TaskStore {
    /// Persists a new task and returns the id assigned to it.
    fn insert(&self, task: &Task) -> Result<u64, StoreError>;
    fn update(&self, task: &Task) -> Result<(), StoreError>;
    fn delete(&self, task: &Task) -> Result<(), StoreError>;
    fn get(&self, id: u64) -> Result<Option<Task>, StoreError>;
    fn list(&self) -> Result<Vec<Task>, StoreError>;
}

impl<T: TaskStore + ?Sized> TaskStore for &T {
    fn insert(&self, task: &Task) -> Result<u64, StoreError> {
        (**self).insert(task)
    }
    fn update(&self, task: &Task) -> Result<(), StoreError> {
        (**self).update(task)
    }
    fn delete(&self, task: &Task) -> Result<(), StoreError> {
        (**self).delete(task)
    }
    fn get(&self, id: u64) -> Result<Option<Task>, StoreError> {
        (**self).get(id)
    }
    fn list(&self) -> Result<Vec<Task>, StoreError> {
        (**self).list()
    }
}

impl<T: TaskStore + ?Sized> TaskStore for Rc<T> {
    fn insert(&self, task: &Task) -> Result<u64, StoreError> {
        (**self).insert(task)
    }
    fn update(&self, task: &Task) -> Result<(), StoreError> {
        (**self).update(task)
    }
    fn delete(&self, task: &Task) -> Result<(), StoreError> {
        (**self).delete(task)
    }
    fn get(&self, id: u64) -> Result<Option<Task>, StoreError> {
        (**self).get(id)
    }
    fn list(&self) -> Result<Vec<Task>, StoreError> {
        (**self).list()
    }
}

/// Returns the path to the tasks database file (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `TASKS_DB` environment variable.
/// 2. `data_file` from the config.
/// 3. `~/.local/share/tasktracker/tasks.json` (on Linux).
/// 4. `./tasks.json` (fallback).
pub fn db_path(config: &AppConfig) -> PathBuf {
    if let Ok(p) = std::env::var("TASKS_DB") {
        return PathBuf::from(p);
    }
    if let Some(p) = &config.data_file {
        return p.clone();
    }
    data_dir().join("tasks.json")
}

/// Directory holding the tasks database and the log file.
pub fn data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(p) => p.join("tasktracker"),
        None => PathBuf::from("."),
    }
}

/// Stores all tasks as a pretty-printed JSON array in a single file.
///
/// Every operation reads the whole file and writes it back.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all tasks. A missing file is an empty store.
    fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let s = fs::read_to_string(&self.path)?;
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&s)?)
    }

    /// Overwrites the file with `tasks`.
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let s = serde_json::to_string_pretty(tasks)?;
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        f.write_all(s.as_bytes())?;
        debug!(path = %self.path.display(), count = tasks.len(), "tasks saved");
        Ok(())
    }
}

fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().filter_map(|t| t.id).max().unwrap_or(0) + 1
}

fn require_id(task: &Task) -> Result<u64, StoreError> {
    task.id.ok_or(StoreError::MissingId)
}

impl TaskStore for JsonFileStore {
    fn insert(&self, task: &Task) -> Result<u64, StoreError> {
        let mut tasks = self.load_tasks()?;
        let id = next_id(&tasks);
        tasks.push(Task {
            id: Some(id),
            ..task.clone()
        });
        self.save_tasks(&tasks)?;
        info!(id, activity = %task.activity_name, "task inserted");
        Ok(id)
    }

    fn update(&self, task: &Task) -> Result<(), StoreError> {
        let id = require_id(task)?;
        let mut tasks = self.load_tasks()?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or(StoreError::NotFound(id))?;
        *slot = task.clone();
        self.save_tasks(&tasks)?;
        info!(id, "task updated");
        Ok(())
    }

    fn delete(&self, task: &Task) -> Result<(), StoreError> {
        let id = require_id(task)?;
        let mut tasks = self.load_tasks()?;
        let len_before = tasks.len();
        tasks.retain(|t| t.id != Some(id));
        if tasks.len() == len_before {
            return Err(StoreError::NotFound(id));
        }
        self.save_tasks(&tasks)?;
        info!(id, "task deleted");
        Ok(())
    }

    fn get(&self, id: u64) -> Result<Option<Task>, StoreError> {
        Ok(self.load_tasks()?.into_iter().find(|t| t.id == Some(id)))
    }

    fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.load_tasks()
    }
}

/// Keeps tasks in memory; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RefCell<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `tasks`. Tasks without an id get one.
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let store = Self::new();
        for task in tasks {
            let mut stored = store.tasks.borrow_mut();
            let id = task.id.unwrap_or_else(|| next_id(&stored));
            stored.push(Task { id: Some(id), ..task });
        }
        store
    }
}

impl TaskStore for MemoryStore {
    fn insert(&self, task: &Task) -> Result<u64, StoreError> {
        let mut tasks = self.tasks.borrow_mut();
        let id = next_id(&tasks);
        tasks.push(Task {
            id: Some(id),
            ..task.clone()
        });
        Ok(id)
    }

    fn update(&self, task: &Task) -> Result<(), StoreError> {
        let id = require_id(task)?;
        let mut tasks = self.tasks.borrow_mut();
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or(StoreError::NotFound(id))?;
        *slot = task.clone();
        Ok(())
    }

    fn delete(&self, task: &Task) -> Result<(), StoreError> {
        let id = require_id(task)?;
        let mut tasks = self.tasks.borrow_mut();
        let len_before = tasks.len();
        tasks.retain(|t| t.id != Some(id));
        if tasks.len() == len_before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn get(&self, id: u64) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.borrow().iter().find(|t| t.id == Some(id)).cloned())
    }

    fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.borrow().clone())
    }
}
