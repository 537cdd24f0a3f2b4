#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use tasktracker::error::StoreError;
use tasktracker::models::Task;
use tasktracker::storage::{MemoryStore, TaskStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Insert(String),
    Update(Option<u64>),
    Delete(Option<u64>),
}

/// Memory store that records every write and can be told to fail them.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    pub calls: RefCell<Vec<Call>>,
    pub fail_writes: Cell<bool>,
}

impl RecordingStore {
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            inner: MemoryStore::with_tasks(tasks),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(call);
        if self.fail_writes.get() {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        Ok(())
    }
}

impl TaskStore for RecordingStore {
    fn insert(&self, task: &Task) -> Result<u64, StoreError> {
        self.record(Call::Insert(task.activity_name.clone()))?;
        self.inner.insert(task)
    }

    fn update(&self, task: &Task) -> Result<(), StoreError> {
        self.record(Call::Update(task.id))?;
        self.inner.update(task)
    }

    fn delete(&self, task: &Task) -> Result<(), StoreError> {
        self.record(Call::Delete(task.id))?;
        self.inner.delete(task)
    }

    fn get(&self, id: u64) -> Result<Option<Task>, StoreError> {
        self.inner.get(id)
    }

    fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.inner.list()
    }
}

pub fn run_task(id: u64) -> Task {
    Task {
        id: Some(id),
        activity_name: "Run".into(),
        date: "2024-01-23".into(),
        start_time: "06:00".into(),
        end_time: "06:30".into(),
        duration_minutes: 30,
    }
}
