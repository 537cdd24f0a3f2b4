use chrono::Duration;
use serde::{Deserialize, Serialize};

/// One recorded activity interval.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Store-assigned identifier. `None` until the task has been inserted.
    #[serde(default)]
    pub id: Option<u64>,
    /// Free-text label for what was done.
    pub activity_name: String,
    /// Day the activity happened (`YYYY-MM-DD`).
    pub date: String,
    /// Start of the interval (`HH:MM`).
    pub start_time: String,
    /// End of the interval (`HH:MM`).
    pub end_time: String,
    /// Derived from `start_time` and `end_time` whenever the task is built.
    pub duration_minutes: i64,
}

impl Task {
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }
}
