use std::path::Path;

use chrono::Duration;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::config::AppConfig;
use crate::detail::TaskDetailController;
use crate::error::{Result, StoreError};
use crate::models::Task;
use crate::settings::{SettingsController, SettingsState};
use crate::storage::TaskStore;
use crate::time_util::{format_duration, normalize_date, normalize_time, now_time, today};

/// Records a new task.
///
/// `date` defaults to today, `start` and `end` to the current time. Returns
/// the id assigned by the store.
pub fn cmd_add<S: TaskStore>(
    store: S,
    activity: String,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    silent: bool,
) -> Result<u64> {
    let mut controller = TaskDetailController::for_new_task(store, today(), now_time());
    controller.update_activity(activity);
    if let Some(d) = date {
        controller.update_date(normalize_date(&d)?);
    }
    if let Some(s) = start {
        controller.update_start_time(normalize_time(&s)?);
    }
    if let Some(e) = end {
        controller.update_end_time(normalize_time(&e)?);
    }

    let task = controller.draft_task()?;
    let id = controller.insert_task(&task)?;
    if !silent {
        println!("Task added (id = {}, {})", id, format_duration(task.duration()));
    }
    Ok(id)
}

/// Changes the given fields of a stored task and recomputes its duration.
pub fn cmd_edit<S: TaskStore>(
    store: S,
    id: u64,
    activity: Option<String>,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    silent: bool,
) -> Result<()> {
    let existing = store.get(id)?.ok_or(StoreError::NotFound(id))?;
    let mut controller = TaskDetailController::for_task(store, &existing);
    if let Some(a) = activity {
        controller.update_activity(a);
    }
    if let Some(d) = date {
        controller.update_date(normalize_date(&d)?);
    }
    if let Some(s) = start {
        controller.update_start_time(normalize_time(&s)?);
    }
    if let Some(e) = end {
        controller.update_end_time(normalize_time(&e)?);
    }

    let task = controller.draft_task()?;
    controller.update_task(&task)?;
    if !silent {
        println!("Task {} updated.", id);
    }
    Ok(())
}

/// Removes a task from the store by id.
pub fn cmd_remove<S: TaskStore>(store: S, id: u64, silent: bool) -> Result<()> {
    let existing = store.get(id)?.ok_or(StoreError::NotFound(id))?;
    let controller = TaskDetailController::for_task(store, &existing);
    controller.delete_task(&existing)?;
    if !silent {
        println!("Task {} removed.", id);
    }
    Ok(())
}

/// Tasks to show in a list, most recent first, optionally restricted to one day.
pub fn visible_tasks<S: TaskStore>(store: &S, date: Option<&str>) -> Result<Vec<Task>> {
    let mut tasks = store.list()?;
    if let Some(d) = date {
        let d = normalize_date(d)?;
        tasks.retain(|t| t.date == d);
    }
    tasks.sort_by(|a, b| (&b.date, &b.start_time).cmp(&(&a.date, &a.start_time)));
    Ok(tasks)
}

pub fn total_duration(tasks: &[Task]) -> Duration {
    tasks.iter().fold(Duration::zero(), |acc, t| acc + t.duration())
}

/// Lists tasks in a formatted table with a total row.
pub fn cmd_list<S: TaskStore>(store: S, date: Option<String>) -> Result<()> {
    let tasks = visible_tasks(&store, date.as_deref())?;
    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Activity").add_attribute(Attribute::Bold),
            Cell::new("Date").add_attribute(Attribute::Bold),
            Cell::new("Start").add_attribute(Attribute::Bold),
            Cell::new("End").add_attribute(Attribute::Bold),
            Cell::new("Duration").add_attribute(Attribute::Bold),
        ]);

    for t in &tasks {
        // end before start means the task ran past midnight
        let end_cell = if t.end_time < t.start_time {
            Cell::new(format!("{} (+1d)", t.end_time)).fg(Color::Yellow)
        } else {
            Cell::new(&t.end_time)
        };
        table.add_row(vec![
            Cell::new(t.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(&t.activity_name),
            Cell::new(&t.date),
            Cell::new(&t.start_time),
            end_cell,
            Cell::new(format_duration(t.duration())).fg(Color::Green),
        ]);
    }
    table.add_row(vec![
        Cell::new(""),
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format_duration(total_duration(&tasks))).add_attribute(Attribute::Bold),
    ]);

    println!("{table}");
    Ok(())
}

/// Shows settings, flipping the task reminder first if requested.
pub fn cmd_settings(
    config: &mut AppConfig,
    config_path: &Path,
    toggle_reminder: bool,
    silent: bool,
) -> Result<SettingsState> {
    let mut settings = SettingsController::new(SettingsState::from(&*config));
    if toggle_reminder {
        settings.toggle_task_reminder();
        settings.apply_to(config);
        config.save_to(config_path)?;
    }
    let state = settings.state();
    if !silent {
        println!(
            "Task reminder: {}",
            if state.task_reminder_enabled { "on" } else { "off" }
        );
    }
    Ok(state)
}
