use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use super::app::{App, DetailField, InputMode};
use crate::detail::{Overlay, ScreenState, TaskDetailScreen};
use crate::storage::TaskStore;
use crate::time_util::format_duration;

pub fn ui<S: TaskStore + Clone>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3)  // Help / status
        ].as_ref())
        .split(f.area());

    let rows: Vec<Row> = app
        .tasks
        .iter()
        .map(|t| {
            let end = if t.end_time < t.start_time {
                format!("{} (+1d)", t.end_time)
            } else {
                t.end_time.clone()
            };
            Row::new(vec![
                Cell::from(t.id.map(|id| id.to_string()).unwrap_or_default()),
                Cell::from(t.date.clone()),
                Cell::from(t.activity_name.clone()),
                Cell::from(t.start_time.clone()),
                Cell::from(end),
                Cell::from(format_duration(t.duration())).style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(7),
        Constraint::Length(12),
        Constraint::Length(9),
    ];

    let reminder = if app.settings.state().task_reminder_enabled { "on" } else { "off" };
    let title = format!(
        "Task Tracker - {} tasks, {} total - reminder {}",
        app.tasks.len(),
        app.total(),
        reminder
    );

    let table = Table::new(rows, widths)
        .header(Row::new(vec!["ID", "Date", "Activity", "Start", "End", "Duration"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let help_line = match (&app.status_message, app.input_mode) {
        (Some(msg), InputMode::Normal) => Line::from(msg.clone()),
        (None, InputMode::Normal) => Line::from("q: Quit | a: Add | Enter/e: Edit | r: Toggle Reminder"),
        // The detail screen stays open on a rejected Done, so show why.
        (Some(msg), InputMode::Detail) => Line::from(vec![
            Span::styled(msg.clone(), Style::default().fg(Color::Red)),
            Span::raw(" | "),
            Span::raw(detail_help(app)),
        ]),
        (None, InputMode::Detail) => Line::from(detail_help(app)),
    };

    let help = Paragraph::new(help_line)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[1]);

    if let Some(screen) = &app.detail {
        render_detail(f, screen, app.focus);
    }
}

fn detail_help<S: TaskStore + Clone>(app: &App<S>) -> String {
    let Some(screen) = &app.detail else {
        return String::new();
    };
    match (screen.state(), screen.overlay()) {
        (ScreenState::ConfirmingCancel | ScreenState::ConfirmingDelete, _) => {
            "y/Enter: OK | n/Esc: Cancel".to_string()
        }
        (_, Overlay::Date(_)) => "←/→: Day | ↑/↓: Week | Enter: OK | Esc: Cancel".to_string(),
        (_, Overlay::StartTime(_) | Overlay::EndTime(_)) => {
            "↑/↓: Minute | ←/→: Hour | Enter: OK | Esc: Cancel".to_string()
        }
        _ => {
            let mut text = "Tab: Next Field | Enter: Pick | Ctrl+S: Done | Esc: Cancel".to_string();
            if screen.delete_available() {
                text.push_str(" | Ctrl+D: Delete");
            }
            text
        }
    }
}

fn render_detail<S: TaskStore>(f: &mut Frame, screen: &TaskDetailScreen<S>, focus: DetailField) {
    let area = centered_rect(60, 10, f.area());
    f.render_widget(Clear, area);

    let draft = screen.draft();
    let field = |label: &str, value: &str, this: DetailField| {
        let style = if this == focus {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default().fg(Color::Green)
        };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {} ", value), style),
        ])
    };

    let duration = screen
        .preview_duration()
        .map(format_duration)
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        field("DATE", &draft.date, DetailField::Date),
        field("ACTIVITY", &draft.activity_name, DetailField::Activity),
        field("START", &draft.start_time, DetailField::StartTime),
        field("END", &draft.end_time, DetailField::EndTime),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{:<10}", "DURATION"), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" {}", duration)),
        ]),
    ];

    let title = if draft.is_edit_mode { "Edit Task" } else { "New Task" };
    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(form, area);

    match screen.overlay() {
        Overlay::Date(p) => {
            let text = format!("◀ {} ({}) ▶", p.selection(), p.value().format("%a"));
            render_popup(f, "Select date", &text);
        }
        Overlay::StartTime(p) | Overlay::EndTime(p) => {
            let text = format!("{:02} : {:02}", p.hour(), p.minute());
            render_popup(f, "Select time", &text);
        }
        Overlay::None => {}
    }

    match screen.state() {
        ScreenState::ConfirmingCancel => render_popup(f, "Cancel", "Discard changes to this task?"),
        ScreenState::ConfirmingDelete => render_popup(f, "Delete", "Delete this task?"),
        _ => {}
    }
}

fn render_popup(f: &mut Frame, title: &str, text: &str) {
    let area = centered_rect(40, 3, f.area());
    f.render_widget(Clear, area);
    let popup = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Length(margin),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
