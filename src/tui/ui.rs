use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use crate::view::format_scheduled;
use super::app::{App, InputField, InputMode};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3)  // Help
        ].as_ref())
        .split(f.area());

    let editing = app.session.editing_id();
    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|t| {
            let style = if t.completed {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            } else if editing == Some(t.id) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(t.text.clone()),
                Cell::from(format_scheduled(t.scheduled_at, &app.config.display_format)),
                Cell::from(if t.completed { "Done" } else { "Pending" }),
            ]).style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(8),
    ];

    let title = if app.show_completed { "Taskpad - Tasks" } else { "Taskpad - Pending Tasks" };
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Task", "Scheduled", "Status"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let help_text = match app.input_mode {
        InputMode::Normal => "q: Quit | a: Add | e: Edit | Space: Done/Undo | d: Del | c: Toggle Done",
        InputMode::Adding => "Tab: Switch Field | Enter: Add | Esc: Close",
        InputMode::Editing => "Tab: Switch Field | Enter: Save | Esc: Cancel",
    };
    let (help_text, help_style) = match &app.status {
        Some(status) => (status.as_str(), Style::default().fg(Color::Red)),
        None => (help_text, Style::default().fg(Color::Gray)),
    };

    let help = Paragraph::new(help_text)
        .style(help_style)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[1]);

    // Render the form if needed
    let title = match app.input_mode {
        InputMode::Adding => "Add Task",
        InputMode::Editing => "Edit Task",
        InputMode::Normal => return,
    };

    let area = centered_rect(60, 8, f.area());
    f.render_widget(Clear, area);
    let form = Block::default().borders(Borders::ALL).title(title);
    let inner = form.inner(area);
    f.render_widget(form, area);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)].as_ref())
        .split(inner);

    let (text, schedule) = match app.input_mode {
        InputMode::Adding => (app.add_form.text.as_str(), app.add_form.schedule.as_str()),
        _ => (app.session.draft_text().unwrap_or_default(), app.edit_schedule.as_str()),
    };
    let focused = |field: InputField| {
        if app.input_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let text_input = Paragraph::new(text)
        .style(focused(InputField::Text))
        .block(Block::default().borders(Borders::ALL).title("Description"));
    let schedule_title = format!(
        "Date & Time ({})",
        app.config.input_formats.first().map(String::as_str).unwrap_or_default()
    );
    let schedule_input = Paragraph::new(schedule)
        .style(focused(InputField::Schedule))
        .block(Block::default().borders(Borders::ALL).title(schedule_title));

    f.render_widget(text_input, fields[0]);
    f.render_widget(schedule_input, fields[1]);
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
