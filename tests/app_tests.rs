use rstest::rstest;
use taskpad::config::Config;
use taskpad::tui::app::{App, InputField, InputMode};

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        app.push_char(c);
    }
}

fn add_task(app: &mut App, text: &str, schedule: &str) {
    app.start_add();
    type_str(app, text);
    app.switch_field();
    type_str(app, schedule);
    app.submit();
}

fn row_texts(app: &App) -> Vec<&str> {
    app.rows.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn test_added_tasks_are_listed_chronologically() {
    let mut app = App::new(Config::default());
    add_task(&mut app, "Buy milk", "2025-03-05T14:30");
    add_task(&mut app, "Call dentist", "2025-03-05T09:00");

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(row_texts(&app), ["Call dentist", "Buy milk"]);
    assert_eq!(app.state.selected(), Some(0));
}

#[test]
fn test_rejected_add_keeps_form_open() {
    let mut app = App::new(Config::default());
    add_task(&mut app, "Buy milk", "");

    assert_eq!(app.input_mode, InputMode::Adding);
    assert_eq!(app.add_form.text, "Buy milk");
    assert!(app.status.is_none());
    assert!(app.store.is_empty());

    app.cancel();
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_rejected_add_is_reported_when_configured() {
    let mut app = App::new(Config { report_validation_errors: true, ..Config::default() });
    add_task(&mut app, "   ", "2025-03-05T14:30");

    assert_eq!(app.status.as_deref(), Some("task description must not be empty"));
}

#[test]
fn test_edit_selected_task() {
    let mut app = App::new(Config::default());
    add_task(&mut app, "Buy milk", "2025-03-05T14:30");
    add_task(&mut app, "Call dentist", "2025-03-05T09:00");

    // Move the dentist appointment after the milk run.
    app.start_edit();
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.edit_schedule, "2025-03-05T09:00");
    app.switch_field();
    assert_eq!(app.input_field, InputField::Schedule);
    for _ in 0..5 {
        app.pop_char();
    }
    type_str(&mut app, "18:00");
    assert_eq!(row_texts(&app), ["Call dentist", "Buy milk"]);
    app.submit();

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(!app.session.is_editing());
    assert_eq!(row_texts(&app), ["Buy milk", "Call dentist"]);
}

#[test]
fn test_cancelled_edit_changes_nothing() {
    let mut app = App::new(Config::default());
    add_task(&mut app, "Buy milk", "2025-03-05T14:30");

    app.start_edit();
    type_str(&mut app, " and bread");
    assert_eq!(app.current_input(), "Buy milk and bread");
    app.cancel();

    assert_eq!(row_texts(&app), ["Buy milk"]);
    assert!(!app.session.is_editing());
}

#[test]
fn test_toggle_hide_and_delete() {
    let mut app = App::new(Config::default());
    add_task(&mut app, "Buy milk", "2025-03-05T14:30");
    add_task(&mut app, "Call dentist", "2025-03-05T09:00");

    app.toggle_selected();
    assert!(app.rows[0].completed);

    app.toggle_completed();
    assert_eq!(row_texts(&app), ["Buy milk"]);

    app.delete_selected();
    assert!(app.rows.is_empty());
    assert_eq!(app.state.selected(), None);

    app.toggle_completed();
    assert_eq!(row_texts(&app), ["Call dentist"]);
}

#[test]
fn test_selection_wraps() {
    let mut app = App::new(Config::default());
    add_task(&mut app, "One", "2025-03-05T08:00");
    add_task(&mut app, "Two", "2025-03-05T09:00");

    app.previous();
    assert_eq!(app.state.selected(), Some(1));
    app.next();
    assert_eq!(app.state.selected(), Some(0));
}

#[rstest]
#[case::datetime_local("2025-03-05T14:30")]
#[case::with_seconds("2025-03-05T14:30:00")]
#[case::spaced_iso("2025-03-05 14:30")]
#[case::display_layout("05/03/2025 14:30")]
fn test_add_form_accepts_default_formats(#[case] schedule: &str) {
    let mut app = App::new(Config::default());
    add_task(&mut app, "Buy milk", schedule);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.rows.len(), 1);
    assert_eq!(app.rows[0].scheduled_at.to_string(), "2025-03-05 14:30:00");
}

#[test]
fn test_edit_with_unrenderable_input_layout() {
    let config = Config {
        input_formats: vec!["%Y-%m-%d %H:%M %z".to_string()],
        display_format: "%H:%M %Z".to_string(),
        ..Config::default()
    };
    let mut app = App::new(config);
    app.store.add("Buy milk", chrono::NaiveDate::from_ymd_opt(2025, 3, 5).and_then(|d| d.and_hms_opt(14, 30, 0))).unwrap();
    app.refresh();

    app.start_edit();

    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.edit_schedule, "05/03/2025 14:30");
}
