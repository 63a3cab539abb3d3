use std::cell::Cell;
use std::rc::Rc;

use ratatui::widgets::TableState;

use crate::config::Config;
use crate::models::{parse_scheduled, Task};
use crate::session::EditSession;
use crate::store::TaskStore;
use crate::view::{format_scheduled, order};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Adding,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Text,
    Schedule,
}

/// Raw contents of the "Add Task" form.
#[derive(Debug, Default)]
pub struct AddForm {
    pub text: String,
    pub schedule: String,
}

pub struct App {
    pub store: TaskStore,
    pub session: EditSession,
    pub config: Config,
    /// Tasks as shown, in chronological order.
    pub rows: Vec<Task>,
    pub state: TableState,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub add_form: AddForm,
    /// Text of the schedule field while editing; the parsed value lives in the session draft.
    pub edit_schedule: String,
    pub status: Option<String>,
    pub show_completed: bool,
    stale: Rc<Cell<bool>>,
}

impl App {
    /// Creates an empty App that redraws its rows whenever the store changes.
    pub fn new(config: Config) -> App {
        let stale = Rc::new(Cell::new(true));
        let mut store = TaskStore::new();
        let flag = Rc::clone(&stale);
        store.subscribe(move |_| flag.set(true));

        let show_completed = config.show_completed;
        let mut app = App {
            store,
            session: EditSession::new(),
            config,
            rows: Vec::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            input_field: InputField::Text,
            add_form: AddForm::default(),
            edit_schedule: String::new(),
            status: None,
            show_completed,
            stale,
        };
        app.refresh();
        app
    }

    /// Recomputes the visible rows if the store changed since the last call.
    pub fn refresh(&mut self) {
        if !self.stale.replace(false) {
            return;
        }
        self.rows = order(self.store.snapshot())
            .into_iter()
            .filter(|t| self.show_completed || !t.completed)
            .cloned()
            .collect();

        if self.rows.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.rows.len() {
                self.state.select(Some(self.rows.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.rows.get(i))
    }

    /// Selects the next row, wrapping around.
    pub fn next(&mut self) {
        if self.rows.is_empty() { return; }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.rows.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous row, wrapping around.
    pub fn previous(&mut self) {
        if self.rows.is_empty() { return; }
        let i = match self.state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.store.toggle_completion(id);
            self.refresh();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.store.remove(id);
            self.refresh();
        }
    }

    /// Toggles the visibility of completed tasks.
    pub fn toggle_completed(&mut self) {
        self.show_completed = !self.show_completed;
        self.stale.set(true);
        self.refresh();
    }

    /// Opens the "Add Task" form, keeping whatever was left in it.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input_field = InputField::Text;
        self.status = None;
    }

    /// Opens the edit form on the selected task.
    pub fn start_edit(&mut self) {
        let Some(task) = self.state.selected().and_then(|i| self.rows.get(i)) else { return };
        self.session.start(task);
        self.edit_schedule = self.input_layout().map_or_else(String::new, |layout| format_scheduled(task.scheduled_at, layout));
        self.input_mode = InputMode::Editing;
        self.input_field = InputField::Text;
        self.status = None;
    }

    pub fn switch_field(&mut self) {
        self.input_field = match self.input_field {
            InputField::Text => InputField::Schedule,
            InputField::Schedule => InputField::Text,
        };
    }

    pub fn push_char(&mut self, c: char) {
        let mut value = self.current_input().to_string();
        value.push(c);
        self.set_current_input(value);
    }

    pub fn pop_char(&mut self) {
        let mut value = self.current_input().to_string();
        value.pop();
        self.set_current_input(value);
    }

    /// Text of the field that has focus.
    pub fn current_input(&self) -> &str {
        match (self.input_mode, self.input_field) {
            (InputMode::Adding, InputField::Text) => &self.add_form.text,
            (InputMode::Adding, InputField::Schedule) => &self.add_form.schedule,
            (InputMode::Editing, InputField::Text) => self.session.draft_text().unwrap_or_default(),
            (InputMode::Editing, InputField::Schedule) => &self.edit_schedule,
            (InputMode::Normal, _) => "",
        }
    }

    fn set_current_input(&mut self, value: String) {
        match (self.input_mode, self.input_field) {
            (InputMode::Adding, InputField::Text) => self.add_form.text = value,
            (InputMode::Adding, InputField::Schedule) => self.add_form.schedule = value,
            (InputMode::Editing, InputField::Text) => {
                self.session.update_draft_text(value);
            }
            (InputMode::Editing, InputField::Schedule) => {
                self.session.update_draft_schedule(parse_scheduled(&value, &self.config.input_formats));
                self.edit_schedule = value;
            }
            (InputMode::Normal, _) => {}
        }
    }

    /// Submits the open form.
    ///
    /// A rejected new task keeps the form open with its input intact; an edit
    /// always closes. The error is only shown when the config asks for it.
    pub fn submit(&mut self) {
        match self.input_mode {
            InputMode::Adding => {
                let scheduled_at = parse_scheduled(&self.add_form.schedule, &self.config.input_formats);
                match self.store.add(self.add_form.text.clone(), scheduled_at) {
                    Ok(_) => {
                        self.status = None;
                        self.add_form = AddForm::default();
                        self.input_mode = InputMode::Normal;
                    }
                    Err(e) => self.report(e),
                }
            }
            InputMode::Editing => {
                match self.session.commit(&mut self.store) {
                    Ok(_) => self.status = None,
                    Err(e) => self.report(e),
                }
                self.edit_schedule.clear();
                self.input_mode = InputMode::Normal;
            }
            InputMode::Normal => {}
        }
        self.refresh();
    }

    /// Closes the open form; an edit in progress is discarded.
    pub fn cancel(&mut self) {
        if self.input_mode == InputMode::Editing {
            self.session.cancel();
            self.edit_schedule.clear();
        }
        self.input_mode = InputMode::Normal;
    }

    fn report(&mut self, error: impl std::fmt::Display) {
        if self.config.report_validation_errors {
            self.status = Some(error.to_string());
        }
    }

    fn input_layout(&self) -> Option<&str> {
        self.config.input_formats.first().map(String::as_str)
    }
}
