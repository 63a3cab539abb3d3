use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::config::Config;
use crate::error::CommandError;
use crate::models::{parse_scheduled, TaskId};
use crate::session::EditSession;
use crate::store::TaskStore;
use crate::view::{format_scheduled, order};

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct CommandLine {
    #[command(subcommand)]
    command: ScriptCommand,
}

#[derive(Subcommand, Debug)]
enum ScriptCommand {
    /// Add a new task
    Add {
        /// Task description
        #[arg(allow_hyphen_values = true)]
        text: Vec<String>,
        /// Scheduled date and time, e.g. 2025-03-05T14:30 or 05/03/2025 14:30
        #[arg(long, num_args = 1..)]
        at: Vec<String>,
    },
    /// Remove a task
    Remove { id: u64 },
    /// Toggle a task between done and pending
    Toggle { id: u64 },
    /// Start editing a task
    Edit { id: u64 },
    /// Replace the description being edited
    Text {
        #[arg(allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Replace the schedule being edited
    When { at: Vec<String> },
    /// Save the task being edited
    Commit,
    /// Discard the task being edited
    Cancel,
    /// List tasks in chronological order
    List,
}

/// A task store and its edit session driven by text commands.
///
/// One command per line, e.g. `add Buy milk --at 2025-03-05T14:30`,
/// `toggle 1`, `edit 1`, `text Buy oat milk`, `commit`, `list`. Lines are
/// split like shell words, so quoting keeps inner spacing. Everything after
/// `--at` belongs to the schedule.
#[derive(Debug, Default)]
pub struct Workspace {
    pub store: TaskStore,
    pub session: EditSession,
    pub config: Config,
}

impl Workspace {
    pub fn new(config: Config) -> Self {
        Workspace {
            store: TaskStore::new(),
            session: EditSession::new(),
            config,
        }
    }

    /// Runs one command line and returns the message to show, if any.
    ///
    /// Blank lines and `#` comments are skipped.
    pub fn run_line(&mut self, line: &str) -> Result<Option<String>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let parsed = CommandLine::try_parse_from(shell_words::split(line)?)?;

        let reply = match parsed.command {
            ScriptCommand::Add { text, at } => {
                let scheduled_at = parse_scheduled(&at.join(" "), &self.config.input_formats);
                let id = self.store.add(text.join(" "), scheduled_at)?;
                format!("Task added (id = {})", id)
            }
            ScriptCommand::Remove { id } => {
                self.store.remove(TaskId::new(id));
                format!("Task {} removed.", id)
            }
            ScriptCommand::Toggle { id } => {
                let id = TaskId::new(id);
                self.store.toggle_completion(id);
                match self.store.get(id) {
                    Some(t) if t.completed => format!("Task {} marked as done.", id),
                    Some(_) => format!("Task {} marked as pending.", id),
                    None => format!("Task {} not found.", id),
                }
            }
            ScriptCommand::Edit { id } => {
                let id = TaskId::new(id);
                let task = self.store.get(id).ok_or(CommandError::UnknownTask(id))?;
                self.session.start(task);
                format!("Editing task {}.", id)
            }
            ScriptCommand::Text { text } => {
                if self.session.update_draft_text(text.join(" ")) {
                    "Draft description updated.".to_string()
                } else {
                    "No task is being edited.".to_string()
                }
            }
            ScriptCommand::When { at } => {
                let scheduled_at = parse_scheduled(&at.join(" "), &self.config.input_formats);
                if self.session.update_draft_schedule(scheduled_at) {
                    "Draft schedule updated.".to_string()
                } else {
                    "No task is being edited.".to_string()
                }
            }
            ScriptCommand::Commit => match self.session.commit(&mut self.store)? {
                Some(id) => format!("Task {} updated.", id),
                None => "No task is being edited.".to_string(),
            },
            ScriptCommand::Cancel => {
                self.session.cancel();
                "Edit discarded.".to_string()
            }
            ScriptCommand::List => self.render_list(),
        };
        Ok(Some(reply))
    }

    /// Runs every line of `input`, writing replies to `out` and errors to `err`.
    ///
    /// Validation errors are only written when the config asks for them.
    pub fn run_script<R: BufRead, W: Write, E: Write>(&mut self, input: R, out: &mut W, err: &mut E) -> io::Result<()> {
        for (n, line) in input.lines().enumerate() {
            let line = line?;
            match self.run_line(&line) {
                Ok(Some(reply)) => writeln!(out, "{}", reply)?,
                Ok(None) => {}
                Err(CommandError::Validation(e)) => {
                    if self.config.report_validation_errors {
                        writeln!(err, "line {}: {}", n + 1, e)?;
                    }
                }
                Err(e) => writeln!(err, "line {}: {}", n + 1, e.to_string().trim_end())?,
            }
        }
        Ok(())
    }

    /// Renders the chronological view as a table.
    pub fn render_list(&self) -> String {
        let ordered: Vec<_> = order(self.store.snapshot())
            .into_iter()
            .filter(|t| self.config.show_completed || !t.completed)
            .collect();
        if ordered.is_empty() {
            return "No tasks found.".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("ID").add_attribute(Attribute::Bold),
                Cell::new("Task").add_attribute(Attribute::Bold),
                Cell::new("Scheduled").add_attribute(Attribute::Bold),
                Cell::new("Status").add_attribute(Attribute::Bold),
            ]);

        let editing = self.session.editing_id();
        for t in ordered {
            let (status, status_color) = if t.completed {
                ("Done", Color::Green)
            } else {
                ("Pending", Color::Yellow)
            };
            let text = if editing == Some(t.id) {
                format!("{} (editing)", t.text)
            } else {
                t.text.clone()
            };
            table.add_row(vec![
                Cell::new(t.id),
                Cell::new(text),
                Cell::new(format_scheduled(t.scheduled_at, &self.config.display_format)),
                Cell::new(status).fg(status_color),
            ]);
        }
        table.to_string()
    }
}
