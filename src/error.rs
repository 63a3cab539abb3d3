use std::path::PathBuf;

use thiserror::Error;

use crate::models::TaskId;

/// Why a task could not be created or updated.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyText,

    /// No readable date and time was given.
    #[error("task needs a scheduled date and time")]
    MissingSchedule,
}

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid date-time layout '{0}'")]
    InvalidLayout(String),
}

/// Errors returned by the line-oriented command interpreter.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot split command line: {0}")]
    Split(#[from] shell_words::ParseError),

    #[error(transparent)]
    Parse(#[from] clap::Error),

    #[error("task {0} not found")]
    UnknownTask(TaskId),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
