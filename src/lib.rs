//! # Taskpad
//!
//! An in-memory task list: create, edit, complete and delete scheduled tasks,
//! always viewed in chronological order.
//!
//! The core is made of three pieces:
//!
//! *   [`store::TaskStore`] owns the tasks and applies commands to them.
//! *   [`session::EditSession`] holds the draft of the one task being edited.
//! *   [`view::order`] derives the chronological listing from a snapshot.
//!
//! Two presentation layers sit on top: a line-oriented command interpreter
//! ([`commands::Workspace`]) and an interactive terminal UI ([`tui`]).
//!
//! ```
//! use chrono::NaiveDate;
//! use taskpad::store::TaskStore;
//! use taskpad::view::order;
//!
//! let at = |h| NaiveDate::from_ymd_opt(2025, 3, 5).unwrap().and_hms_opt(h, 0, 0);
//! let mut store = TaskStore::new();
//! store.add("Buy milk", at(14)).unwrap();
//! store.add("Call dentist", at(9)).unwrap();
//!
//! let names: Vec<_> = order(store.snapshot()).iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(names, ["Call dentist", "Buy milk"]);
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod store;
pub mod tui;
pub mod view;
