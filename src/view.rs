use std::fmt::{self, Write};

use chrono::NaiveDateTime;

use crate::models::Task;

/// Display layout used when the configuration does not override it: `05/03/2025 14:30`.
pub const DEFAULT_DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Returns the tasks sorted by scheduled time, earliest first.
///
/// The sort is stable, so tasks sharing a schedule keep their relative
/// input order. The input is never touched.
pub fn order(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|t| t.scheduled_at);
    ordered
}

/// Renders a schedule with the given `strftime` layout.
///
/// Fails when the layout asks for something a wall-clock time does not
/// carry, such as an offset (`%z`) or a zone name (`%Z`).
pub fn try_format_scheduled(scheduled_at: NaiveDateTime, layout: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write!(out, "{}", scheduled_at.format(layout))?;
    Ok(out)
}

/// Renders a schedule with the given `strftime` layout, falling back to
/// [`DEFAULT_DISPLAY_FORMAT`] when the layout cannot be rendered.
pub fn format_scheduled(scheduled_at: NaiveDateTime, layout: &str) -> String {
    try_format_scheduled(scheduled_at, layout).unwrap_or_else(|_| {
        log::warn!("Cannot render date-time layout '{}', using '{}'", layout, DEFAULT_DISPLAY_FORMAT);
        scheduled_at.format(DEFAULT_DISPLAY_FORMAT).to_string()
    })
}
