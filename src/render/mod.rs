//! Output rendering for query results.

pub mod text;

pub use text::{render_summary_text, render_task_text};

use serde::Serialize;

/// Pretty JSON for any report value.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
