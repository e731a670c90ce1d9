use crate::model::{Counts, OpKind, Task, TaskSummary};

use std::fmt::Write;

/// Multi-line dump of a single task, one field per line.
pub fn render_task_text(task: &Task) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "name:       {}", task.name);
    let _ = writeln!(out, "start_time: {}", task.start_time);
    let _ = writeln!(out, "end_time:   {}", opt(task.end_time));
    let _ = writeln!(out, "duration:   {}", opt(task.duration));
    for kind in [OpKind::Msm, OpKind::Fft] {
        let _ = writeln!(out, "{}:{}", kind, counts_text(task.counts(kind)));
    }
    out
}

/// One line per task name: max, total, count.
pub fn render_summary_text(rows: &[TaskSummary]) -> String {
    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(4).max(4);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:>12}  {:>12}  {:>6}",
        "name", "max", "total", "count"
    );
    for r in rows {
        let _ = writeln!(
            out,
            "{:<width$}  {:>12}  {:>12}  {:>6}",
            r.name, r.max_duration, r.total_duration, r.count
        );
    }
    out
}

fn opt(v: Option<i64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn counts_text(counts: &Counts) -> String {
    if counts.is_empty() {
        return " {}".to_string();
    }
    let mut out = String::new();
    for (size, n) in counts {
        let _ = write!(out, "\n  {:>10}  x{}", size, n);
    }
    out
}
