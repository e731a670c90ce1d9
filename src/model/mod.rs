//! Aggregation model: nested task tracking over a benchmark log.
//!
//! Tasks are stored in an append-only arena in start order. The open stack
//! and the closed list both hold arena indices, so a task never moves once
//! created and closing it is just an index transfer.

pub mod task;

pub use task::{Counts, OpKind, Task};

use crate::Result;
use crate::log::{LineClassifier, LogLine};

use anyhow::{Context, bail};
use log::trace;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct LogAggregator {
    classifier: LineClassifier,
    tasks: Vec<Task>,
    /// Innermost open task is last.
    open: Vec<usize>,
    /// Completion order.
    closed: Vec<usize>,
}

/// Per-name rollup over closed tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub name: String,
    pub count: usize,
    pub total_duration: i64,
    pub max_duration: i64,
}

impl LogAggregator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            classifier: LineClassifier::new()?,
            tasks: Vec::new(),
            open: Vec::new(),
            closed: Vec::new(),
        })
    }

    /// Feed one raw log line, in file order.
    pub fn ingest(&mut self, line: &str) -> Result<()> {
        let event = self.classifier.classify(line)?;
        self.apply(event)
    }

    fn apply(&mut self, event: LogLine) -> Result<()> {
        match event {
            LogLine::Start { timestamp, name } => {
                self.open.push(self.tasks.len());
                self.tasks.push(Task::open(name, timestamp));
            }
            LogLine::Done { timestamp } => {
                let Some(&idx) = self.open.last() else {
                    bail!("completion at T{} with no open task", timestamp);
                };
                self.tasks[idx].close(timestamp)?;
                self.open.pop();
                self.closed.push(idx);
            }
            LogLine::OpCount { kind, size } => match self.open.last() {
                Some(&idx) => self.tasks[idx].record(kind, &size),
                None => trace!("dropping {} {} outside of any task", kind, size),
            },
            LogLine::Other => {}
        }
        Ok(())
    }

    /// Closed tasks in completion order.
    pub fn closed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.closed.iter().map(|&idx| {
            debug_assert!(self.tasks[idx].is_closed());
            &self.tasks[idx]
        })
    }

    /// Open tasks, outermost first.
    pub fn open_tasks(&self) -> impl Iterator<Item = &Task> {
        self.open.iter().map(|&idx| &self.tasks[idx])
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// The closed task named `name` with the longest duration.
    ///
    /// Ties go to the instance that completed first.
    pub fn slowest(&self, name: &str) -> Option<&Task> {
        let mut best: Option<&Task> = None;
        for task in self.closed_tasks().filter(|t| t.name == name) {
            match best {
                Some(b) if task.duration <= b.duration => {}
                _ => best = Some(task),
            }
        }
        best
    }

    /// Rollup per task name, sorted by max duration desc, then name.
    pub fn summary(&self) -> Result<Vec<TaskSummary>> {
        let mut by_name: BTreeMap<&str, TaskSummary> = BTreeMap::new();
        for task in self.closed_tasks() {
            let Some(duration) = task.duration else {
                continue;
            };
            match by_name.get_mut(task.name.as_str()) {
                Some(entry) => {
                    entry.count += 1;
                    entry.total_duration = entry
                        .total_duration
                        .checked_add(duration)
                        .with_context(|| {
                            format!("total duration of {:?} overflows", task.name)
                        })?;
                    entry.max_duration = entry.max_duration.max(duration);
                }
                None => {
                    by_name.insert(
                        &task.name,
                        TaskSummary {
                            name: task.name.clone(),
                            count: 1,
                            total_duration: duration,
                            max_duration: duration,
                        },
                    );
                }
            }
        }

        let mut out: Vec<TaskSummary> = by_name.into_values().collect();
        out.sort_by(|a, b| {
            b.max_duration
                .cmp(&a.max_duration)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(out)
    }
}
