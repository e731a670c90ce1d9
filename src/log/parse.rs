use crate::Result;
use crate::model::LogAggregator;

use anyhow::Context;
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Parse a benchmark log file into a populated aggregator.
///
/// Lines are consumed in file order. The first malformed line aborts the
/// whole run; there is no partial result.
pub fn parse_log_file(path: &str) -> Result<LogAggregator> {
    let file = File::open(path).with_context(|| format!("open log file {}", path))?;
    let reader = BufReader::new(file);

    let mut agg = LogAggregator::new()?;
    for (lineno, line) in reader.lines().enumerate() {
        let lno = lineno + 1;
        let line = line.with_context(|| format!("read log file {}:{}", path, lno))?;
        agg.ingest(&line)
            .with_context(|| format!("log parse error at {}:{}", path, lno))?;
    }

    finish(&agg, path);
    Ok(agg)
}

/// Same as [`parse_log_file`] for text already in memory.
pub fn parse_log_str(text: &str) -> Result<LogAggregator> {
    let mut agg = LogAggregator::new()?;
    for (lineno, line) in text.lines().enumerate() {
        agg.ingest(line)
            .with_context(|| format!("log parse error at line {}", lineno + 1))?;
    }

    finish(&agg, "<memory>");
    Ok(agg)
}

fn finish(agg: &LogAggregator, source: &str) {
    let closed = agg.closed_tasks().count();
    info!("{}: {} closed tasks", source, closed);

    if agg.open_count() > 0 {
        let names: Vec<&str> = agg.open_tasks().map(|t| t.name.as_str()).collect();
        warn!(
            "{}: {} task(s) still open at end of log: {:?}",
            source,
            names.len(),
            names
        );
    }
}
