//! Classification of single benchmark log lines.
//!
//! Three shapes matter:
//!
//! ```text
//! [T1200] Start committing to advice columns
//! [T1587] ... Done ...
//! msm 1048576
//! ```
//!
//! Everything else in the log is noise from the instrumented process.

use crate::Result;
use crate::model::OpKind;

use anyhow::{Context, anyhow, bail};
use regex::Regex;

const TIMED_PREFIX: &str = "[T";
const START_MARKER: &str = "Start ";
const DONE_MARKER: &str = "Done";

/// One classified log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Start { timestamp: i64, name: String },
    Done { timestamp: i64 },
    OpCount { kind: OpKind, size: String },
    Other,
}

/// Holds the compiled patterns so they are built once per log, not per line.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    op_count: Regex,
}

impl LineClassifier {
    pub fn new() -> Result<Self> {
        // Capture:
        // 1) op kind: msm | fft
        // 2) size label: a single token, kept as text
        const OP_COUNT_RE: &str = r#"^(msm|fft)\s+(\S+)\s*$"#;
        Ok(Self {
            op_count: Regex::new(OP_COUNT_RE)?,
        })
    }

    pub fn classify(&self, line: &str) -> Result<LogLine> {
        let line = line.trim_end_matches(['\n', '\r']);

        if let Some(rest) = line.strip_prefix(TIMED_PREFIX) {
            let timestamp = parse_timestamp(rest)
                .with_context(|| format!("bad timestamp in line {:?}", line))?;

            // Start wins when a line carries both markers.
            if let Some((_, name)) = line.split_once(START_MARKER) {
                return Ok(LogLine::Start {
                    timestamp,
                    name: name.to_string(),
                });
            }
            if line.contains(DONE_MARKER) {
                return Ok(LogLine::Done { timestamp });
            }
            return Ok(LogLine::Other);
        }

        if let Some(caps) = self.op_count.captures(line) {
            let kind = caps
                .get(1)
                .ok_or_else(|| anyhow!("op count line missing kind: {:?}", line))?
                .as_str()
                .parse::<OpKind>()?;
            let size = caps
                .get(2)
                .ok_or_else(|| anyhow!("op count line missing size: {:?}", line))?
                .as_str()
                .to_string();
            return Ok(LogLine::OpCount { kind, size });
        }

        Ok(LogLine::Other)
    }
}

/// Parse the text following `[T` up to the closing `]`.
fn parse_timestamp(rest: &str) -> Result<i64> {
    let Some((raw, _)) = rest.split_once(']') else {
        bail!("timestamp marker is not closed with ']'");
    };
    let raw = raw.trim();
    raw.parse::<i64>()
        .with_context(|| format!("timestamp {:?} is not an integer", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(line: &str) -> Result<LogLine> {
        LineClassifier::new()?.classify(line)
    }

    #[test]
    fn start_line_keeps_full_name() -> Result<()> {
        assert_eq!(
            classify("[T1200] Start committing to advice columns\n")?,
            LogLine::Start {
                timestamp: 1200,
                name: "committing to advice columns".to_string(),
            }
        );
        Ok(())
    }

    #[test]
    fn start_line_strips_crlf() -> Result<()> {
        assert_eq!(
            classify("[T3] Start fft\r\n")?,
            LogLine::Start {
                timestamp: 3,
                name: "fft".to_string(),
            }
        );
        Ok(())
    }

    #[test]
    fn done_line_only_needs_marker() -> Result<()> {
        assert_eq!(classify("[T8] Done inner")?, LogLine::Done { timestamp: 8 });
        assert_eq!(
            classify("[T 42] ....... Done (12ms)")?,
            LogLine::Done { timestamp: 42 }
        );
        Ok(())
    }

    #[test]
    fn start_takes_precedence_over_done() -> Result<()> {
        assert_eq!(
            classify("[T1] Start Done checking")?,
            LogLine::Start {
                timestamp: 1,
                name: "Done checking".to_string(),
            }
        );
        Ok(())
    }

    #[test]
    fn op_count_lines() -> Result<()> {
        assert_eq!(
            classify("msm 10")?,
            LogLine::OpCount {
                kind: OpKind::Msm,
                size: "10".to_string(),
            }
        );
        assert_eq!(
            classify("fft\t2^20\n")?,
            LogLine::OpCount {
                kind: OpKind::Fft,
                size: "2^20".to_string(),
            }
        );
        Ok(())
    }

    #[test]
    fn unrelated_lines_are_other() -> Result<()> {
        for line in [
            "",
            "ntt 10",
            "msm",
            "msm 10 20",
            "  msm 10",
            "[T5] progress 50%",
            "some banner text",
        ] {
            assert_eq!(classify(line)?, LogLine::Other, "line {:?}", line);
        }
        Ok(())
    }

    #[test]
    fn malformed_timestamp_is_an_error() {
        let err = classify("[Txyz] Start outer").unwrap_err();
        assert!(format!("{:#}", err).contains("\"xyz\" is not an integer"));
    }

    #[test]
    fn unclosed_timestamp_is_an_error() {
        let err = classify("[T12 Start outer").unwrap_err();
        assert!(format!("{:#}", err).contains("not closed"));
    }
}
