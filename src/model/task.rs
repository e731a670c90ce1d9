use crate::Result;

use anyhow::bail;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Size label -> number of times an operation of that size was observed.
pub type Counts = BTreeMap<String, u64>;

/// The two operation kinds the prover reports per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Msm,
    Fft,
}

impl OpKind {
    pub fn label(self) -> &'static str {
        match self {
            OpKind::Msm => "msm",
            OpKind::Fft => "fft",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OpKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "msm" => Ok(OpKind::Msm),
            "fft" => Ok(OpKind::Fft),
            other => bail!("unknown op kind {:?}", other),
        }
    }
}

/// One instance of a named timed task.
///
/// `end_time` and `duration` stay `None` until the matching completion line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub name: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub duration: Option<i64>,
    pub msm: Counts,
    pub fft: Counts,
}

impl Task {
    pub fn open(name: String, start_time: i64) -> Self {
        Self {
            name,
            start_time,
            end_time: None,
            duration: None,
            msm: Counts::new(),
            fft: Counts::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn counts(&self, kind: OpKind) -> &Counts {
        match kind {
            OpKind::Msm => &self.msm,
            OpKind::Fft => &self.fft,
        }
    }

    pub fn record(&mut self, kind: OpKind, size: &str) {
        let counts = match kind {
            OpKind::Msm => &mut self.msm,
            OpKind::Fft => &mut self.fft,
        };
        *counts.entry(size.to_string()).or_default() += 1;
    }

    /// Leaves the task untouched if the duration does not fit in an `i64`.
    pub(crate) fn close(&mut self, end_time: i64) -> Result<()> {
        let Some(duration) = end_time.checked_sub(self.start_time) else {
            bail!(
                "duration of {:?} overflows: T{} - T{}",
                self.name,
                end_time,
                self.start_time
            );
        };
        self.end_time = Some(end_time);
        self.duration = Some(duration);
        Ok(())
    }
}
