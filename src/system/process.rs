use serde::Serialize;

use super::snapshot::ParseMode;
use crate::error::RecordError;

pub const DEFAULT_MAX_NAME_LEN: usize = 255;

// Fields after the name, 0-based from the state field:
// state(0) ppid(1) pgrp(2) session(3) tty_nr(4) tpgid(5) flags(6)
// minflt(7) cminflt(8) majflt(9) cmajflt(10) utime(11) stime(12)
const UTIME_OFFSET: usize = 11;
const STIME_OFFSET: usize = 12;

/// One live process as seen during a single enumeration pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    /// User plus kernel ticks accumulated since the process started.
    pub cpu_ticks: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct RecordLimits {
    pub max_name_len: usize,
    pub mode: ParseMode,
}

impl Default for RecordLimits {
    fn default() -> Self {
        RecordLimits {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            mode: ParseMode::Lenient,
        }
    }
}

/// Parses a raw `/proc/<pid>/stat` record.
///
/// The name runs from the first `(` to the last `)`, so names containing
/// parentheses or spaces survive intact. `pid` comes from the directory
/// entry; the record's own leading id is not re-checked.
pub fn parse_stat_record(
    pid: u32,
    raw: &str,
    limits: &RecordLimits,
) -> Result<ProcessRecord, RecordError> {
    let open = raw.find('(').ok_or(RecordError::MissingName)?;
    let close = raw.rfind(')').ok_or(RecordError::MissingName)?;
    if close < open {
        return Err(RecordError::MissingName);
    }

    let name: String = raw[open + 1..close]
        .chars()
        .take(limits.max_name_len)
        .collect();

    let tail: Vec<&str> = raw[close + 1..].split_whitespace().collect();
    if tail.len() <= STIME_OFFSET && limits.mode == ParseMode::Strict {
        return Err(RecordError::ShortTail {
            expected: STIME_OFFSET + 1,
            found: tail.len(),
        });
    }

    let field = |idx: usize| -> u64 {
        tail.get(idx)
            .and_then(|tok| tok.parse::<u64>().ok())
            .unwrap_or(0)
    };
    let utime = field(UTIME_OFFSET);
    let stime = field(STIME_OFFSET);

    Ok(ProcessRecord {
        pid,
        name,
        cpu_ticks: utime.saturating_add(stime),
    })
}

/// Returns true for directory names made only of ASCII digits.
pub fn is_pid_entry(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// The `n` records with the most accumulated CPU ticks, highest first.
///
/// Ties keep their enumeration order.
pub fn top_n(mut records: Vec<ProcessRecord>, n: usize) -> Vec<ProcessRecord> {
    records.sort_by(|a, b| b.cpu_ticks.cmp(&a.cpu_ticks));
    records.truncate(n);
    records
}
