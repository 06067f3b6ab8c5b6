use std::fs;

use super::process::{ProcessRecord, RecordLimits, is_pid_entry, parse_stat_record};
use super::snapshot::{CpuCounters, MemoryCounters, ParseMode};
use super::source::{COUNTER_READ_LIMIT, ProcSource, RECORD_READ_LIMIT, read_bounded};
use crate::error::SampleError;

pub const DEFAULT_MAX_PROCESSES: usize = 1024;

#[derive(Debug, Clone, Copy)]
pub struct CollectorOptions {
    /// Enumeration stops after this many records; later processes are dropped.
    pub max_processes: usize,
    pub max_name_len: usize,
    pub mode: ParseMode,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        CollectorOptions {
            max_processes: DEFAULT_MAX_PROCESSES,
            max_name_len: super::process::DEFAULT_MAX_NAME_LEN,
            mode: ParseMode::Lenient,
        }
    }
}

/// Reads counter snapshots and process records from a proc filesystem.
///
/// Holds no state between calls; every read produces fresh values.
pub struct Collector {
    source: ProcSource,
    options: CollectorOptions,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(ProcSource::default(), CollectorOptions::default())
    }
}

impl Collector {
    pub fn new(source: ProcSource, options: CollectorOptions) -> Self {
        Collector { source, options }
    }

    pub fn source(&self) -> &ProcSource {
        &self.source
    }

    pub fn read_cpu_counters(&self) -> Result<CpuCounters, SampleError> {
        let path = self.source.stat_path();
        let contents = read_bounded(&path, COUNTER_READ_LIMIT)
            .map_err(|e| SampleError::unavailable(&path, e))?;
        CpuCounters::parse(&contents, self.options.mode)
    }

    pub fn read_memory_counters(&self) -> Result<MemoryCounters, SampleError> {
        let path = self.source.meminfo_path();
        let contents = read_bounded(&path, COUNTER_READ_LIMIT)
            .map_err(|e| SampleError::unavailable(&path, e))?;
        Ok(MemoryCounters::parse(&contents))
    }

    /// Walks the numeric entries under the root and parses each `stat` record.
    ///
    /// Processes that exit mid-walk or carry unparseable records are skipped.
    /// Output order follows the directory listing.
    pub fn enumerate(&self) -> Result<Vec<ProcessRecord>, SampleError> {
        let root = self.source.root();
        let entries = fs::read_dir(root).map_err(|e| SampleError::unavailable(root, e))?;
        let limits = RecordLimits {
            max_name_len: self.options.max_name_len,
            mode: self.options.mode,
        };

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !is_pid_entry(name) {
                continue;
            }
            let Ok(pid) = name.parse::<u32>() else {
                continue;
            };
            if pid == 0 {
                continue;
            }

            if records.len() >= self.options.max_processes {
                tracing::debug!(
                    cap = self.options.max_processes,
                    "process cap reached, remaining entries dropped"
                );
                break;
            }

            let raw = match read_bounded(&self.source.process_stat_path(pid), RECORD_READ_LIMIT) {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::trace!(pid, %err, "process vanished before its record was read");
                    continue;
                }
            };

            match parse_stat_record(pid, &raw, &limits) {
                Ok(record) => records.push(record),
                Err(err) => tracing::debug!(pid, %err, "skipping malformed stat record"),
            }
        }

        Ok(records)
    }
}
