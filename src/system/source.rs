use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Upper bound for aggregate counter files (`stat`, `meminfo`).
pub const COUNTER_READ_LIMIT: usize = 4096;
/// Upper bound for a single `<pid>/stat` record.
pub const RECORD_READ_LIMIT: usize = 512;

pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Root of a proc-style pseudo filesystem.
#[derive(Debug, Clone)]
pub struct ProcSource {
    root: PathBuf,
}

impl Default for ProcSource {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProcSource { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stat_path(&self) -> PathBuf {
        self.root.join("stat")
    }

    pub fn meminfo_path(&self) -> PathBuf {
        self.root.join("meminfo")
    }

    pub fn process_stat_path(&self, pid: u32) -> PathBuf {
        self.root.join(pid.to_string()).join("stat")
    }
}

/// Reads at most `limit` bytes from `path` in one pass.
///
/// Content past the limit is dropped rather than read incrementally, and
/// invalid UTF-8 is replaced. The file handle is released before returning.
pub fn read_bounded(path: &Path, limit: usize) -> io::Result<String> {
    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(limit.min(COUNTER_READ_LIMIT));
    file.take(limit as u64).read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
