use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

/// ctime-style stamp, e.g. `Thu Oct 16 09:41:07 2026`.
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Append-only text log of notable session events.
///
/// Each call opens, appends and closes the file. Write failures are reported
/// through `tracing` and otherwise ignored.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: Option<PathBuf>,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ActivityLog {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        ActivityLog { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn record(&self, message: &str) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(err) = append_line(path, &format_entry(message)) {
            tracing::error!(path = %path.display(), %err, "failed to write activity log");
        }
    }
}

pub fn format_entry(message: &str) -> String {
    format!("[{}] {}\n", Local::now().format(TIMESTAMP_FORMAT), message)
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())
}
