#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use sysmon::system::collector::{Collector, CollectorOptions};
use sysmon::system::source::ProcSource;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A throwaway proc-style tree under the system temp dir.
pub struct FakeProc {
    root: PathBuf,
}

impl FakeProc {
    pub fn new(label: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let root =
            std::env::temp_dir().join(format!("sysmon_procfs_{label}_{}_{id}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        FakeProc { root }
    }

    /// A small host: fixed counters plus three processes.
    pub fn host(label: &str) -> Self {
        let fake = Self::new(label);
        fake.write(
            "stat",
            "cpu  100 0 50 800 10 0 0 0 0 0\ncpu0 100 0 50 800 10 0 0 0 0 0\n",
        );
        fake.write(
            "meminfo",
            "MemTotal:        1000000 kB\nMemFree:          100000 kB\nMemAvailable:     250000 kB\n",
        );
        fake.process(1, "init", 300, 200);
        fake.process(2, "b", 400, 100);
        fake.process(3, "c", 800, 100);
        fake
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    pub fn process(&self, pid: u32, name: &str, utime: u64, stime: u64) {
        self.write(
            &format!("{pid}/stat"),
            &format!("{pid} ({name}) S 1 {pid} {pid} 0 -1 4194560 100 0 0 0 {utime} {stime} 0 0 20 0 1 0 42 1000 10\n"),
        );
    }

    pub fn collector(&self, options: CollectorOptions) -> Collector {
        Collector::new(ProcSource::new(&self.root), options)
    }
}

impl Drop for FakeProc {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

/// A fresh, not-yet-existing file path under the temp dir.
pub fn temp_file(label: &str) -> PathBuf {
    let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
    let path =
        std::env::temp_dir().join(format!("sysmon_{label}_{}_{id}.log", std::process::id()));
    let _ = fs::remove_file(&path);
    path
}
