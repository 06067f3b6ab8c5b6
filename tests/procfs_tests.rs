mod common;

use std::fs;
use std::path::Path;

use common::FakeProc;
use sysmon::error::SampleError;
use sysmon::system::collector::{Collector, CollectorOptions};
use sysmon::system::metrics::{cpu_utilization, memory_usage};
use sysmon::system::process::top_n;
use sysmon::system::snapshot::{CpuCounters, ParseMode};
use sysmon::system::source::ProcSource;

#[test]
fn cpu_counters_from_stat_file() {
    let fake = FakeProc::new("cpu");
    fake.write(
        "stat",
        "cpu  100 0 50 800 10 0 0 0 0 0\ncpu0 50 0 25 400 5 0 0 0 0 0\nbtime 1700000000\n",
    );
    let collector = fake.collector(CollectorOptions::default());
    let prev = collector.read_cpu_counters().unwrap();
    assert_eq!(
        prev,
        CpuCounters::from_fields([100, 0, 50, 800, 10, 0, 0, 0])
    );

    fake.write("stat", "cpu  120 0 60 810 10 0 0 0 0 0\n");
    let curr = collector.read_cpu_counters().unwrap();
    assert!((cpu_utilization(&prev, &curr) - 75.0).abs() < 1e-9);
}

#[test]
fn strict_mode_rejects_short_cpu_line() {
    let fake = FakeProc::new("strict");
    fake.write("stat", "cpu 1 2 3 4\n");
    let options = CollectorOptions {
        mode: ParseMode::Strict,
        ..CollectorOptions::default()
    };
    let err = fake.collector(options).read_cpu_counters().unwrap_err();
    assert!(matches!(err, SampleError::ParseShortfall { found: 4, .. }));

    let lenient = fake.collector(CollectorOptions::default());
    let counters = lenient.read_cpu_counters().unwrap();
    assert_eq!(counters.idle, 4);
    assert_eq!(counters.iowait, 0);
}

#[test]
fn missing_counter_sources_are_unavailable() {
    let fake = FakeProc::new("missing");
    let collector = fake.collector(CollectorOptions::default());
    assert!(matches!(
        collector.read_cpu_counters(),
        Err(SampleError::SourceUnavailable { .. })
    ));
    assert!(matches!(
        collector.read_memory_counters(),
        Err(SampleError::SourceUnavailable { .. })
    ));
}

#[test]
fn memory_counters_from_meminfo_file() {
    let fake = FakeProc::new("mem");
    fake.write(
        "meminfo",
        "MemTotal:        1000000 kB\nMemFree:          100000 kB\nMemAvailable:     250000 kB\nCached:           5000 kB\n",
    );
    let counters = fake
        .collector(CollectorOptions::default())
        .read_memory_counters()
        .unwrap();
    let usage = memory_usage(&counters).unwrap();
    assert_eq!(usage.used_kb, 750_000);
    assert!((usage.used_percent - 75.0).abs() < 1e-9);
}

#[test]
fn meminfo_without_total_is_unavailable_not_error() {
    let fake = FakeProc::new("nototal");
    fake.write("meminfo", "MemFree: 100 kB\n");
    let counters = fake
        .collector(CollectorOptions::default())
        .read_memory_counters()
        .unwrap();
    assert!(memory_usage(&counters).is_none());
}

#[test]
fn enumerate_skips_non_process_entries() {
    let fake = FakeProc::new("enum");
    fake.process(1, "init", 500, 0);
    fake.process(2, "b", 400, 100);
    fake.process(3, "c", 800, 100);
    fake.write("self/stat", "999 (self) S 0\n");
    fake.write("net/dev", "");
    fake.write("stat", "cpu 0 0 0 0 0 0 0 0\n");
    // Directory with no stat record: the process exited mid-walk.
    fs::create_dir_all(fake.path().join("77")).unwrap();
    // Record without a name field.
    fake.write("88/stat", "garbage\n");

    let mut records = fake
        .collector(CollectorOptions::default())
        .enumerate()
        .unwrap();
    records.sort_by_key(|r| r.pid);

    let pids: Vec<u32> = records.iter().map(|r| r.pid).collect();
    assert_eq!(pids, vec![1, 2, 3]);
    assert_eq!(records[0].name, "init");
    assert_eq!(records[2].cpu_ticks, 900);

    let top = top_n(records, 2);
    assert_eq!(top[0].pid, 3);
    assert_eq!(top[0].cpu_ticks, 900);
    assert_eq!(top[1].cpu_ticks, 500);
}

#[test]
fn enumerate_honors_process_cap() {
    let fake = FakeProc::new("cap");
    for pid in 1..=10 {
        fake.process(pid, "worker", pid as u64, 0);
    }
    let options = CollectorOptions {
        max_processes: 4,
        ..CollectorOptions::default()
    };
    let records = fake.collector(options).enumerate().unwrap();
    assert_eq!(records.len(), 4);
}

#[test]
fn enumerate_keeps_names_with_parens_and_spaces() {
    let fake = FakeProc::new("names");
    fake.write(
        "42/stat",
        "42 (weird)proc) name) S 1 1 1 0 -1 0 0 0 0 0 7 3 0 0\n",
    );
    fake.write("7/stat", "7 (init) S 0 0\n");

    let mut records = fake
        .collector(CollectorOptions::default())
        .enumerate()
        .unwrap();
    records.sort_by_key(|r| r.pid);

    assert_eq!(records[0].pid, 7);
    assert_eq!(records[0].cpu_ticks, 0);
    assert_eq!(records[1].name, "weird)proc) name");
    assert_eq!(records[1].cpu_ticks, 10);
}

#[test]
fn strict_mode_drops_short_records() {
    let fake = FakeProc::new("strict_records");
    fake.write("7/stat", "7 (init) S 0 0\n");
    fake.process(8, "full", 1, 2);
    let options = CollectorOptions {
        mode: ParseMode::Strict,
        ..CollectorOptions::default()
    };
    let records = fake.collector(options).enumerate().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pid, 8);
}

#[test]
fn missing_root_is_unavailable() {
    let collector = Collector::new(
        ProcSource::new("/nonexistent/sysmon/proc"),
        CollectorOptions::default(),
    );
    assert!(matches!(
        collector.enumerate(),
        Err(SampleError::SourceUnavailable { .. })
    ));
}

#[test]
fn live_proc_smoke() {
    if !Path::new("/proc/stat").exists() {
        return;
    }
    let options = CollectorOptions {
        max_processes: usize::MAX,
        ..CollectorOptions::default()
    };
    let collector = Collector::new(ProcSource::default(), options);
    assert!(collector.read_cpu_counters().unwrap().total() > 0);
    assert!(collector.read_memory_counters().unwrap().total_kb > 0);
    let records = collector.enumerate().unwrap();
    let me = std::process::id();
    assert!(records.iter().any(|r| r.pid == me));
}
