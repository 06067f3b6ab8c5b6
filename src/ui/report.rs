use std::fmt::Write;

use serde::Serialize;

use crate::action::Operation;
use crate::format::{kb_to_mb, pad_unicode};
use crate::system::metrics::MemoryUsage;
use crate::system::process::ProcessRecord;

const NAME_COLUMN_WIDTH: usize = 20;
const RULE_WIDE: &str = "=============================================";
const RULE_MENU: &str = "========================================";

/// Machine-readable result of a single operation.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Cpu {
        usage_percent: f64,
    },
    Memory {
        usage: Option<MemoryUsage>,
    },
    Processes {
        top: usize,
        processes: Vec<ProcessRecord>,
    },
    Error {
        operation: Operation,
        message: String,
    },
}

impl Report {
    /// Activity-log line for this result, if it is worth recording.
    pub fn activity_message(&self) -> Option<String> {
        match self {
            Report::Cpu { usage_percent } => {
                Some(format!("CPU Usage checked: {usage_percent:.2}%"))
            }
            Report::Memory { usage: Some(usage) } => Some(format!(
                "Memory checked: Used {} MB ({:.2}%)",
                kb_to_mb(usage.used_kb),
                usage.used_percent
            )),
            Report::Memory { usage: None } => None,
            Report::Processes { top, .. } => Some(format!("Checked Top {top} Processes.")),
            Report::Error { .. } => None,
        }
    }
}

/// Plain-text rendering of a report, excluding the CPU sampling preamble.
pub fn render(report: &Report) -> String {
    match report {
        Report::Cpu { usage_percent } => cpu_result(*usage_percent),
        Report::Memory { usage } => memory(usage.as_ref()),
        Report::Processes { top, processes } => top_processes(processes, *top),
        Report::Error { operation, message } => {
            let what = match operation {
                Operation::Cpu => "CPU counters",
                Operation::Memory => "memory counters",
                Operation::Processes => "process list",
            };
            format!("Could not read {what}: {message}\n")
        }
    }
}

pub fn cpu_header() -> String {
    "\n--- CPU Usage ---\nMeasuring CPU usage (sampling 1 second)...\n".to_string()
}

pub fn cpu_result(usage_percent: f64) -> String {
    format!("CPU Usage: {usage_percent:.2}%\n")
}

pub fn memory(usage: Option<&MemoryUsage>) -> String {
    let mut out = String::from("\n--- Memory Usage ---\n");
    match usage {
        Some(usage) => {
            let _ = writeln!(out, "Total Memory: {} MB", kb_to_mb(usage.total_kb));
            let _ = writeln!(
                out,
                "Used Memory:  {} MB ({:.2}%)",
                kb_to_mb(usage.used_kb),
                usage.used_percent
            );
            let _ = writeln!(out, "Free Memory:  {} MB", kb_to_mb(usage.available_kb));
        }
        None => out.push_str("Could not read memory info.\n"),
    }
    out
}

pub fn top_processes(records: &[ProcessRecord], n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n--- Top {n} Processes (by Accumulated CPU Time) ---");
    let _ = writeln!(
        out,
        "{:<8} {} CPU Time (ticks)",
        "PID",
        pad_unicode("Name", NAME_COLUMN_WIDTH)
    );
    for record in records.iter().take(n) {
        let _ = writeln!(
            out,
            "{:<8} {} {}",
            record.pid,
            pad_unicode(&record.name, NAME_COLUMN_WIDTH),
            record.cpu_ticks
        );
    }
    out
}

pub fn continuous_banner(interval_secs: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE_WIDE}");
    let _ = writeln!(out, "   sysmon - Continuous Monitoring");
    let _ = writeln!(out, "   Refresh Interval: {interval_secs} seconds");
    let _ = writeln!(out, "   (Press Ctrl+C to stop)");
    let _ = writeln!(out, "{RULE_WIDE}");
    out
}

pub fn refreshing_in(interval_secs: u64) -> String {
    format!("\nRefreshing in {interval_secs} seconds...\n")
}

pub fn menu(top_n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE_MENU}");
    let _ = writeln!(out, "       sysmon - System Monitor");
    let _ = writeln!(out, "{RULE_MENU}");
    let _ = writeln!(out, "1. CPU Usage");
    let _ = writeln!(out, "2. Memory Usage");
    let _ = writeln!(out, "3. Top {top_n} Processes (CPU)");
    let _ = writeln!(out, "4. Continuous Monitoring");
    let _ = writeln!(out, "5. Exit");
    let _ = writeln!(out, "{RULE_MENU}");
    out
}
