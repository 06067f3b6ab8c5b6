use serde::Serialize;

use crate::error::SampleError;

/// How to treat records that end before all expected fields are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Missing fields read as zero.
    #[default]
    Lenient,
    /// Missing fields are an error.
    Strict,
}

impl ParseMode {
    pub fn from_lenient(lenient: bool) -> Self {
        if lenient {
            ParseMode::Lenient
        } else {
            ParseMode::Strict
        }
    }
}

pub const CPU_FIELD_COUNT: usize = 8;

/// Aggregate CPU tick counters from the `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CpuCounters {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuCounters {
    pub fn from_fields(fields: [u64; CPU_FIELD_COUNT]) -> Self {
        let [user, nice, system, idle, iowait, irq, softirq, steal] = fields;
        CpuCounters {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
        }
    }

    /// Ticks since boot across all eight counters.
    pub fn total(&self) -> u128 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .iter()
        .map(|&v| v as u128)
        .sum()
    }

    /// Ticks spent idle, including time waiting on I/O.
    pub fn idle_total(&self) -> u128 {
        self.idle as u128 + self.iowait as u128
    }

    /// Parses the aggregate `cpu` line out of `/proc/stat` contents.
    ///
    /// Integers are taken in order until the first token that is not an
    /// unsigned integer. In lenient mode a short line (or no `cpu` line at all)
    /// leaves the remaining counters at zero.
    pub fn parse(contents: &str, mode: ParseMode) -> Result<Self, SampleError> {
        let mut fields = [0u64; CPU_FIELD_COUNT];
        let mut found = 0;

        let line = contents.lines().find(|line| {
            let mut tokens = line.split_whitespace();
            tokens.next() == Some("cpu")
        });

        if let Some(line) = line {
            let values = line
                .split_whitespace()
                .skip(1)
                .map_while(|tok| tok.parse::<u64>().ok())
                .take(CPU_FIELD_COUNT);
            for (slot, value) in fields.iter_mut().zip(values) {
                *slot = value;
                found += 1;
            }
        }

        if found < CPU_FIELD_COUNT {
            if mode == ParseMode::Strict {
                return Err(SampleError::ParseShortfall {
                    source_name: "stat",
                    expected: CPU_FIELD_COUNT,
                    found,
                });
            }
            tracing::debug!(found, "short cpu line, missing counters read as zero");
        }

        Ok(CpuCounters::from_fields(fields))
    }
}

/// Memory totals from `/proc/meminfo`, in kilobytes.
///
/// `total_kb == 0` means `MemTotal` was absent or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MemoryCounters {
    pub total_kb: u64,
    pub available_kb: u64,
}

impl MemoryCounters {
    pub fn parse(contents: &str) -> Self {
        let mut counters = MemoryCounters::default();
        for line in contents.lines() {
            if let Some(rest) = line.strip_prefix("MemTotal:") {
                counters.total_kb = leading_integer(rest);
            } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
                counters.available_kb = leading_integer(rest);
            }
        }
        counters
    }
}

// The unit suffix ("kB") is assumed, not checked.
fn leading_integer(rest: &str) -> u64 {
    rest.split_whitespace()
        .next()
        .and_then(|tok| tok.parse().ok())
        .unwrap_or(0)
}
