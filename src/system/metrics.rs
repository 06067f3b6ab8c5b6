use serde::Serialize;

use super::snapshot::{CpuCounters, MemoryCounters};

/// Percentage of non-idle ticks between two snapshots.
///
/// Returns 0.0 when the total delta is zero or negative (identical snapshots,
/// counter reset). No clamping otherwise: inconsistent counters can push the
/// result outside [0, 100] and it is returned as computed.
pub fn cpu_utilization(prev: &CpuCounters, curr: &CpuCounters) -> f64 {
    let total_delta = curr.total() as i128 - prev.total() as i128;
    if total_delta <= 0 {
        return 0.0;
    }
    let idle_delta = curr.idle_total() as i128 - prev.idle_total() as i128;
    (total_delta - idle_delta) as f64 / total_delta as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryUsage {
    pub total_kb: u64,
    pub used_kb: u64,
    pub available_kb: u64,
    pub used_percent: f64,
    pub free_percent: f64,
}

/// Used/free split of a memory snapshot, `None` when `MemTotal` is missing.
///
/// When available exceeds total the used figure clamps at zero.
pub fn memory_usage(counters: &MemoryCounters) -> Option<MemoryUsage> {
    let total_kb = counters.total_kb;
    if total_kb == 0 {
        return None;
    }
    if counters.available_kb > total_kb {
        tracing::warn!(
            total_kb,
            available_kb = counters.available_kb,
            "available memory exceeds total, used memory reads as zero"
        );
    }
    let used_kb = total_kb.saturating_sub(counters.available_kb);
    let used_percent = used_kb as f64 / total_kb as f64 * 100.0;
    Some(MemoryUsage {
        total_kb,
        used_kb,
        available_kb: counters.available_kb,
        used_percent,
        free_percent: 100.0 - used_percent,
    })
}
