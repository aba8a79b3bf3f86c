//! Ratios and conversions derived from raw counters. All of them are total
//! functions: a zero or negative denominator yields `0.0`.

/// `part / total` clamped into `[0, 1]`.
pub fn ratio(part: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64).clamp(0.0, 1.0) as f32
}

/// `1 - free / (total - buffers)`, with values in kB as `/proc/meminfo` reports them.
pub fn memory_utilization(total: u64, free: u64, buffers: u64) -> f32 {
    let usable = total.saturating_sub(buffers);
    if usable == 0 {
        return 0.0;
    }
    (1.0 - free as f64 / usable as f64).clamp(0.0, 1.0) as f32
}

/// Seconds a process has been alive, given its start time in clock ticks
/// since boot.
pub fn process_uptime(system_uptime: u64, start_ticks: u64, clock_ticks: u64) -> u64 {
    if clock_ticks == 0 {
        return system_uptime;
    }
    system_uptime.saturating_sub(start_ticks / clock_ticks)
}

/// kB → MB, decimal and truncated.
pub fn kb_to_mb(kb: u64) -> u64 {
    kb / 1000
}
