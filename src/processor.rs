use std::sync::Arc;

use crate::calc;
use crate::source::Source;

/// Cumulative jiffies from the aggregate `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuSample {
    pub const LABEL: &'static str = "cpu";
    pub const FIELDS: usize = 10;

    /// Builds a sample from the tokens of a `cpu ...` line, label included.
    /// Any other line gives a zeroed sample; absent or unparsable columns
    /// read as zero.
    pub fn from_stat_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        match fields.split_first() {
            Some((label, counters)) if label.as_ref() == Self::LABEL => {
                let mut values = [0u64; Self::FIELDS];
                for (slot, token) in values.iter_mut().zip(counters) {
                    *slot = token.as_ref().parse().unwrap_or(0);
                }
                let [user, nice, system, idle, iowait, irq, softirq, steal, guest, guest_nice] = values;
                CpuSample {
                    user,
                    nice,
                    system,
                    idle,
                    iowait,
                    irq,
                    softirq,
                    steal,
                    guest,
                    guest_nice,
                }
            }
            _ => CpuSample::default(),
        }
    }

    pub fn active(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.irq,
            self.softirq,
            self.steal,
            self.guest,
            self.guest_nice,
        ]
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    pub fn idle(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    pub fn total(&self) -> u64 {
        self.active().saturating_add(self.idle())
    }

    /// Share of active jiffies since boot.
    pub fn utilization(&self) -> f32 {
        calc::ratio(self.active(), self.total())
    }

    /// Share of active jiffies in the interval since `earlier`.
    pub fn utilization_since(&self, earlier: &CpuSample) -> f32 {
        let active = self.active().saturating_sub(earlier.active());
        let total = self.total().saturating_sub(earlier.total());
        calc::ratio(active, total)
    }
}

/// The machine's CPUs taken as a whole.
#[derive(Debug, Clone)]
pub struct Processor {
    source: Arc<Source>,
}

impl Processor {
    pub fn new(source: Arc<Source>) -> Self {
        Processor { source }
    }

    pub fn sample(&self) -> CpuSample {
        self.source.cpu_sample()
    }

    pub fn utilization(&self) -> f32 {
        self.sample().utilization()
    }
}
