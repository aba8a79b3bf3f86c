use std::cmp::Ordering;
use std::sync::Arc;

use crate::source::Source;

mod snapshot;

pub use snapshot::ProcessSnapshot;

/// A live process, identified by its pid. Every accessor re-reads
/// `/proc/<pid>`, so values track the process until it exits and then fall
/// back to defaults.
#[derive(Debug, Clone)]
pub struct Process {
    pid: u32,
    source: Arc<Source>,
}

impl Process {
    pub fn new(pid: u32, source: Arc<Source>) -> Self {
        Process { pid, source }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn cpu_utilization(&self) -> f32 {
        self.source.cpu_utilization(self.pid)
    }

    pub fn command(&self) -> String {
        self.source.command(self.pid)
    }

    pub fn ram(&self) -> String {
        self.source.ram(self.pid)
    }

    pub fn user(&self) -> String {
        self.source.user(self.pid)
    }

    pub fn uptime(&self) -> u64 {
        self.source.process_uptime(self.pid)
    }

    pub fn snapshot(&self) -> ProcessSnapshot {
        ProcessSnapshot {
            pid: self.pid,
            ram: self.ram(),
            user: self.user(),
            command: self.command(),
            uptime: self.uptime(),
            cpu_utilization: self.cpu_utilization(),
        }
    }
}

// Identity and order are the pid alone.
impl PartialEq for Process {
    fn eq(&self, other: &Self) -> bool {
        self.pid == other.pid
    }
}

impl Eq for Process {}

impl PartialOrd for Process {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Process {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pid.cmp(&other.pid)
    }
}
