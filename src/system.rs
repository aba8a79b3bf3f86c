use std::sync::Arc;

use crate::config::Config;
use crate::process::Process;
use crate::processor::Processor;
use crate::source::Source;

/// Machine-wide view the display polls: CPU, memory, uptime and the list of
/// live processes.
#[derive(Debug, Clone)]
pub struct System {
    source: Arc<Source>,
    cpu: Processor,
}

impl System {
    pub fn new(config: Config) -> Self {
        Self::with_source(Arc::new(Source::new(config)))
    }

    pub fn with_source(source: Arc<Source>) -> Self {
        System {
            cpu: Processor::new(source.clone()),
            source,
        }
    }

    pub fn cpu(&self) -> &Processor {
        &self.cpu
    }

    /// Live processes, ascending by pid. Built from a fresh directory
    /// listing on every call, so exited processes drop out.
    pub fn processes(&self) -> Vec<Process> {
        let processes: Vec<Process> = self
            .source
            .pids()
            .into_iter()
            .map(|pid| Process::new(pid, self.source.clone()))
            .collect();
        tracing::trace!(count = processes.len(), "listed processes");
        processes
    }

    pub fn memory_utilization(&self) -> f32 {
        self.source.memory_utilization()
    }

    pub fn uptime(&self) -> u64 {
        self.source.uptime()
    }

    pub fn total_processes(&self) -> u64 {
        self.source.total_processes()
    }

    pub fn running_processes(&self) -> u64 {
        self.source.running_processes()
    }

    pub fn kernel(&self) -> String {
        self.source.kernel()
    }

    pub fn operating_system(&self) -> String {
        self.source.operating_system()
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{self, FakeProc};

    #[test]
    fn processes_follow_the_directory() {
        let fake = FakeProc::new();
        fake.file("stat", "cpu 10 0 10 80 0 0 0 0 0 0\nprocesses 90\nprocs_running 2\n")
            .process(300, &fixture::pid_stat(300, "b", [1, 0, 0, 0], 0), &fixture::status(0, None), "b")
            .process(12, &fixture::pid_stat(12, "a", [1, 0, 0, 0], 0), &fixture::status(0, None), "a")
            .file("self/stat", "not a pid");
        let system = System::with_source(fake.source());

        let pids: Vec<u32> = system.processes().iter().map(Process::pid).collect();
        assert_eq!(pids, [12, 300]);
        assert!((system.cpu().utilization() - 0.2).abs() < 1e-6);
        assert_eq!(system.total_processes(), 90);
        assert_eq!(system.running_processes(), 2);

        fake.file("77/stat", &fixture::pid_stat(77, "c", [0, 0, 0, 0], 0));
        assert_eq!(system.processes().len(), 3);
    }
}
