//! Every metric the facades expose, read from the files named by a
//! [`Config`]. Nothing here fails: unavailable data becomes a default.

use std::collections::BTreeSet;

use crate::calc;
use crate::config::{Config, ProcPaths};
use crate::error::ReadError;
use crate::processor::CpuSample;
use crate::reader;
use crate::user::User;

/// Index of utime in `/proc/<pid>/stat`; stime, cutime and cstime follow it.
const PID_STAT_UTIME: usize = 13;
const PID_STAT_CPU_WIDTH: usize = 4;
const PID_STAT_STARTTIME: usize = 21;

const VERSION_KERNEL: usize = 2;

#[derive(Debug, Clone)]
pub struct Source {
    paths: ProcPaths,
    clock_ticks: u64,
}

impl Source {
    pub fn new(config: Config) -> Self {
        let clock_ticks = config.clock_ticks();
        Source {
            paths: config.paths,
            clock_ticks,
        }
    }

    pub fn operating_system(&self) -> String {
        reader::available(reader::try_pretty_name(&self.paths.os_release)).unwrap_or_default()
    }

    pub fn kernel(&self) -> String {
        reader::first_line_fields(&self.paths.version(), VERSION_KERNEL + 1)
            .into_iter()
            .nth(VERSION_KERNEL)
            .unwrap_or_default()
    }

    pub fn pids(&self) -> BTreeSet<u32> {
        reader::numeric_dir_entries(&self.paths.proc_root)
    }

    pub fn memory_utilization(&self) -> f32 {
        let meminfo = self.paths.meminfo();
        let value = |key: &str| reader::keyed_value::<u64>(&meminfo, key);

        match (value("MemTotal:"), value("MemFree:"), value("Buffers:")) {
            (Some(total), Some(free), Some(buffers)) => calc::memory_utilization(total, free, buffers),
            _ => 0.0,
        }
    }

    /// Whole seconds since boot.
    pub fn uptime(&self) -> u64 {
        reader::first_value::<f64>(&self.paths.uptime()) as u64
    }

    pub fn cpu_sample(&self) -> CpuSample {
        let fields = reader::first_line_fields(&self.paths.stat(), CpuSample::FIELDS + 1);
        CpuSample::from_stat_fields(&fields)
    }

    pub fn total_processes(&self) -> u64 {
        reader::keyed_value(&self.paths.stat(), "processes").unwrap_or(0)
    }

    pub fn running_processes(&self) -> u64 {
        reader::keyed_value(&self.paths.stat(), "procs_running").unwrap_or(0)
    }

    /// utime + stime + cutime + cstime of `pid`, in jiffies.
    pub fn active_jiffies(&self, pid: u32) -> u64 {
        // cutime and cstime are signed in the kernel's layout
        reader::pid_stat_fields::<i64>(&self.paths.pid_stat(pid), PID_STAT_UTIME, PID_STAT_CPU_WIDTH)
            .map(|ticks| ticks.into_iter().map(|t| t.max(0) as u64).sum())
            .unwrap_or(0)
    }

    pub fn cpu_utilization(&self, pid: u32) -> f32 {
        calc::ratio(self.active_jiffies(pid), self.cpu_sample().total())
    }

    /// Seconds since `pid` started, 0 if its stat file is gone.
    pub fn process_uptime(&self, pid: u32) -> u64 {
        let start = reader::pid_stat_fields::<u64>(&self.paths.pid_stat(pid), PID_STAT_STARTTIME, 1)
            .and_then(|mut fields| fields.pop());

        match start {
            Some(start) => calc::process_uptime(self.uptime(), start, self.clock_ticks),
            None => 0,
        }
    }

    /// Raw first line of the cmdline file, NUL separators included.
    pub fn command(&self, pid: u32) -> String {
        reader::first_line(&self.paths.pid_cmdline(pid))
    }

    /// Virtual memory size in MB. Empty when the process is gone, `"0"` when it
    /// has no address space (kernel threads carry no `VmSize:` line).
    pub fn ram(&self, pid: u32) -> String {
        match reader::try_keyed_value::<u64>(&self.paths.pid_status(pid), "VmSize:") {
            Ok(kb) => calc::kb_to_mb(kb).to_string(),
            Err(e @ ReadError::Open { .. }) => {
                tracing::debug!(pid, error = %e, "ram unavailable");
                String::new()
            }
            Err(e) => {
                tracing::debug!(pid, error = %e, "ram unavailable");
                "0".to_string()
            }
        }
    }

    /// Real uid, the first of the four values on the `Uid:` line.
    pub fn uid(&self, pid: u32) -> Option<u32> {
        reader::keyed_value(&self.paths.pid_status(pid), "Uid:")
    }

    pub fn user(&self, pid: u32) -> String {
        self.uid(pid)
            .and_then(|uid| reader::available(User::from_passwd(&self.paths.passwd, uid)))
            .map(|user| user.name)
            .unwrap_or_default()
    }
}
