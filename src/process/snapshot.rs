use serde::Serialize;

use crate::format;

/// Every per-process metric read at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSnapshot {
    pub pid: u32,
    /// Virtual memory size in MB.
    pub ram: String,
    pub user: String,
    pub command: String,
    /// Seconds since the process started.
    pub uptime: u64,
    /// Share of all CPU time since boot, in `[0, 1]`.
    pub cpu_utilization: f32,
}

impl ProcessSnapshot {
    pub fn uptime_hms(&self) -> String {
        format::elapsed_time(self.uptime)
    }

    /// The command line with NUL separators shown as spaces.
    pub fn command_line(&self) -> String {
        self.command.replace('\0', " ").trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_for_display() {
        let snapshot = ProcessSnapshot {
            pid: 7,
            ram: "12".to_string(),
            user: "alice".to_string(),
            command: "sleep\060\0".to_string(),
            uptime: 3661,
            cpu_utilization: 0.5,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["pid"], 7);
        assert_eq!(json["user"], "alice");
        assert_eq!(json["cpu_utilization"], 0.5);
        assert_eq!(json["command"], "sleep\u{0}60\u{0}");
        assert_eq!(snapshot.uptime_hms(), "01:01:01");
        assert_eq!(snapshot.command_line(), "sleep 60");
    }
}
