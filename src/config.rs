use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_CONFIG: &str = "LPM_CONFIG";
pub const ENV_PROC_ROOT: &str = "LPM_PROC_ROOT";
pub const ENV_OS_RELEASE: &str = "LPM_OS_RELEASE";
pub const ENV_PASSWD: &str = "LPM_PASSWD";

const MEMINFO: &str = "meminfo";
const UPTIME: &str = "uptime";
const STAT: &str = "stat";
const VERSION: &str = "version";
const STATUS: &str = "status";
const CMDLINE: &str = "cmdline";

/// Locations of every file the readers consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcPaths {
    pub proc_root: PathBuf,
    pub os_release: PathBuf,
    pub passwd: PathBuf,
}

impl Default for ProcPaths {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            os_release: PathBuf::from("/etc/os-release"),
            passwd: PathBuf::from("/etc/passwd"),
        }
    }
}

impl ProcPaths {
    pub fn new(
        proc_root: impl Into<PathBuf>,
        os_release: impl Into<PathBuf>,
        passwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            proc_root: proc_root.into(),
            os_release: os_release.into(),
            passwd: passwd.into(),
        }
    }

    pub fn meminfo(&self) -> PathBuf {
        self.proc_root.join(MEMINFO)
    }

    pub fn uptime(&self) -> PathBuf {
        self.proc_root.join(UPTIME)
    }

    pub fn stat(&self) -> PathBuf {
        self.proc_root.join(STAT)
    }

    pub fn version(&self) -> PathBuf {
        self.proc_root.join(VERSION)
    }

    pub fn pid_stat(&self, pid: u32) -> PathBuf {
        self.pid_dir(pid).join(STAT)
    }

    pub fn pid_status(&self, pid: u32) -> PathBuf {
        self.pid_dir(pid).join(STATUS)
    }

    pub fn pid_cmdline(&self, pid: u32) -> PathBuf {
        self.pid_dir(pid).join(CMDLINE)
    }

    fn pid_dir(&self, pid: u32) -> PathBuf {
        self.proc_root.join(pid.to_string())
    }
}

/// Reader configuration. Every field is optional in the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub paths: ProcPaths,
    /// Overrides the kernel-reported clock tick rate.
    pub clock_ticks: Option<u64>,
}

impl Config {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable lookup.
    /// A config file named by `LPM_CONFIG` is loaded first, the path
    /// variables then override it.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(ENV_CONFIG) {
            Some(file) => Self::from_json_file(Path::new(&file))?,
            None => Self::default(),
        };

        if let Some(root) = lookup(ENV_PROC_ROOT) {
            config.paths.proc_root = root.into();
        }
        if let Some(os_release) = lookup(ENV_OS_RELEASE) {
            config.paths.os_release = os_release.into();
        }
        if let Some(passwd) = lookup(ENV_PASSWD) {
            config.paths.passwd = passwd.into();
        }

        Ok(config)
    }

    /// Clock ticks per second used to convert jiffies into seconds.
    pub fn clock_ticks(&self) -> u64 {
        self.clock_ticks.unwrap_or_else(procfs::ticks_per_second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_the_live_system() {
        let paths = ProcPaths::default();
        assert_eq!(paths.meminfo(), PathBuf::from("/proc/meminfo"));
        assert_eq!(paths.pid_status(42), PathBuf::from("/proc/42/status"));
        assert_eq!(paths.passwd, PathBuf::from("/etc/passwd"));
    }

    #[test]
    fn env_overrides_paths() {
        let vars: HashMap<&str, &str> = [(ENV_PROC_ROOT, "/tmp/fake"), (ENV_PASSWD, "/tmp/passwd")]
            .into_iter()
            .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.paths.stat(), PathBuf::from("/tmp/fake/stat"));
        assert_eq!(config.paths.passwd, PathBuf::from("/tmp/passwd"));
        assert_eq!(config.paths.os_release, PathBuf::from("/etc/os-release"));
        assert_eq!(config.clock_ticks, None);
    }

    #[test]
    fn json_file_with_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lpm.json");
        fs::write(&file, r#"{ "proc_root": "/srv/proc", "clock_ticks": 250 }"#).unwrap();

        let config = Config::from_json_file(&file).unwrap();
        assert_eq!(config.paths.proc_root, PathBuf::from("/srv/proc"));
        assert_eq!(config.paths.passwd, PathBuf::from("/etc/passwd"));
        assert_eq!(config.clock_ticks(), 250);
    }

    #[test]
    fn broken_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lpm.json");
        fs::write(&file, "{ not json").unwrap();

        assert!(matches!(
            Config::from_json_file(&file),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Config::from_json_file(&dir.path().join("missing.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
