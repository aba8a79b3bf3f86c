//! Throwaway proc trees for unit tests.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::{Config, ProcPaths};
use crate::source::Source;

pub(crate) const CLOCK_TICKS: u64 = 100;

pub(crate) struct FakeProc {
    dir: TempDir,
}

impl FakeProc {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("proc")).unwrap();
        fs::create_dir_all(dir.path().join("etc")).unwrap();
        FakeProc { dir }
    }

    fn proc_root(&self) -> PathBuf {
        self.dir.path().join("proc")
    }

    /// Writes `contents` at `rel` below the proc root.
    pub(crate) fn file(&self, rel: &str, contents: &str) -> &Self {
        let path = self.proc_root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    pub(crate) fn etc(&self, name: &str, contents: &str) -> &Self {
        fs::write(self.dir.path().join("etc").join(name), contents).unwrap();
        self
    }

    pub(crate) fn process(&self, pid: u32, stat: &str, status: &str, cmdline: &str) -> &Self {
        self.file(&format!("{pid}/stat"), stat)
            .file(&format!("{pid}/status"), status)
            .file(&format!("{pid}/cmdline"), cmdline)
    }

    pub(crate) fn config(&self) -> Config {
        Config {
            paths: ProcPaths::new(
                self.proc_root(),
                self.dir.path().join("etc/os-release"),
                self.dir.path().join("etc/passwd"),
            ),
            clock_ticks: Some(CLOCK_TICKS),
        }
    }

    pub(crate) fn source(&self) -> Arc<Source> {
        Arc::new(Source::new(self.config()))
    }
}

/// A `/proc/<pid>/stat` line with the given cpu times and start time.
pub(crate) fn pid_stat(pid: u32, comm: &str, cpu: [i64; 4], starttime: u64) -> String {
    let [utime, stime, cutime, cstime] = cpu;
    format!(
        "{pid} ({comm}) S 1 {pid} {pid} 0 -1 4194560 2000 0 0 0 \
         {utime} {stime} {cutime} {cstime} 20 0 1 0 {starttime} 10485760 512 \
         18446744073709551615 1 1 0 0 0 0 0 4096 0 0 0 0 17 0 0 0 0 0 0\n"
    )
}

pub(crate) fn status(uid: u32, vm_size_kb: Option<u64>) -> String {
    let mut out = format!("Name:\tfake\nState:\tS (sleeping)\nUid:\t{uid}\t{uid}\t{uid}\t{uid}\n");
    if let Some(kb) = vm_size_kb {
        out.push_str(&format!("VmSize:\t{kb:>8} kB\n"));
    }
    out
}
