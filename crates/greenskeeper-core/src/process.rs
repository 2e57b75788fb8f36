//! Process liveness probes.
//!
//! The default probe looks for `/proc/<pid>`. [`SignalProbe`] asks the
//! kernel with a null signal instead, for hosts without procfs.

use std::path::PathBuf;

use greenskeeper_common::constants::PROC_ROOT;

/// Answers whether a recorded pid still names a live process.
pub trait ProcessProbe {
    /// Returns `true` if `pid` is alive. Implementations must return `false`
    /// for anything that is not a valid pid.
    fn is_alive(&self, pid: &str) -> bool;
}

/// Parses a pidfile pid: ASCII digits only, no sign, no leading zeros, not zero.
///
/// Rejecting everything else keeps values like `self` or `../x` from being
/// joined onto `/proc`.
#[must_use]
pub fn parse_pid(pid: &str) -> Option<u32> {
    if pid.is_empty() || pid.starts_with('0') || !pid.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    pid.parse::<u32>().ok()
}

/// Checks for an entry in the process-information pseudo-filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcFsProbe {
    root: PathBuf,
}

impl ProcFsProbe {
    /// Probe rooted at `/proc`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(PROC_ROOT)
    }

    /// Probe rooted at an arbitrary directory laid out like `/proc`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for ProcFsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProbe for ProcFsProbe {
    fn is_alive(&self, pid: &str) -> bool {
        parse_pid(pid).is_some_and(|p| self.root.join(p.to_string()).exists())
    }
}

/// Sends signal 0 to the pid. `EPERM` still means the process exists.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalProbe;

#[cfg(unix)]
impl ProcessProbe for SignalProbe {
    fn is_alive(&self, pid: &str) -> bool {
        use nix::errno::Errno;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        let Some(pid) = parse_pid(pid).and_then(|p| i32::try_from(p).ok()) else {
            return false;
        };
        match kill(Pid::from_raw(pid), None) {
            Ok(()) | Err(Errno::EPERM) => true,
            Err(_) => false,
        }
    }
}
