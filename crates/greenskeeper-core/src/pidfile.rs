//! Stale pidfile detection.
//!
//! Before the daemon starts, the launcher checks the pidfile a previous
//! instance may have left. A live pid aborts startup; a dead one means the
//! file is stale and gets removed.

use std::io;
use std::path::Path;

use greenskeeper_common::constants::STALE_PIDFILE_NOTICE;
use greenskeeper_common::error::{GreenskeeperError, Result};

use crate::filesystem::{Filesystem, HostFilesystem};
use crate::process::{ProcFsProbe, ProcessProbe};

/// Outcome of a successful [`StaleProcessGuard::check_and_clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidfileStatus {
    /// No pidfile existed.
    Absent,
    /// A pidfile naming a dead process was removed.
    Cleared,
}

/// Guards against starting a second daemon over a live one.
#[derive(Debug, Clone, Default)]
pub struct StaleProcessGuard<F = HostFilesystem, P = ProcFsProbe> {
    fs: F,
    probe: P,
}

impl StaleProcessGuard {
    /// Guard backed by the host filesystem and `/proc`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: Filesystem, P: ProcessProbe> StaleProcessGuard<F, P> {
    /// Guard with custom removal and liveness primitives.
    #[must_use]
    pub const fn with_parts(fs: F, probe: P) -> Self {
        Self { fs, probe }
    }

    /// Checks `pidfile` and removes it if the process it names is gone.
    ///
    /// Surrounding whitespace in the file is ignored. Content that is not a
    /// pid, including bytes that are not UTF-8, counts as a dead process.
    ///
    /// # Errors
    ///
    /// - [`GreenskeeperError::ProcessStillRunning`] if the recorded process is
    ///   alive; the pidfile is left untouched.
    /// - [`GreenskeeperError::PidfileIo`] if the pidfile cannot be read or removed.
    pub fn check_and_clear(&self, pidfile: &Path) -> Result<PidfileStatus> {
        let raw = match std::fs::read(pidfile) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %pidfile.display(), "no pidfile present");
                return Ok(PidfileStatus::Absent);
            }
            Err(e) => {
                return Err(GreenskeeperError::PidfileIo {
                    path: pidfile.to_path_buf(),
                    source: e,
                });
            }
        };

        // Undecodable bytes become U+FFFD, which no probe accepts as a pid.
        let contents = String::from_utf8_lossy(&raw);
        let pid = contents.trim();
        if self.probe.is_alive(pid) {
            return Err(GreenskeeperError::ProcessStillRunning {
                pid: pid.to_string(),
            });
        }

        announce_stale(pidfile, pid);
        self.fs
            .remove_file(pidfile)
            .map_err(|e| GreenskeeperError::PidfileIo {
                path: pidfile.to_path_buf(),
                source: e,
            })?;
        Ok(PidfileStatus::Cleared)
    }
}

#[allow(clippy::print_stdout)]
fn announce_stale(pidfile: &Path, pid: &str) {
    println!("{STALE_PIDFILE_NOTICE}");
    tracing::info!(path = %pidfile.display(), pid, "removing stale pidfile");
}
