//! Shared helpers for unit tests.

use std::cell::RefCell;
use std::io;
use std::path::Path;

use greenskeeper_common::types::Ownership;

use crate::filesystem::{Filesystem, HostFilesystem};

/// Host filesystem that fails one named primitive and records every call.
#[derive(Debug, Default)]
pub struct FaultyFs {
    fail: Option<&'static str>,
    calls: RefCell<Vec<&'static str>>,
}

impl FaultyFs {
    pub fn failing(step: &'static str) -> Self {
        Self {
            fail: Some(step),
            calls: RefCell::default(),
        }
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls.borrow().iter().any(|c| *c == name)
    }

    fn call(&self, name: &'static str) -> io::Result<()> {
        self.calls.borrow_mut().push(name);
        if self.fail == Some(name) {
            return Err(io::Error::other("I failed"));
        }
        Ok(())
    }
}

impl Filesystem for FaultyFs {
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        self.call("create_dir_all")?;
        HostFilesystem.create_dir_all(path, mode)
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        self.call("set_mode")?;
        HostFilesystem.set_mode(path, mode)
    }

    fn set_owner(&self, path: &Path, uid: Option<u32>, gid: u32) -> io::Result<()> {
        self.call("set_owner")?;
        HostFilesystem.set_owner(path, uid, gid)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.call("remove_file")?;
        HostFilesystem.remove_file(path)
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        self.call("remove_all")?;
        HostFilesystem.remove_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.call("rename")?;
        HostFilesystem.rename(from, to)
    }
}

/// Ownership matching the test process, which it may always chown to.
pub fn current_ownership() -> Ownership {
    Ownership::new(
        nix::unistd::geteuid().as_raw(),
        nix::unistd::getegid().as_raw(),
    )
}

/// Reads the process umask from `/proc/self/status` without changing it.
#[cfg(target_os = "linux")]
pub fn current_umask() -> u32 {
    let status = std::fs::read_to_string("/proc/self/status").expect("read /proc/self/status");
    status
        .lines()
        .find_map(|l| l.strip_prefix("Umask:"))
        .and_then(|v| u32::from_str_radix(v.trim(), 8).ok())
        .expect("Umask line in /proc/self/status")
}
