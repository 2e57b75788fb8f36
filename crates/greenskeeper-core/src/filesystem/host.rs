//! [`Filesystem`] implementation backed by the running kernel.

use std::io;
use std::path::Path;

use super::Filesystem;

/// Forwards every primitive to the host's system calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFilesystem;

#[cfg(unix)]
impl Filesystem for HostFilesystem {
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::DirBuilderExt;

        std::fs::DirBuilder::new()
            .recursive(true)
            .mode(mode)
            .create(path)
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
    }

    fn set_owner(&self, path: &Path, uid: Option<u32>, gid: u32) -> io::Result<()> {
        use nix::unistd::{Gid, Uid, chown};

        chown(path, uid.map(Uid::from_raw), Some(Gid::from_raw(gid))).map_err(io::Error::from)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        let meta = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        if meta.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}

/// Stub for non-Unix platforms: POSIX modes, ownership and
/// rename-over-open-file are not available there.
#[cfg(not(unix))]
impl Filesystem for HostFilesystem {
    fn create_dir_all(&self, _path: &Path, _mode: u32) -> io::Result<()> {
        Err(unsupported())
    }

    fn set_mode(&self, _path: &Path, _mode: u32) -> io::Result<()> {
        Err(unsupported())
    }

    fn set_owner(&self, _path: &Path, _uid: Option<u32>, _gid: u32) -> io::Result<()> {
        Err(unsupported())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_all(&self, _path: &Path) -> io::Result<()> {
        Err(unsupported())
    }

    fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
        Err(unsupported())
    }
}

#[cfg(not(unix))]
fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "POSIX filesystem semantics required",
    )
}
