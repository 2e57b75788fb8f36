//! Low-level filesystem primitives used by the launcher helpers.
//!
//! Every mutating system call the helpers make goes through the
//! [`Filesystem`] trait so a test can swap in an implementation that fails at
//! a chosen step. [`HostFilesystem`] forwards to the real kernel.

mod host;

use std::io;
use std::path::Path;

pub use host::HostFilesystem;

/// Mutating filesystem operations, one method per system call family.
pub trait Filesystem {
    /// Creates `path` and any missing parents with `mode` (subject to umask).
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error from `mkdir(2)`.
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Sets the permission bits of `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error from `chmod(2)`.
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Changes the owner of `path`. A `None` uid keeps the current owner.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error from `chown(2)`.
    fn set_owner(&self, path: &Path, uid: Option<u32>, gid: u32) -> io::Result<()>;

    /// Removes a single file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error from `unlink(2)`.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes whatever is at `path`, recursing into directories.
    /// A missing path is not an error.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error hit while removing.
    fn remove_all(&self, path: &Path) -> io::Result<()>;

    /// Atomically renames `from` onto `to`, replacing `to` if it exists.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error from `rename(2)`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        (**self).create_dir_all(path, mode)
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        (**self).set_mode(path, mode)
    }

    fn set_owner(&self, path: &Path, uid: Option<u32>, gid: u32) -> io::Result<()> {
        (**self).set_owner(path, uid, gid)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path)
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        (**self).remove_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).rename(from, to)
    }
}
