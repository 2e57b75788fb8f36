//! Atomic file replacement.
//!
//! Each file is streamed into a `<dest>.tmp` staging file, given the
//! source's mode and the requested owner, and then renamed over the
//! destination. Readers see either the old complete file or the new one.
//! On Unix the rename also works when the destination is a running
//! executable, because processes keep their open inode.

use std::fs::{File, Metadata};
use std::path::{Path, PathBuf};

use greenskeeper_common::constants::{PERMISSION_BITS, TMP_SUFFIX};
use greenskeeper_common::error::{GreenskeeperError, Result};
use greenskeeper_common::types::FileSpec;

use crate::filesystem::{Filesystem, HostFilesystem};

/// Copies files into place one at a time.
#[derive(Debug, Clone, Default)]
pub struct FileReplacer<F = HostFilesystem> {
    fs: F,
}

impl FileReplacer {
    /// Creates a replacer that talks to the host filesystem.
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: HostFilesystem }
    }
}

impl<F: Filesystem> FileReplacer<F> {
    /// Creates a replacer over a custom [`Filesystem`].
    #[must_use]
    pub const fn with_filesystem(fs: F) -> Self {
        Self { fs }
    }

    /// Copies every file in order, stopping at the first failure.
    ///
    /// Files already published stay in place when a later one fails.
    ///
    /// # Errors
    ///
    /// Returns the error of the first file that could not be replaced.
    pub fn replace(&self, files: &[FileSpec]) -> Result<()> {
        for file in files {
            self.replace_one(file)?;
        }
        Ok(())
    }

    /// Copies a single file into place.
    ///
    /// # Errors
    ///
    /// - [`GreenskeeperError::SourceNotFound`] if the source cannot be stat'd.
    /// - [`GreenskeeperError::CopyIo`] if reading, writing or syncing fails.
    /// - [`GreenskeeperError::PermissionChange`] if the mode cannot be set.
    /// - [`GreenskeeperError::OwnershipChange`] if the owner cannot be set.
    /// - [`GreenskeeperError::Publish`] if the destination cannot be replaced.
    pub fn replace_one(&self, file: &FileSpec) -> Result<()> {
        let meta = std::fs::metadata(&file.source).map_err(|e| {
            GreenskeeperError::SourceNotFound {
                path: file.source.clone(),
                source: e,
            }
        })?;
        let mode = permission_bits(&meta);
        let staging = staging_path(&file.dest);

        self.stage_contents(&file.source, &staging)?;
        let result = self.publish(file, &staging, mode);
        if result.is_err() {
            self.discard_staging(&staging);
        }
        result
    }

    /// Streams `source` into a freshly truncated `staging` and flushes it to
    /// disk. Both handles are closed when this returns. The staging file is
    /// only removed on failure if this call created it.
    fn stage_contents(&self, source: &Path, staging: &Path) -> Result<()> {
        let mut src = File::open(source).map_err(|e| GreenskeeperError::CopyIo {
            path: source.to_path_buf(),
            source: e,
        })?;
        let mut dst = File::create(staging).map_err(|e| GreenskeeperError::CopyIo {
            path: staging.to_path_buf(),
            source: e,
        })?;

        let written = std::io::copy(&mut src, &mut dst).and_then(|bytes| {
            dst.sync_all()?;
            Ok(bytes)
        });
        drop(dst);
        match written {
            Ok(bytes) => {
                tracing::debug!(path = %staging.display(), bytes, "staging file written");
                Ok(())
            }
            Err(e) => {
                self.discard_staging(staging);
                Err(GreenskeeperError::CopyIo {
                    path: staging.to_path_buf(),
                    source: e,
                })
            }
        }
    }

    fn publish(&self, file: &FileSpec, staging: &Path, mode: u32) -> Result<()> {
        self.fs
            .set_mode(staging, mode)
            .map_err(|e| GreenskeeperError::PermissionChange {
                path: staging.to_path_buf(),
                source: e,
            })?;

        if let Some((uid, gid)) = file.ownership.chown_target() {
            self.fs
                .set_owner(staging, uid, gid)
                .map_err(|e| GreenskeeperError::OwnershipChange {
                    path: staging.to_path_buf(),
                    source: e,
                })?;
        }

        self.fs
            .remove_all(&file.dest)
            .map_err(|e| GreenskeeperError::Publish {
                path: file.dest.clone(),
                source: e,
            })?;
        self.fs
            .rename(staging, &file.dest)
            .map_err(|e| GreenskeeperError::Publish {
                path: file.dest.clone(),
                source: e,
            })?;

        tracing::info!(
            source = %file.source.display(),
            dest = %file.dest.display(),
            mode = format_args!("{mode:o}"),
            owner = %file.ownership,
            "file replaced"
        );
        Ok(())
    }

    fn discard_staging(&self, staging: &Path) {
        if let Err(e) = self.fs.remove_file(staging) {
            tracing::warn!(path = %staging.display(), error = %e, "failed to remove staging file");
        }
    }
}

/// Returns `<dest>.tmp`.
#[must_use]
pub fn staging_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(TMP_SUFFIX);
    PathBuf::from(name)
}

#[cfg(unix)]
fn permission_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;

    meta.permissions().mode() & PERMISSION_BITS
}

#[cfg(not(unix))]
fn permission_bits(meta: &Metadata) -> u32 {
    if meta.permissions().readonly() { 0o444 } else { 0o644 }
}
