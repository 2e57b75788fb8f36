//! Directory provisioning with explicit mode and ownership.
//!
//! Directories are always created with [`DEFAULT_DIRECTORY_MODE`], so the
//! resulting bits are `0701 & !umask` unless the spec carries an explicit
//! mode, which is applied with `chmod(2)` afterwards and ignores the umask.

use greenskeeper_common::constants::DEFAULT_DIRECTORY_MODE;
use greenskeeper_common::error::{GreenskeeperError, Result};
use greenskeeper_common::types::DirectorySpec;

use crate::filesystem::{Filesystem, HostFilesystem};

/// Creates directories described by [`DirectorySpec`]s.
#[derive(Debug, Clone, Default)]
pub struct DirectoryProvisioner<F = HostFilesystem> {
    fs: F,
}

impl DirectoryProvisioner {
    /// Creates a provisioner that talks to the host filesystem.
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: HostFilesystem }
    }
}

impl<F: Filesystem> DirectoryProvisioner<F> {
    /// Creates a provisioner over a custom [`Filesystem`].
    #[must_use]
    pub const fn with_filesystem(fs: F) -> Self {
        Self { fs }
    }

    /// Provisions every directory in order, stopping at the first failure.
    /// Directories created before the failure are kept.
    ///
    /// # Errors
    ///
    /// Returns the error of the first directory that could not be provisioned.
    pub fn provision_all(&self, specs: &[DirectorySpec]) -> Result<()> {
        for spec in specs {
            self.provision(spec)?;
        }
        Ok(())
    }

    /// Creates the directory and its parents, then applies mode and owner.
    ///
    /// # Errors
    ///
    /// - [`GreenskeeperError::DirectoryCreate`] if `mkdir -p` fails.
    /// - [`GreenskeeperError::PermissionChange`] if the explicit mode cannot be set.
    /// - [`GreenskeeperError::OwnershipChange`] if the owner cannot be set.
    pub fn provision(&self, spec: &DirectorySpec) -> Result<()> {
        let path = spec.path();

        self.fs
            .create_dir_all(path, DEFAULT_DIRECTORY_MODE)
            .map_err(|e| GreenskeeperError::DirectoryCreate {
                path: path.to_path_buf(),
                source: e,
            })?;

        if let Some(mode) = spec.mode() {
            self.fs
                .set_mode(path, mode)
                .map_err(|e| GreenskeeperError::PermissionChange {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }

        if let Some((uid, gid)) = spec.ownership().chown_target() {
            self.fs
                .set_owner(path, uid, gid)
                .map_err(|e| GreenskeeperError::OwnershipChange {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }

        tracing::info!(
            path = %path.display(),
            mode = ?spec.mode().map(|m| format!("{m:o}")),
            owner = %spec.ownership(),
            "directory provisioned"
        );
        Ok(())
    }
}
