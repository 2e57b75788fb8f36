//! Launcher preparation sequence.
//!
//! Runs the three helpers in the order a launcher needs them: the pidfile
//! check first, then directories, then files (which may land inside those
//! directories). The first error aborts the sequence.

use greenskeeper_common::config::LauncherConfig;
use greenskeeper_common::error::Result;

use crate::directory::DirectoryProvisioner;
use crate::files::FileReplacer;
use crate::pidfile::StaleProcessGuard;

/// Prepares the host for a daemon start as described by `config`.
///
/// # Errors
///
/// Returns the first error raised by the pidfile check, directory
/// provisioning, or file replacement. Work done before the error is kept.
pub fn prepare(config: &LauncherConfig) -> Result<()> {
    tracing::info!(
        app = greenskeeper_common::constants::APP_NAME,
        directories = config.directories.len(),
        files = config.files.len(),
        "preparing launcher"
    );

    if let Some(pidfile) = &config.pidfile {
        let status = StaleProcessGuard::new().check_and_clear(pidfile)?;
        tracing::debug!(path = %pidfile.display(), ?status, "pidfile checked");
    }

    DirectoryProvisioner::new().provision_all(&config.directories)?;
    FileReplacer::new().replace(&config.files)?;

    tracing::info!("launcher prepared");
    Ok(())
}
