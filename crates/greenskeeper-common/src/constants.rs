//! System-wide constants and default paths.

/// Application name used in log output.
pub const APP_NAME: &str = "greenskeeper";

/// Mode used when creating directories (`rwx-----x`).
///
/// The process umask is applied on top of it by the kernel.
pub const DEFAULT_DIRECTORY_MODE: u32 = 0o701;

/// Suffix appended to a destination path to form its staging file.
pub const TMP_SUFFIX: &str = ".tmp";

/// Mount point of the kernel's process-information pseudo-filesystem.
pub const PROC_ROOT: &str = "/proc";

/// Permission bits (including setuid, setgid and sticky) carried across a copy.
pub const PERMISSION_BITS: u32 = 0o7777;

/// Line printed when a pidfile left behind by a dead process is removed.
pub const STALE_PIDFILE_NOTICE: &str = "Removing stale pidfile...";
