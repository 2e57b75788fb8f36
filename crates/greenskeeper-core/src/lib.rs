//! # greenskeeper-core
//!
//! Filesystem housekeeping performed by a container-runtime launcher
//! before it starts the daemon:
//! - **Files**: atomic copy-then-rename replacement with source mode and
//!   requested ownership ([`files::FileReplacer`]).
//! - **Directories**: `mkdir -p` with explicit mode and ownership
//!   ([`directory::DirectoryProvisioner`]).
//! - **Pidfiles**: detection and removal of pidfiles left by dead daemons
//!   ([`pidfile::StaleProcessGuard`]).
//!
//! Every mutating system call goes through [`filesystem::Filesystem`] so
//! failures can be injected per step.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod directory;
pub mod files;
pub mod filesystem;
pub mod pidfile;
pub mod process;
pub mod startup;

#[cfg(all(test, unix))]
mod test_support;

pub use directory::DirectoryProvisioner;
pub use files::FileReplacer;
pub use pidfile::{PidfileStatus, StaleProcessGuard};
