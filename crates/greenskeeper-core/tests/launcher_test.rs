//! End-to-end tests for the launcher preparation helpers.
//!
//! These tests run against the real filesystem and process table:
//! 1. Full `prepare` sequence from a JSON configuration
//! 2. Abort on a live pidfile before anything is touched
//! 3. Replacing a running executable
//! 4. Ownership left alone when no group is requested

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::print_stderr)]

use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::Path;
use std::process::{Child, Command};

use greenskeeper_common::config::LauncherConfig;
use greenskeeper_common::error::GreenskeeperError;
use greenskeeper_common::types::{DirectorySpec, FileSpec, Ownership};
use greenskeeper_core::FileReplacer;
use greenskeeper_core::startup::prepare;

fn perm(path: &Path) -> u32 {
    std::fs::metadata(path).expect("stat").permissions().mode() & 0o7777
}

fn current_ownership() -> Ownership {
    Ownership::new(
        nix::unistd::geteuid().as_raw(),
        nix::unistd::getegid().as_raw(),
    )
}

struct Reaped(Child);

impl Drop for Reaped {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

// ── Startup sequence ─────────────────────────────────────────────────

#[test]
fn prepare_runs_pidfile_directories_and_files_in_order() {
    let root = tempfile::tempdir().expect("tempdir");
    let source = root.path().join("runc");
    std::fs::write(&source, "#!/bin/sh\necho runc\n").expect("write source");
    std::fs::set_permissions(&source, std::fs::Permissions::from_mode(0o755)).expect("chmod");

    let pidfile = root.path().join("garden.pid");
    std::fs::write(&pidfile, "999999999\n").expect("write pidfile");

    let bin_dir = root.path().join("data/bin");
    let dest = bin_dir.join("runc");
    let config = LauncherConfig {
        pidfile: Some(pidfile.clone()),
        directories: vec![DirectorySpec::builder(&bin_dir).mode(0o750).build()],
        files: vec![FileSpec::new(&source, &dest).with_ownership(current_ownership())],
    };

    prepare(&config).expect("prepare");

    assert!(!pidfile.exists());
    assert_eq!(perm(&bin_dir), 0o750);
    assert_eq!(
        std::fs::read(&dest).expect("read"),
        std::fs::read(&source).expect("read")
    );
    assert_eq!(perm(&dest), 0o755);
}

#[test]
fn prepare_from_json_file() {
    let root = tempfile::tempdir().expect("tempdir");
    let source = root.path().join("kitten");
    std::fs::write(&source, "i am very fluffy").expect("write source");
    let target_dir = root.path().join("depot");
    let config_path = root.path().join("launcher.json");
    let config = serde_json::json!({
        "directories": [{ "path": target_dir, "mode": 0o700 }],
        "files": [{ "source": source, "dest": target_dir.join("kitten") }],
    });
    std::fs::write(&config_path, config.to_string()).expect("write config");

    let config = LauncherConfig::from_json_file(&config_path).expect("load");
    prepare(&config).expect("prepare");

    assert_eq!(perm(&target_dir), 0o700);
    assert_eq!(
        std::fs::read_to_string(target_dir.join("kitten")).expect("read"),
        "i am very fluffy"
    );
}

#[cfg(target_os = "linux")]
#[test]
fn prepare_aborts_on_live_pidfile_before_touching_anything() {
    let root = tempfile::tempdir().expect("tempdir");
    let pidfile = root.path().join("garden.pid");
    std::fs::write(&pidfile, format!("{}\n", std::process::id())).expect("write pidfile");
    let depot = root.path().join("depot");

    let config = LauncherConfig {
        pidfile: Some(pidfile.clone()),
        directories: vec![DirectorySpec::builder(&depot).build()],
        files: Vec::new(),
    };

    let err = prepare(&config).expect_err("should abort");
    assert!(matches!(err, GreenskeeperError::ProcessStillRunning { .. }));
    assert!(pidfile.exists());
    assert!(!depot.exists());
}

// ── File replacement ─────────────────────────────────────────────────

#[test]
fn replacing_a_running_executable_succeeds() {
    let Some(sleep) = ["/bin/sleep", "/usr/bin/sleep"]
        .into_iter()
        .map(Path::new)
        .find(|p| p.exists())
    else {
        eprintln!("skipped replacing_a_running_executable_succeeds: no sleep binary on this host");
        return;
    };
    let root = tempfile::tempdir().expect("tempdir");
    let exe = root.path().join("sleepy");
    FileReplacer::new()
        .replace(&[FileSpec::new(sleep, &exe)])
        .expect("install executable");

    // Hosts that mount the temp dir noexec cannot run the copy.
    let child = match Command::new(&exe).arg("60").spawn() {
        Ok(child) => child,
        Err(e) => {
            eprintln!(
                "skipped replacing_a_running_executable_succeeds: cannot run {}: {e}",
                exe.display()
            );
            return;
        }
    };
    let _running = Reaped(child);

    FileReplacer::new()
        .replace(&[FileSpec::new(sleep, &exe).with_ownership(current_ownership())])
        .expect("replace running executable");
    assert!(exe.is_file());
}

#[test]
fn ownership_untouched_without_group() {
    let root = tempfile::tempdir().expect("tempdir");
    let source = root.path().join("kitten");
    std::fs::write(&source, "i am very fluffy").expect("write source");
    let dest = root.path().join("copy");

    FileReplacer::new()
        .replace(&[FileSpec::new(&source, &dest).with_ownership(Ownership::from_raw(-1, -1))])
        .expect("replace");

    let meta = std::fs::metadata(&dest).expect("stat");
    assert_eq!(meta.uid(), nix::unistd::geteuid().as_raw());
}
