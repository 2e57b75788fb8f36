//! Domain primitive types used across the greenskeeper workspace.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Requested owner of a file or directory.
///
/// `None` means "leave as is". An ownership change happens only when a
/// group is set; the user id travels with it when present, otherwise the
/// kernel keeps the current owner and only the group changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ownership {
    /// Target user id.
    #[serde(default)]
    pub uid: Option<u32>,
    /// Target group id.
    #[serde(default)]
    pub gid: Option<u32>,
}

impl Ownership {
    /// Ownership that leaves both user and group untouched.
    pub const UNCHANGED: Self = Self {
        uid: None,
        gid: None,
    };

    /// Creates an ownership request for an explicit user and group.
    #[must_use]
    pub const fn new(uid: u32, gid: u32) -> Self {
        Self {
            uid: Some(uid),
            gid: Some(gid),
        }
    }

    /// Builds an ownership request from the launcher's signed ids, where
    /// any negative value means "do not change".
    #[must_use]
    pub fn from_raw(uid: i64, gid: i64) -> Self {
        Self {
            uid: u32::try_from(uid).ok(),
            gid: u32::try_from(gid).ok(),
        }
    }

    /// Returns the `(uid, gid)` pair to hand to `chown(2)`, or `None` when
    /// no group is set and ownership must not be touched.
    #[must_use]
    pub const fn chown_target(&self) -> Option<(Option<u32>, u32)> {
        match self.gid {
            Some(gid) => Some((self.uid, gid)),
            None => None,
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn id(v: Option<u32>) -> String {
            v.map_or_else(|| "-".to_string(), |v| v.to_string())
        }
        write!(f, "{}:{}", id(self.uid), id(self.gid))
    }
}

/// One file to copy into place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSpec {
    /// File to copy from.
    pub source: PathBuf,
    /// Final location of the copy.
    pub dest: PathBuf,
    /// Owner applied to the copy before it is published.
    #[serde(flatten)]
    pub ownership: Ownership,
}

impl FileSpec {
    /// Creates a file spec that leaves ownership untouched.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            ownership: Ownership::UNCHANGED,
        }
    }

    /// Returns a copy of this spec with the given ownership.
    #[must_use]
    pub const fn with_ownership(mut self, ownership: Ownership) -> Self {
        self.ownership = ownership;
        self
    }
}

/// A directory to provision. Construct with [`DirectorySpec::builder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySpec {
    path: PathBuf,
    #[serde(default)]
    mode: Option<u32>,
    #[serde(flatten)]
    ownership: Ownership,
}

impl DirectorySpec {
    /// Starts a builder for `path` with no mode and unchanged ownership.
    #[must_use]
    pub fn builder(path: impl Into<PathBuf>) -> DirectorySpecBuilder {
        DirectorySpecBuilder {
            spec: Self {
                path: path.into(),
                mode: None,
                ownership: Ownership::UNCHANGED,
            },
        }
    }

    /// Directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Explicit mode, if one was configured.
    #[must_use]
    pub const fn mode(&self) -> Option<u32> {
        self.mode
    }

    /// Requested ownership.
    #[must_use]
    pub const fn ownership(&self) -> Ownership {
        self.ownership
    }
}

/// Fluent builder for [`DirectorySpec`]. Each setter consumes the builder
/// and returns the updated one.
#[derive(Debug, Clone)]
#[must_use]
pub struct DirectorySpecBuilder {
    spec: DirectorySpec,
}

impl DirectorySpecBuilder {
    /// Sets the mode applied after creation, overriding the umask.
    pub const fn mode(mut self, mode: u32) -> Self {
        self.spec.mode = Some(mode);
        self
    }

    /// Sets the owning user.
    pub const fn uid(mut self, uid: u32) -> Self {
        self.spec.ownership.uid = Some(uid);
        self
    }

    /// Sets the owning group. Ownership is only changed when this is set.
    pub const fn gid(mut self, gid: u32) -> Self {
        self.spec.ownership.gid = Some(gid);
        self
    }

    /// Sets both ids at once, e.g. from [`Ownership::from_raw`].
    pub const fn ownership(mut self, ownership: Ownership) -> Self {
        self.spec.ownership = ownership;
        self
    }

    /// Finishes the spec.
    #[must_use]
    pub fn build(self) -> DirectorySpec {
        self.spec
    }
}
