//! Version marker storage and version ordering
//!
//! The marker is a single significant line of text recording the last-known
//! current version. Its absence means "no migrations applied yet" and is
//! resolved to the baseline version at the engine boundary; an unreadable
//! marker that does exist is an IO error, not a silent reset to baseline.

use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::InstallerResult;

/// Name of the marker file inside the SQL directory
pub const VERSION_FILE: &str = "version.txt";

/// Persisted state of the current-version marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionMarker {
    /// A marker exists with this version identifier
    Present(String),
    /// No marker has ever been written
    Absent,
}

impl VersionMarker {
    /// Resolve the marker to a concrete version, falling back to the
    /// baseline when absent.
    pub fn resolve(self, baseline: &str) -> String {
        match self {
            VersionMarker::Present(version) => version,
            VersionMarker::Absent => baseline.to_string(),
        }
    }
}

/// Comparison strategy for version identifiers.
///
/// The default is plain string comparison: `"10.0.0"` sorts *before*
/// `"2.0.0"`. Migration authors relying on the default must choose version
/// strings that order correctly under it (zero-padded segments). The
/// numeric strategy compares dotted segments as integers where possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionOrdering {
    /// Literal string relational order
    #[default]
    Lexicographic,
    /// Dot-separated segments compared numerically, non-numeric segments as strings
    NumericSegments,
}

impl VersionOrdering {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            VersionOrdering::Lexicographic => a.cmp(b),
            VersionOrdering::NumericSegments => {
                let mut left = a.split('.');
                let mut right = b.split('.');
                loop {
                    match (left.next(), right.next()) {
                        (None, None) => return Ordering::Equal,
                        (None, Some(_)) => return Ordering::Less,
                        (Some(_), None) => return Ordering::Greater,
                        (Some(x), Some(y)) => {
                            let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                                (Ok(nx), Ok(ny)) => nx.cmp(&ny),
                                _ => x.cmp(y),
                            };
                            if ord != Ordering::Equal {
                                return ord;
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Reads and writes the current-version marker
pub trait VersionStore {
    /// Read the marker. Absence of the backing resource is not an error.
    fn read(&self) -> InstallerResult<VersionMarker>;

    /// Overwrite the marker so later reads observe `version`.
    fn write(&self, version: &str) -> InstallerResult<()>;
}

/// Marker stored as a plain-text file; only the first non-empty line is
/// significant.
pub struct FileVersionStore {
    path: PathBuf,
}

impl FileVersionStore {
    /// Marker file at the conventional name inside `sql_dir`.
    pub fn new(sql_dir: &Path) -> Self {
        Self {
            path: sql_dir.join(VERSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VersionStore for FileVersionStore {
    fn read(&self) -> InstallerResult<VersionMarker> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(VersionMarker::Absent),
            Err(e) => return Err(e.into()),
        };

        // First line that survives splitting on newline/carriage-return
        match contents
            .split(['\n', '\r'])
            .find(|line| !line.is_empty())
        {
            Some(line) => Ok(VersionMarker::Present(line.to_string())),
            None => Ok(VersionMarker::Absent),
        }
    }

    fn write(&self, version: &str) -> InstallerResult<()> {
        fs::write(&self.path, version)?;
        Ok(())
    }
}

/// In-memory marker for tests and embedders
#[derive(Default)]
pub struct MemoryVersionStore {
    marker: std::sync::Mutex<Option<String>>,
}

impl MemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VersionStore for MemoryVersionStore {
    fn read(&self) -> InstallerResult<VersionMarker> {
        Ok(match self.marker.lock().unwrap().clone() {
            Some(version) => VersionMarker::Present(version),
            None => VersionMarker::Absent,
        })
    }

    fn write(&self, version: &str) -> InstallerResult<()> {
        *self.marker.lock().unwrap() = Some(version.to_string());
        Ok(())
    }
}
