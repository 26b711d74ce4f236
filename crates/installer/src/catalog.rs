//! Migration catalog - discovery of available migration scripts
//!
//! The production catalog enumerates a directory of `.sql` files whose names
//! are version identifiers. The marker and log files live in the same
//! directory and are excluded from enumeration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::InstallerResult;
use crate::log::LOG_FILE;
use crate::version::VERSION_FILE;

/// One named script of schema-change statements tied to one version
/// identifier. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationUnit {
    /// Version identifier, taken from the script's file name
    pub version: String,
    /// Raw script body
    pub script: String,
}

/// Enumerates every available migration unit from the backing store.
///
/// The order in which units are returned is the order the engine applies
/// them in; implementations define it.
pub trait MigrationCatalog {
    fn all_units(&self) -> InstallerResult<Vec<MigrationUnit>>;
}

/// Catalog backed by a directory of `<version>.sql` files.
///
/// Enumeration order is lexicographic by file name, which under the default
/// version ordering coincides with version order.
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn is_reserved(name: &str) -> bool {
        name == VERSION_FILE || name == LOG_FILE
    }
}

impl MigrationCatalog for DirectoryCatalog {
    fn all_units(&self) -> InstallerResult<Vec<MigrationUnit>> {
        // An unreadable or missing directory is an error: callers must not
        // mistake a broken store for "no pending migrations".
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if Self::is_reserved(&name) {
                continue;
            }
            if entry.path().extension().map_or(false, |ext| ext == "sql") {
                names.push(name);
            }
        }
        names.sort();

        let mut units = Vec::with_capacity(names.len());
        for name in names {
            let version = name.strip_suffix(".sql").unwrap_or(&name).to_string();
            let script = fs::read_to_string(self.dir.join(&name))?;
            units.push(MigrationUnit { version, script });
        }

        Ok(units)
    }
}
