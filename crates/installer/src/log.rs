//! Failure log - append-only sink for execution errors
//!
//! Records are opaque messages with no structured fields. The engine treats
//! appends as best-effort: a log write failure never aborts a run, but
//! `append` itself surfaces IO errors so direct callers can see them.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::InstallerResult;

/// Name of the log file inside the SQL directory
pub const LOG_FILE: &str = "installer.log";

/// Append-only sink for execution failure messages
pub trait FailureLog {
    fn append(&self, message: &str) -> InstallerResult<()>;
}

/// Log backed by a plain-text file, created on first append
pub struct FileFailureLog {
    path: PathBuf,
}

impl FileFailureLog {
    /// Log file at the conventional name inside `sql_dir`.
    pub fn new(sql_dir: &Path) -> Self {
        Self {
            path: sql_dir.join(LOG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FailureLog for FileFailureLog {
    fn append(&self, message: &str) -> InstallerResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", message)?;
        Ok(())
    }
}

/// In-memory log for tests and embedders
#[derive(Default)]
pub struct MemoryFailureLog {
    messages: Mutex<Vec<String>>,
}

impl MemoryFailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl FailureLog for MemoryFailureLog {
    fn append(&self, message: &str) -> InstallerResult<()> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}
