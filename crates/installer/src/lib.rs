//! # schemup: stepwise SQL schema installer
//!
//! Applies an ordered set of incremental `.sql` scripts to a MySQL database,
//! tracking the last-applied version in a plain-text marker so repeated runs
//! are safe. The engine selects the pending set between the current and
//! target versions, executes each script statement by statement, and records
//! execution failures to an append-only log without aborting the run.
//!
//! The collaborators (version store, script catalog, failure log, database
//! client) are traits, so embedders and tests can substitute in-memory
//! implementations; [`Installer`] wires the file- and MySQL-backed
//! production versions together.

pub mod catalog;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod installer;
pub mod log;
pub mod splitter;
pub mod version;

// Re-export core traits and types
pub use catalog::{DirectoryCatalog, MigrationCatalog, MigrationUnit};
pub use client::{DatabaseClient, SqlxClient};
pub use config::{ConnectionConfig, EngineConfig};
pub use engine::{ApplyOutcome, MigrationEngine, StatementFailure};
pub use error::{InstallerError, InstallerResult};
pub use installer::Installer;
pub use log::{FailureLog, FileFailureLog, MemoryFailureLog};
pub use version::{
    FileVersionStore, MemoryVersionStore, VersionMarker, VersionOrdering, VersionStore,
};
