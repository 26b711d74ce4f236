//! Installer facade - production wiring of the engine
//!
//! Binds the file-backed version store, directory catalog and failure log to
//! one SQL directory, and pairs them with a database client. Connection
//! settings are validated and the connection is established up front, so a
//! constructed installer always has a live client behind it.

use std::path::{Path, PathBuf};

use crate::catalog::{DirectoryCatalog, MigrationUnit};
use crate::client::{DatabaseClient, SqlxClient};
use crate::config::{ConnectionConfig, EngineConfig};
use crate::engine::{ApplyOutcome, MigrationEngine};
use crate::error::InstallerResult;
use crate::log::FileFailureLog;
use crate::version::FileVersionStore;

/// Schema installer bound to one SQL directory and one database
pub struct Installer<D = SqlxClient> {
    engine: MigrationEngine<FileVersionStore, DirectoryCatalog, FileFailureLog, D>,
    sql_dir: PathBuf,
}

impl Installer<SqlxClient> {
    /// Connect to the database and bind the installer to the configured SQL
    /// directory. Fails immediately on bad settings or an unreachable
    /// database.
    pub async fn connect(
        connection: &ConnectionConfig,
        config: EngineConfig,
    ) -> InstallerResult<Self> {
        let client = SqlxClient::connect(connection).await?;
        Ok(Self::with_client(client, config))
    }
}

impl<D: DatabaseClient> Installer<D> {
    /// Bind the file-backed stores to the configured SQL directory around an
    /// already-constructed client.
    pub fn with_client(client: D, config: EngineConfig) -> Self {
        let sql_dir = config.sql_dir.clone();
        let engine = MigrationEngine::new(
            FileVersionStore::new(&sql_dir),
            DirectoryCatalog::new(&sql_dir),
            FileFailureLog::new(&sql_dir),
            client,
            config,
        );
        Self { engine, sql_dir }
    }

    /// Directory holding the migration scripts, marker and log files.
    pub fn sql_directory(&self) -> &Path {
        &self.sql_dir
    }

    /// Version the database is currently at, per the marker file.
    pub fn current_version(&self) -> InstallerResult<String> {
        self.engine.current_version()
    }

    /// Units that `apply(target)` would attempt, in application order.
    pub fn pending(&self, target: &str) -> InstallerResult<Vec<MigrationUnit>> {
        self.engine.pending(target)
    }

    /// Apply every pending unit up to and including `target`.
    pub async fn apply(&self, target: &str) -> InstallerResult<ApplyOutcome> {
        self.engine.apply(target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstallerError;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingClient {
        executed: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl DatabaseClient for RecordingClient {
        async fn execute(&self, statement: &str) -> InstallerResult<()> {
            self.executed.lock().unwrap().push(statement.to_string());
            if self.fail_on.as_deref() == Some(statement) {
                return Err(InstallerError::statement("table already exists"));
            }
            Ok(())
        }
    }

    fn installer(temp_dir: &TempDir, client: RecordingClient) -> Installer<RecordingClient> {
        let config = EngineConfig {
            sql_dir: temp_dir.path().to_path_buf(),
            ..EngineConfig::default()
        };
        Installer::with_client(client, config)
    }

    #[tokio::test]
    async fn test_end_to_end_against_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("version.txt"), "0.1.0\n").unwrap();
        fs::write(
            temp_dir.path().join("0.2.0.sql"),
            "CREATE TABLE users (id INT);CREATE TABLE posts (id INT)",
        )
        .unwrap();
        fs::write(temp_dir.path().join("0.3.0.sql"), "DROP TABLE posts").unwrap();

        let installer = installer(&temp_dir, RecordingClient::default());
        assert_eq!(installer.sql_directory(), temp_dir.path());
        assert_eq!(installer.current_version().unwrap(), "0.1.0");

        let outcome = installer.apply("0.3.0").await.unwrap();
        assert_eq!(outcome.attempted, vec!["0.2.0", "0.3.0"]);
        assert_eq!(outcome.statements_executed, 3);
        assert!(outcome.is_clean());

        // Marker untouched: persistence is the caller's call
        let marker = fs::read_to_string(temp_dir.path().join("version.txt")).unwrap();
        assert_eq!(marker, "0.1.0\n");
    }

    #[tokio::test]
    async fn test_statement_failure_lands_in_the_log_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("0.2.0.sql"),
            "CREATE TABLE a (id INT);CREATE TABLE a (id INT)",
        )
        .unwrap();

        let client = RecordingClient {
            executed: Mutex::new(Vec::new()),
            fail_on: Some("CREATE TABLE a (id INT)".to_string()),
        };
        let installer = installer(&temp_dir, client);

        let outcome = installer.apply("0.2.0").await.unwrap();
        assert_eq!(outcome.failures.len(), 2);

        let log = fs::read_to_string(temp_dir.path().join("installer.log")).unwrap();
        assert_eq!(log.lines().count(), 2);
        assert!(log.contains("table already exists"));
    }

    #[tokio::test]
    async fn test_no_marker_resolves_to_baseline() {
        let temp_dir = TempDir::new().unwrap();
        let installer = installer(&temp_dir, RecordingClient::default());
        assert_eq!(installer.current_version().unwrap(), "0.1.0");
    }
}
