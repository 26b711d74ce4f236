//! Configuration for the installer
//!
//! Connection settings mirror what the database client needs to build its
//! URL; engine settings cover the script directory, the implicit baseline
//! version and the two behavior switches (ordering strategy, marker
//! persistence).

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;

use crate::error::{InstallerError, InstallerResult};
use crate::version::VersionOrdering;

/// Database connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Database server host
    pub host: String,
    /// Database (schema) name
    pub database: String,
    /// Username
    pub user: String,
    /// Password
    pub password: String,
    /// Verbose client-side logging; does not change migration semantics
    #[serde(default)]
    pub debug: bool,
}

impl ConnectionConfig {
    /// Build connection settings from a string map, validating that every
    /// required key is present.
    pub fn from_map(map: &HashMap<String, String>) -> InstallerResult<Self> {
        for key in ["host", "database", "user", "password"] {
            if !map.contains_key(key) {
                return Err(InstallerError::configuration(format!(
                    "please provide a valid {}",
                    key
                )));
            }
        }

        let debug = map
            .get("debug")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            host: map["host"].clone(),
            database: map["database"].clone(),
            user: map["user"].clone(),
            password: map["password"].clone(),
            debug,
        })
    }

    /// Connection options for the MySQL driver.
    ///
    /// Built field by field rather than as a URL so credentials containing
    /// URL-reserved characters need no escaping.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Configuration for the migration engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding the migration scripts, marker and log files
    pub sql_dir: PathBuf,
    /// Version assumed when no marker is present
    pub baseline_version: String,
    /// Comparison strategy for version identifiers
    pub version_ordering: VersionOrdering,
    /// Write the target version to the marker after a completed run.
    /// Off by default: persisting the marker is the caller's decision.
    pub persist_version: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sql_dir: PathBuf::from("sql"),
            baseline_version: "0.1.0".to_string(),
            version_ordering: VersionOrdering::Lexicographic,
            persist_version: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> HashMap<String, String> {
        [
            ("host", "localhost"),
            ("database", "app"),
            ("user", "root"),
            ("password", "secret"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_from_map_complete() {
        let config = ConnectionConfig::from_map(&full_map()).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.database, "app");
        assert!(!config.debug);

        let options = config.connect_options();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_username(), "root");
        assert_eq!(options.get_database(), Some("app"));
    }

    #[test]
    fn test_connect_options_with_reserved_characters() {
        // Passwords with URL-reserved characters must not bleed into the
        // host or database fields.
        let mut map = full_map();
        map.insert("password".to_string(), "p/ss#1:x@y?z".to_string());
        let config = ConnectionConfig::from_map(&map).unwrap();
        assert_eq!(config.password, "p/ss#1:x@y?z");

        let options = config.connect_options();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_username(), "root");
        assert_eq!(options.get_database(), Some("app"));
    }

    #[test]
    fn test_from_map_missing_key() {
        for key in ["host", "database", "user", "password"] {
            let mut map = full_map();
            map.remove(key);
            let err = ConnectionConfig::from_map(&map).unwrap_err();
            match err {
                InstallerError::Configuration { message } => {
                    assert!(message.contains(key), "message should name '{}'", key)
                }
                other => panic!("expected configuration error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_from_map_debug_flag() {
        let mut map = full_map();
        map.insert("debug".to_string(), "1".to_string());
        assert!(ConnectionConfig::from_map(&map).unwrap().debug);

        map.insert("debug".to_string(), "true".to_string());
        assert!(ConnectionConfig::from_map(&map).unwrap().debug);

        map.insert("debug".to_string(), "0".to_string());
        assert!(!ConnectionConfig::from_map(&map).unwrap().debug);
    }

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.sql_dir, PathBuf::from("sql"));
        assert_eq!(config.baseline_version, "0.1.0");
        assert_eq!(config.version_ordering, VersionOrdering::Lexicographic);
        assert!(!config.persist_version);
    }
}
