//! Migration engine - selects and applies the pending set
//!
//! The engine is stateless across calls: each `apply` is a function of the
//! current marker, the catalog contents and the target version, plus the
//! side effects of statement execution and failure logging.
//!
//! Statement failures never abort a run. They are appended to the failure
//! log and collected into the returned [`ApplyOutcome`], and the run
//! proceeds with the next statement. `Ok` from `apply` therefore means "the
//! full pending set was attempted", not "every statement succeeded" -
//! callers that need the distinction must inspect the outcome.

use std::cmp::Ordering;

use crate::catalog::{MigrationCatalog, MigrationUnit};
use crate::client::DatabaseClient;
use crate::config::EngineConfig;
use crate::error::InstallerResult;
use crate::log::FailureLog;
use crate::splitter;
use crate::version::VersionStore;

/// One recovered statement failure, correlated to its unit and position
#[derive(Debug, Clone)]
pub struct StatementFailure {
    /// Version of the unit the statement belongs to
    pub version: String,
    /// Zero-based position of the statement within its unit
    pub index: usize,
    /// Driver error message
    pub message: String,
}

/// Result of an `apply` run
#[derive(Debug, Default)]
pub struct ApplyOutcome {
    /// Versions of the units selected and attempted, in application order
    pub attempted: Vec<String>,
    /// Number of statements that executed successfully
    pub statements_executed: usize,
    /// Statement failures recovered during the run
    pub failures: Vec<StatementFailure>,
}

impl ApplyOutcome {
    /// True when every attempted statement succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Orchestrates version resolution, unit selection and statement execution
pub struct MigrationEngine<V, C, L, D> {
    versions: V,
    catalog: C,
    log: L,
    client: D,
    config: EngineConfig,
}

impl<V, C, L, D> MigrationEngine<V, C, L, D>
where
    V: VersionStore,
    C: MigrationCatalog,
    L: FailureLog,
    D: DatabaseClient,
{
    pub fn new(versions: V, catalog: C, log: L, client: D, config: EngineConfig) -> Self {
        Self {
            versions,
            catalog,
            log,
            client,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current version, with an absent marker resolved to the baseline.
    pub fn current_version(&self) -> InstallerResult<String> {
        Ok(self
            .versions
            .read()?
            .resolve(&self.config.baseline_version))
    }

    /// Units that `apply(target)` would attempt, in application order.
    pub fn pending(&self, target: &str) -> InstallerResult<Vec<MigrationUnit>> {
        let current = self.current_version()?;
        if target == current {
            return Ok(Vec::new());
        }

        let units = self.catalog.all_units()?;
        Ok(units
            .into_iter()
            .filter(|unit| self.selects(&unit.version, &current, target))
            .collect())
    }

    /// Apply every pending unit up to and including `target`.
    ///
    /// Units are applied in catalog enumeration order; the engine never
    /// re-sorts them. The marker is only written back when
    /// `persist_version` is configured.
    pub async fn apply(&self, target: &str) -> InstallerResult<ApplyOutcome> {
        let current = self.current_version()?;
        let mut outcome = ApplyOutcome::default();

        // String equality, independent of the ordering strategy
        if target == current {
            tracing::debug!(version = %current, "already at target version");
            return Ok(outcome);
        }

        let units = self.catalog.all_units()?;
        for unit in &units {
            if !self.selects(&unit.version, &current, target) {
                continue;
            }

            tracing::debug!(version = %unit.version, "applying migration");
            outcome.attempted.push(unit.version.clone());

            for (index, statement) in splitter::split(&unit.script).iter().enumerate() {
                match self.client.execute(statement).await {
                    Ok(()) => outcome.statements_executed += 1,
                    Err(e) => {
                        let message = e.to_string();
                        // Best effort: a log write failure must not stop the run
                        if let Err(log_err) = self.log.append(&message) {
                            tracing::warn!(error = %log_err, "failed to append to failure log");
                        }
                        outcome.failures.push(StatementFailure {
                            version: unit.version.clone(),
                            index,
                            message,
                        });
                    }
                }
            }
        }

        if self.config.persist_version {
            self.versions.write(target)?;
        }

        Ok(outcome)
    }

    fn selects(&self, version: &str, current: &str, target: &str) -> bool {
        let ordering = self.config.version_ordering;
        ordering.compare(version, current) == Ordering::Greater
            && ordering.compare(version, target) != Ordering::Greater
    }
}
