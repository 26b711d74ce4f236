mod commands;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use schemup::{ConnectionConfig, EngineConfig, Installer, VersionOrdering};

#[derive(Parser)]
#[command(name = "schemup")]
#[command(about = "Version-tracked SQL schema installer")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Directory holding the migration scripts, version marker and log
    #[arg(long, default_value = "sql")]
    sql_dir: PathBuf,

    /// Compare versions by numeric dotted segments instead of plain strings
    #[arg(long)]
    numeric_order: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Database connection settings: either a TOML config file or the full set
/// of flags.
#[derive(Args)]
struct ConnectionArgs {
    /// TOML file with host/database/user/password (and optional debug)
    #[arg(long, conflicts_with_all = ["host", "database", "user", "password"])]
    config: Option<PathBuf>,

    /// Database server host
    #[arg(long)]
    host: Option<String>,

    /// Database name
    #[arg(long)]
    database: Option<String>,

    /// Username
    #[arg(long)]
    user: Option<String>,

    /// Password
    #[arg(long)]
    password: Option<String>,

    /// Verbose statement logging
    #[arg(long)]
    debug: bool,
}

impl ConnectionArgs {
    fn resolve(&self) -> anyhow::Result<ConnectionConfig> {
        if let Some(path) = &self.config {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut config: ConnectionConfig =
                toml::from_str(&contents).context("invalid connection config")?;
            config.debug |= self.debug;
            return Ok(config);
        }

        match (&self.host, &self.database, &self.user, &self.password) {
            (Some(host), Some(database), Some(user), Some(password)) => Ok(ConnectionConfig {
                host: host.clone(),
                database: database.clone(),
                user: user.clone(),
                password: password.clone(),
                debug: self.debug,
            }),
            _ => bail!("provide --config or all of --host, --database, --user, --password"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations up to a target version
    Apply {
        /// Target version
        #[arg(long)]
        to: String,

        /// Write the target version to the marker after the run
        #[arg(long)]
        persist: bool,
    },

    /// Print the version the database is currently at
    Current,

    /// List the pending set for a target version without executing it
    Status {
        /// Target version
        #[arg(long)]
        to: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let connection = cli.connection.resolve()?;

    let default_filter = if connection.debug {
        "schemup=debug"
    } else {
        "schemup=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = EngineConfig {
        sql_dir: cli.sql_dir,
        ..EngineConfig::default()
    };
    if cli.numeric_order {
        config.version_ordering = VersionOrdering::NumericSegments;
    }
    if let Commands::Apply { persist: true, .. } = cli.command {
        config.persist_version = true;
    }

    let installer = Installer::connect(&connection, config).await?;

    match cli.command {
        Commands::Apply { to, .. } => commands::apply(&installer, &to).await?,
        Commands::Current => commands::current(&installer)?,
        Commands::Status { to } => commands::status(&installer, &to)?,
    }

    Ok(())
}
