#![forbid(unsafe_code)]

//! Strategy planner command line.
//!
//! Every command prints one JSON document on stdout. Failures print an
//! `{"error": {code, message, class}}` envelope instead and exit with 2 for
//! caller errors or 1 for store errors. Logs go to stderr.

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use sp_core::ActorId;
use sp_core::envelope::CreatedEnvelope;
use sp_core::model::HealthStatus;
use sp_storage::{
    AddObjectiveRequest, AddThemeRequest, ChildFetch, CreateStrategyRequest, HierarchyAssembler,
    ImpactResolver, SqliteStore, StoreConfig, StrategyCatalog, WriteCoordinator,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt};

mod error;

use error::CliError;

/// Strategy planner: strategy versions, their theme/objective hierarchy and
/// assumption impacts.
#[derive(Debug, Parser)]
#[command(name = "strategy-planner", version)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the database (overrides SP_STORAGE_DIR)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Database file name inside the storage directory (overrides SP_DB_FILE)
    #[arg(long, global = true)]
    db_file: Option<String>,

    /// SQLite busy timeout (overrides SP_BUSY_TIMEOUT_MS)
    #[arg(long, global = true)]
    busy_timeout_ms: Option<u64>,

    /// Child loading strategy: per_parent or batched (overrides SP_CHILD_FETCH)
    #[arg(long, global = true)]
    child_fetch: Option<ChildFetch>,

    /// Actor recorded as owner of created rows
    #[arg(long, env = "SP_ACTOR", global = true)]
    actor: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the store is reachable
    Health,
    /// List strategy versions, newest first
    Strategies,
    /// Themes with their objectives for a strategy version
    Canvas { strategy_id: String },
    /// Themes, objectives and linked initiatives for a strategy version
    DeepDive { strategy_id: String },
    /// Entities an assumption impacts, with resolved names
    Impact { assumption_id: String },
    /// Create a draft strategy version
    CreateStrategy { name: String },
    /// Add a theme to a strategy version
    AddTheme {
        strategy_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        weighting: Option<f64>,
        /// green, amber or red
        #[arg(long, value_parser = parse_health)]
        health: Option<HealthStatus>,
    },
    /// Add an objective to a theme
    AddObjective {
        theme_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        statement: String,
    },
}

impl Cli {
    fn store_config(&self) -> Result<StoreConfig, CliError> {
        let mut config = StoreConfig::from_env()?;
        if let Some(dir) = &self.storage_dir {
            config.storage_dir = dir.clone();
        }
        if let Some(db_file) = &self.db_file {
            config = config.with_db_file(db_file.clone())?;
        }
        if let Some(ms) = self.busy_timeout_ms {
            config.busy_timeout = Duration::from_millis(ms);
        }
        if let Some(child_fetch) = self.child_fetch {
            config.child_fetch = child_fetch;
        }
        Ok(config)
    }

    fn actor(&self) -> Result<ActorId, CliError> {
        let raw = self.actor.as_deref().ok_or(CliError::MissingActor)?;
        Ok(ActorId::try_new(raw.trim())?)
    }
}

fn parse_health(value: &str) -> Result<HealthStatus, String> {
    match HealthStatus::from_column(Some(value)) {
        HealthStatus::Unknown => Err(format!("expected green, amber or red (got {value:?})")),
        status => Ok(status),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn to_json(value: &impl Serialize) -> Result<String, CliError> {
    Ok(serde_json::to_string(value)?)
}

fn run(cli: Cli) -> Result<String, CliError> {
    let config = cli.store_config()?;
    debug!(
        db_path = %config.db_path().display(),
        child_fetch = config.child_fetch.as_str(),
        "resolved configuration"
    );
    let store = SqliteStore::open_with(&config)?;

    match &cli.command {
        Command::Health => to_json(&StrategyCatalog::new(&store).health()?),
        Command::Strategies => to_json(&StrategyCatalog::new(&store).summaries()?),
        Command::Canvas { strategy_id } => {
            let assembler = HierarchyAssembler::new(&store).with_child_fetch(config.child_fetch);
            to_json(&assembler.canvas(strategy_id)?)
        }
        Command::DeepDive { strategy_id } => {
            let assembler = HierarchyAssembler::new(&store).with_child_fetch(config.child_fetch);
            to_json(&assembler.deep_dive(strategy_id)?)
        }
        Command::Impact { assumption_id } => {
            to_json(&ImpactResolver::new(&store).impact(assumption_id)?)
        }
        Command::CreateStrategy { name } => {
            let id = WriteCoordinator::new(&store)
                .create_strategy(&cli.actor()?, CreateStrategyRequest { name: name.clone() })?;
            to_json(&CreatedEnvelope { id })
        }
        Command::AddTheme {
            strategy_id,
            title,
            description,
            weighting,
            health,
        } => {
            let id = WriteCoordinator::new(&store).add_theme(
                &cli.actor()?,
                AddThemeRequest {
                    strategy_version_id: strategy_id.clone(),
                    title: title.clone(),
                    description: description.clone(),
                    weighting: *weighting,
                    health_status: *health,
                },
            )?;
            to_json(&CreatedEnvelope { id })
        }
        Command::AddObjective {
            theme_id,
            title,
            statement,
        } => {
            let id = WriteCoordinator::new(&store).add_objective(
                &cli.actor()?,
                AddObjectiveRequest {
                    theme_id: theme_id.clone(),
                    title: title.clone(),
                    statement: statement.clone(),
                },
            )?;
            to_json(&CreatedEnvelope { id })
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            error!(code = err.code(), "{err}");
            match serde_json::to_string(&err.to_envelope()) {
                Ok(envelope) => println!("{envelope}"),
                Err(_) => eprintln!("{err}"),
            }
            std::process::exit(err.exit_code());
        }
    }
}
