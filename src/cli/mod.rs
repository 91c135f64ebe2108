//! CLI command handlers
//!
//! Operational surface over the registry and the prediction pipeline:
//!
//! ```bash
//! servir register house-price --run-id run-8027
//! servir stage house-price 1 Staging
//! servir promote house-price
//! servir predict house-price MedInc=8.3 HouseAge=41 AveRooms=6.9
//! servir list house-price
//! ```
//!
//! Credentials and storage locations come from the environment (see
//! [`crate::config`]); a missing token aborts before any command runs.

mod logging;

pub use logging::LogLevel;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::artifact::FsStore;
use crate::config::{ConfigError, ServeConfig};
use crate::pipeline::{PredictError, PredictivePair, VersionSelector};
use crate::promote::{promote_to_production, PromoteError};
use crate::registry::{JsonFileRegistry, ModelRegistry, ModelStage, RegistryError};
use logging::log;

/// Model registry and prediction serving CLI
#[derive(Parser, Debug)]
#[command(name = "servir", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new model version from a training run
    Register {
        /// Model name
        model: String,
        /// Run id that produced the artifacts
        #[arg(long)]
        run_id: String,
    },
    /// Transition a version to a stage
    Stage {
        /// Model name
        model: String,
        /// Version number
        version: u32,
        /// Target stage (None, Staging, Production, Archived)
        stage: ModelStage,
        /// Auto-archive other Production versions in the same call
        #[arg(long)]
        archive_existing: bool,
    },
    /// Promote the newest Staging version to Production
    Promote {
        /// Model name
        model: String,
    },
    /// Predict from named features (name=value pairs, schema order)
    Predict {
        /// Model name
        model: String,
        /// Pin a version instead of current Production
        #[arg(long)]
        version: Option<u32>,
        /// Feature values as name=value
        #[arg(required = true)]
        features: Vec<String>,
    },
    /// List all versions of a model with their stages
    List {
        /// Model name
        model: String,
    },
}

/// CLI errors, one variant per failing subsystem.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Promote(#[from] PromoteError),

    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error("invalid feature argument '{0}', expected name=value")]
    BadFeature(String),
}

fn parse_features(args: &[String]) -> Result<Vec<(String, f64)>, CliError> {
    args.iter()
        .map(|arg| {
            let (name, value) = arg
                .split_once('=')
                .ok_or_else(|| CliError::BadFeature(arg.clone()))?;
            let value: f64 = value
                .parse()
                .map_err(|_| CliError::BadFeature(arg.clone()))?;
            Ok((name.to_string(), value))
        })
        .collect()
}

/// Execute a parsed CLI command.
pub fn run_command(cli: Cli) -> Result<(), CliError> {
    // Configure output based on verbose/quiet flags
    let level = LogLevel::from_flags(cli.quiet, cli.verbose);

    let config = ServeConfig::from_env()?;
    log(
        level,
        LogLevel::Verbose,
        &format!("Registry: {}", config.registry_dir.display()),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("Artifacts: {}", config.artifact_dir.display()),
    );
    let mut registry = JsonFileRegistry::new(&config.registry_dir);

    match cli.command {
        Command::Register { model, run_id } => {
            let mv = registry.create_version(&model, &run_id)?;
            log(
                level,
                LogLevel::Normal,
                &format!("Registered {} v{} (run {})", mv.name, mv.version, mv.run_id),
            );
            log(
                level,
                LogLevel::Verbose,
                &format!("Created at: {}", mv.created_at),
            );
        }
        Command::Stage {
            model,
            version,
            stage,
            archive_existing,
        } => {
            let mv = registry.set_stage(&model, version, stage, archive_existing)?;
            log(
                level,
                LogLevel::Normal,
                &format!("{} v{} is now {}", mv.name, mv.version, mv.stage),
            );
        }
        Command::Promote { model } => {
            let outcome = promote_to_production(&mut registry, &model)?;
            match outcome.archived {
                Some(old) => log(
                    level,
                    LogLevel::Normal,
                    &format!("Archived model version {old} in 'Production'."),
                ),
                None => log(
                    level,
                    LogLevel::Normal,
                    "No model currently in 'Production'.",
                ),
            }
            log(
                level,
                LogLevel::Normal,
                &format!("Promoted model version {} to 'Production'.", outcome.promoted),
            );
        }
        Command::Predict {
            model,
            version,
            features,
        } => {
            let features = parse_features(&features)?;
            let selector = match version {
                Some(v) => VersionSelector::Explicit(v),
                None => VersionSelector::production(),
            };
            let store = FsStore::new(&config.artifact_dir);
            let pair = PredictivePair::load(&registry, &store, &model, &selector)?;
            log(
                level,
                LogLevel::Verbose,
                &format!("Serving {} v{} (run {})", model, pair.version, pair.run_id),
            );
            let prediction = pair.predict(&features)?;
            log(level, LogLevel::Normal, &format!("{prediction}"));
        }
        Command::List { model } => {
            let versions = registry.list_versions(&model)?;
            if versions.is_empty() {
                log(
                    level,
                    LogLevel::Normal,
                    &format!("No versions registered for '{model}'."),
                );
            }
            for mv in versions {
                log(
                    level,
                    LogLevel::Normal,
                    &format!("v{}\t{}\trun {}", mv.version, mv.stage, mv.run_id),
                );
            }
        }
    }

    Ok(())
}
