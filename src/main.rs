use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use profitshare::api::ApiServer;
use profitshare::app::{handle_fatal_error, init_logging, open_configured_store, AppConfig};
use profitshare::calculator::{
    check_percentages, compute, validate, CalculationInput, LegacyCalculationInput,
};
use profitshare::error::{ErrorCode, ProfitShareError};
use profitshare::storage::{config::default_file_path, BackendType, StoreError};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Split net profit between a company and its members
#[derive(Parser)]
#[command(name = "profitshare")]
#[command(about = "Profit-sharing calculator with saved calculation history", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Store calculations in this JSON file
    #[arg(long, global = true)]
    storage_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the JSON API server
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,
    },
    /// Compute a distribution without saving it
    Compute {
        /// Input JSON file, or '-' for stdin
        input: PathBuf,

        /// Read the fixed-field expense layout
        #[arg(long)]
        legacy: bool,
    },
    /// Compute and save a distribution
    Save {
        /// Input JSON file, or '-' for stdin
        input: PathBuf,

        /// Read the fixed-field expense layout
        #[arg(long)]
        legacy: bool,
    },
    /// Show a saved calculation
    Show {
        /// Calculation id
        id: String,
    },
    /// List the most recent saved calculations
    History {
        /// Number of calculations to list
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Delete a saved calculation
    Delete {
        /// Calculation id
        id: String,
    },
    /// Delete every saved calculation
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        handle_fatal_error(e, verbose);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env(cli.verbose)?;
    if let Some(path) = cli.storage_path {
        config = config.with_storage_path(path);
    }
    init_logging(&config);
    run_command(cli.command, config).await
}

async fn run_command(command: Commands, config: AppConfig) -> Result<()> {
    match command {
        Commands::Serve { bind } => {
            let config = match bind {
                Some(addr) => config.with_bind_addr(addr),
                None => config,
            };
            run_serve(config).await
        }
        Commands::Compute { input, legacy } => run_compute(&input, legacy),
        Commands::Save { input, legacy } => run_save(&input, legacy, config).await,
        Commands::Show { id } => {
            let store = open_configured_store(&persistent(config)).await?;
            let record = store.get(&id).await.map_err(ProfitShareError::from)?;
            print_json(&record)
        }
        Commands::History { limit } => {
            let config = persistent(config);
            let limit = limit.unwrap_or(config.storage.recent_limit);
            let store = open_configured_store(&config).await?;
            let recent = store
                .list_recent(limit)
                .await
                .map_err(ProfitShareError::from)?;
            print_json(&recent)
        }
        Commands::Delete { id } => {
            let store = open_configured_store(&persistent(config)).await?;
            if !store.delete(&id).await.map_err(ProfitShareError::from)? {
                return Err(ProfitShareError::from(StoreError::NotFound(id)).into());
            }
            println!("Deleted calculation {}", id);
            Ok(())
        }
        Commands::Clear => {
            let store = open_configured_store(&persistent(config)).await?;
            let removed = store.clear().await.map_err(ProfitShareError::from)?;
            println!("Removed {} calculation(s)", removed);
            Ok(())
        }
    }
}

async fn run_serve(config: AppConfig) -> Result<()> {
    let store = open_configured_store(&config).await?;
    ApiServer::new(store, config.bind_addr.clone())
        .with_recent_limit(config.storage.recent_limit)
        .start()
        .await
}

fn run_compute(path: &Path, legacy: bool) -> Result<()> {
    let input = read_input(path, legacy)?;
    validate(&input).map_err(|e| {
        ProfitShareError::validation_with_code(ErrorCode::VALIDATION_INVALID_INPUT, e.to_string())
    })?;
    warn_on_percentages(&input);
    print_json(&compute(&input))
}

async fn run_save(path: &Path, legacy: bool, config: AppConfig) -> Result<()> {
    let input = read_input(path, legacy)?;
    warn_on_percentages(&input);
    let store = open_configured_store(&persistent(config)).await?;
    let outcome = store.save(input).await.map_err(ProfitShareError::from)?;
    print_json(&outcome)
}

/// One-shot commands need history that outlives the process, so an
/// in-memory configuration falls back to the default calculations file.
fn persistent(config: AppConfig) -> AppConfig {
    if config.storage.backend == BackendType::Memory {
        config.with_storage_path(default_file_path())
    } else {
        config
    }
}

fn read_input(path: &Path, legacy: bool) -> Result<CalculationInput> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read input from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?
    };

    let input = if legacy {
        serde_json::from_str::<LegacyCalculationInput>(&raw)
            .map_err(ProfitShareError::from)?
            .into()
    } else {
        serde_json::from_str::<CalculationInput>(&raw).map_err(ProfitShareError::from)?
    };
    Ok(input)
}

fn warn_on_percentages(input: &CalculationInput) {
    let check = check_percentages(input.company_percentage, &input.members);
    if !check.is_valid {
        warn!(
            "Company and member percentages sum to {:.2}%, not 100%",
            check.total
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
