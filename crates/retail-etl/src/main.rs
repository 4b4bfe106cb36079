//! Retail ETL - batch pipeline entry point

use anyhow::Result;
use clap::Parser;
use retail_common::logging::{init_logging, LogConfig, LogLevel};
use retail_etl::config::EtlConfig;
use retail_etl::load::{create_pool, NullLoader, PgLoader};
use retail_etl::pipeline::Pipeline;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "retail-etl")]
#[command(author, version, about = "Batch ETL pipeline for retail flat-file extracts")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the full pipeline: read, validate, transform, load
    Run {
        /// Directory containing one pipe-delimited file per entity
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Validate and transform without touching the database
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::new()
        .with_level(log_level)
        .with_file_prefix("retail-etl");

    // Environment variables take precedence
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    if let Err(e) = init_logging(&log_config) {
        eprintln!("Error: failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = execute(cli).await {
        error!(error = %e, "pipeline failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run { data_dir, dry_run } => {
            let mut config = EtlConfig::load()?;
            if let Some(dir) = data_dir {
                config.sources.data_dir = dir;
            }

            let loaded = if dry_run {
                info!("dry run: validating without a database connection");
                Pipeline::new(config, NullLoader).run().await?
            } else {
                let pool = create_pool(&config.database).await?;
                Pipeline::new(config, PgLoader::new(pool)).run().await?
            };

            for (entity, rows) in loaded {
                info!(entity = %entity, rows, "loaded");
            }
        }
    }

    Ok(())
}
