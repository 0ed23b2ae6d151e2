//! Converter binary.
//!
//! Turns exported subsidy recipient sheets into published shard datasets and looks up
//! individual records from them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use config::shared::ConverterConfig;
use telemetry::tracing::init_tracing;
use tracing::info;

use crate::commands::datasets::DatasetsArgs;
use crate::commands::headers::HeadersArgs;
use crate::commands::ingest::IngestArgs;
use crate::commands::lookup::LookupArgs;
use crate::settings::load_converter_config;
use crate::error::{ConverterError, ConverterResult};

mod commands;
mod error;
mod settings;

#[derive(Parser)]
#[command(name = "converter", about = "Subsidy recipient dataset converter")]
struct Args {
    /// Directory holding `base` and environment configuration files.
    /// Defaults to `configuration` in the working directory.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert source sheets into a sharded dataset
    Ingest(IngestArgs),
    /// Print the resolved headers of a source sheet with their column letters
    Headers(HeadersArgs),
    /// Look up the records of one identity number
    Lookup(LookupArgs),
    /// List the cataloged datasets
    Datasets(DatasetsArgs),
}

fn main() -> ConverterResult<()> {
    let args = Args::parse();

    let converter_config = load_converter_config(args.config_dir.as_deref())?;

    let _log_flusher = init_tracing(env!("CARGO_BIN_NAME")).map_err(ConverterError::config)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(args.command, converter_config))?;

    Ok(())
}

async fn async_main(command: Command, converter_config: ConverterConfig) -> ConverterResult<()> {
    info!(output_dir = %converter_config.output_dir.display(), "converter started");

    match command {
        Command::Ingest(args) => args.run(&converter_config).await,
        Command::Headers(args) => args.run().await,
        Command::Lookup(args) => args.run(&converter_config).await,
        Command::Datasets(args) => args.run(&converter_config).await,
    }
}
