//! CLI entry point for the `y86sim` simulator binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::info;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;
use thiserror::Error;
use y86_core::{run, ConfigError, CoreConfig, CycleSnapshot};
use y86_loader::{load_file, load_source, render, LoadError, ObjectSource, TraceFormat};

/// Runs a Y86-64 object file and prints the per-cycle machine state.
#[derive(Debug, Parser)]
#[command(name = "y86sim", version)]
struct Cli {
    /// Object file (`.yo`) to load, or `-` to read standard input.
    input: PathBuf,

    /// JSON file holding a partial or full simulator configuration.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of cycles to execute.
    #[arg(long, value_name = "N")]
    max_cycles: Option<u32>,

    /// Memory capacity in bytes.
    #[arg(long, value_name = "BYTES")]
    memory_bytes: Option<usize>,

    /// Trace output format.
    #[arg(long, value_enum, default_value_t = TraceFormat::Json)]
    format: TraceFormat,

    /// Print only the final machine state.
    #[arg(long)]
    final_only: bool,
}

#[derive(Debug, Error)]
enum DriverError {
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("failed to render trace: {0}")]
    Render(#[from] serde_json::Error),
}

fn load_config(cli: &Cli) -> Result<CoreConfig, DriverError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => CoreConfig::default(),
    };
    if let Some(max_cycles) = cli.max_cycles {
        config.max_cycles = max_cycles;
    }
    if let Some(memory_bytes) = cli.memory_bytes {
        config.memory_bytes = memory_bytes;
    }
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<CoreConfig, DriverError> {
    let text = fs::read_to_string(path).map_err(|source| DriverError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DriverError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn simulate(cli: &Cli) -> Result<String, DriverError> {
    let config = load_config(cli)?;

    let mut state = if cli.input.as_os_str() == "-" {
        let source = ObjectSource::read_from("<stdin>", io::stdin().lock())?;
        load_source(&source, &config)?
    } else {
        load_file(&cli.input, &config)?
    };

    let mut trace: Vec<CycleSnapshot> = Vec::new();
    let outcome = run(&mut state, &config, &mut trace);
    info!(
        "stopped after {} cycles: {:?} (status {})",
        outcome.cycles,
        outcome.stop,
        state.status.mnemonic()
    );

    if cli.final_only || trace.is_empty() {
        trace = vec![state.snapshot()];
    }
    Ok(render(&trace, cli.format)?)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();
    let cli = Cli::parse();

    match simulate(&cli) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
