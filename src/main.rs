//! `TariffScan` CLI - Normalize carrier D&D tariff documents

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tariffscan::{source, Config, ProcessorRegistry};

#[derive(Parser)]
#[command(name = "tariffscan")]
#[command(about = "Reconstruct demurrage & detention tariffs from PDF layouts")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/tariffscan/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize one tariff document
    Process {
        /// Glyph dump (.json) or PDF (.pdf, needs the `pdf` feature)
        input: PathBuf,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Carrier profile
        #[arg(long, default_value = "CMA")]
        carrier: String,

        /// Emit the structured groups as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a current/previous pair of the same tariff
    Pair {
        /// Current document
        current: PathBuf,

        /// Previous document
        previous: PathBuf,

        /// Carrier profile
        #[arg(long, default_value = "CMA")]
        carrier: String,

        /// Emit both texts as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs to stderr; stdout carries the output
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let registry = ProcessorRegistry::new(config);

    match cli.command {
        Commands::Process {
            input,
            output,
            carrier,
            json,
        } => {
            cmd_process(&registry, &input, output.as_deref(), &carrier, json).await?;
        }
        Commands::Pair {
            current,
            previous,
            carrier,
            json,
        } => {
            cmd_pair(&registry, &current, &previous, &carrier, json).await?;
        }
    }

    Ok(())
}

async fn cmd_process(
    registry: &ProcessorRegistry,
    input: &Path,
    output: Option<&Path>,
    carrier: &str,
    json: bool,
) -> Result<()> {
    let processor = registry.get(carrier)?;
    let source = source::open(input)?;
    let doc = processor
        .try_process(source.as_ref())
        .await
        .with_context(|| format!("failed to process {}", input.display()))?;

    let rendered = if json {
        serde_json::to_string_pretty(&doc)?
    } else {
        doc.text
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Saved {} bytes to {}", rendered.len(), path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

async fn cmd_pair(
    registry: &ProcessorRegistry,
    current: &Path,
    previous: &Path,
    carrier: &str,
    json: bool,
) -> Result<()> {
    let processor = registry.get(carrier)?;
    let current = source::open(current)?;
    let previous = source::open(previous)?;
    let output = processor
        .process_pair(current.as_ref(), previous.as_ref())
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("=== current ===");
        println!("{}", output.current);
        println!("=== previous ===");
        println!("{}", output.previous);
    }

    Ok(())
}
