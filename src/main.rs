use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use sonic_aggregator::config::Config;
use sonic_aggregator::constants::{BY_DECADE_DOC, PLACEHOLDER_BY_DECADE};
use sonic_aggregator::error::AggregatorError;
use sonic_aggregator::pipeline::Pipeline;
use sonic_aggregator::sink::{ArtifactSink, JsonDirSink};
use sonic_aggregator::{loader, logging};

#[derive(Parser)]
#[command(name = "sonic_aggregator")]
#[command(about = "Decade-level aggregation pipeline for music attribute datasets")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the five JSON documents
    Process {
        /// Directory holding the candidate input files
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Directory the JSON documents are written to
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Optional TOML config file; CLI flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
        /// Feature sample size cap
        #[arg(long)]
        sample_size: Option<usize>,
        /// Feature sample seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Report which input source would be used, without writing anything
    Probe {
        /// Directory holding the candidate input files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn resolve_config(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    sample_size: Option<usize>,
    seed: Option<u64>,
) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(config_path.as_deref())?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = out_dir {
        config.output_dir = dir;
    }
    if let Some(size) = sample_size {
        config.sampling.size = size;
    }
    if let Some(seed) = seed {
        config.sampling.seed = seed;
    }
    Ok(config)
}

/// No-input policy: the decade summary gets a static placeholder so the
/// visualization has something to draw; the other four documents are not
/// produced without real input.
fn write_placeholder(sink: &dyn ArtifactSink) -> anyhow::Result<()> {
    warn!("No input dataset found; writing placeholder {} only", BY_DECADE_DOC);
    sink.write_document(BY_DECADE_DOC, &PLACEHOLDER_BY_DECADE)?;
    Ok(())
}

fn run_process(config: Config) -> anyhow::Result<()> {
    println!("🚀 Running aggregation pipeline...");
    let sink = JsonDirSink::new(&config.output_dir);

    match Pipeline::run(&config, &sink) {
        Ok(summary) => {
            info!("Pipeline finished");
            println!("\n📊 Pipeline Results:");
            println!("   Source: {} ({} layout)", summary.source, summary.layout);
            println!("   Rows read: {}", summary.rows_read);
            println!("   Rows kept: {}", summary.rows_kept);
            println!("   Rows dropped: {}", summary.rows_dropped);
            for doc in &summary.documents {
                println!(
                    "   Saved: {} ({} records)",
                    sink.document_path(&doc.name).display(),
                    doc.records
                );
            }
            println!("\n✅ Data processing complete!");
            Ok(())
        }
        Err(AggregatorError::MissingInput(reason)) => {
            println!("⚠️  No input dataset available: {reason}");
            write_placeholder(&sink)?;
            println!(
                "   Saved placeholder: {}",
                sink.document_path(BY_DECADE_DOC).display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            println!("❌ Pipeline failed: {e}");
            Err(e.into())
        }
    }
}

fn run_probe(data_dir: PathBuf) -> anyhow::Result<()> {
    match loader::load_from_dir(&data_dir) {
        Ok(dataset) => {
            println!("🔍 Source: {}", dataset.path.display());
            println!("   Layout: {}", dataset.layout.name());
            println!("   Rows: {}", dataset.rows.len());
            if dataset.malformed_rows > 0 {
                println!("   Malformed rows skipped: {}", dataset.malformed_rows);
            }
            Ok(())
        }
        Err(AggregatorError::MissingInput(reason)) => {
            println!("⚠️  No input dataset available: {reason}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            data_dir,
            out_dir,
            config,
            sample_size,
            seed,
        } => {
            let config = resolve_config(config, data_dir, out_dir, sample_size, seed)?;
            run_process(config)?;
        }
        Commands::Probe { data_dir } => {
            let data_dir = data_dir.unwrap_or_else(|| Config::default().data_dir);
            run_probe(data_dir)?;
        }
    }
    Ok(())
}
