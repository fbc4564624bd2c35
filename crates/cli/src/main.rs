use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use treechunk::{Chunker, ChunkerConfig, SizeMetric};

#[derive(Parser)]
#[command(name = "treechunk")]
#[command(about = "Structure-aware source-code chunking", long_about = None)]
#[command(version)]
struct Cli {
    /// Source files to chunk
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Maximum window size under the selected metric
    #[arg(long, default_value_t = 1000)]
    max_size: usize,

    /// Size metric used to measure windows
    #[arg(long, value_enum, default_value_t = Metric::NonWhitespace)]
    metric: Metric,

    /// Emit chunks as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Metric {
    NonWhitespace,
    Bytes,
    ApproxTokens,
    Words,
}

impl From<Metric> for SizeMetric {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::NonWhitespace => SizeMetric::NonWhitespaceChars,
            Metric::Bytes => SizeMetric::Bytes,
            Metric::ApproxTokens => SizeMetric::ApproxTokens,
            Metric::Words => SizeMetric::Words,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let config = ChunkerConfig {
        max_window_size: cli.max_size,
        metric: cli.metric.into(),
        ..Default::default()
    };
    config.validate().context("invalid chunker configuration")?;
    let chunker = Chunker::new(config);

    for file in &cli.files {
        let chunks = chunker
            .chunk_file(file)
            .with_context(|| format!("failed to chunk {}", file.display()))?;

        if cli.json {
            for chunk in &chunks {
                println!("{}", serde_json::to_string(chunk)?);
            }
        } else {
            println!("{}", file.display());
            for chunk in &chunks {
                let kinds = chunk.metadata.item_kinds.join(", ");
                let flag = if chunk.metadata.over_budget {
                    " [over budget]"
                } else {
                    ""
                };
                println!(
                    "  lines {:>4}-{:<4} size {:>5}{}  {}",
                    chunk.start_line, chunk.end_line, chunk.size(), flag, kinds
                );
            }
            println!("  {}", Chunker::get_stats(&chunks));
        }
    }

    Ok(())
}
