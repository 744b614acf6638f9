use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pairbench::{report, run_experiment, BenchConfig, Precision, ResultsTable, TracingAllocator};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: TracingAllocator = TracingAllocator::system();

/// Naive vs vectorized pairwise Euclidean distance benchmark
#[derive(Parser, Debug)]
#[command(name = "pairbench")]
#[command(about = "Time and peak memory of naive vs vectorized pairwise distances")]
struct Args {
    /// JSON config file. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated problem sizes (default: 200,400,600,800,1000)
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,

    /// Results table path (default: performance_results.csv)
    #[arg(long)]
    table_path: Option<PathBuf>,

    /// Chart path (default: performance_comparison.png)
    #[arg(long)]
    plot_path: Option<PathBuf>,

    /// Float precision shared by both computers: f32 or f64
    #[arg(long)]
    precision: Option<Precision>,

    /// Seed for point generation
    #[arg(long)]
    seed: Option<u64>,

    /// TrueType font for chart text
    #[arg(long)]
    font: Option<PathBuf>,

    /// Also write the results table as JSON
    #[arg(long)]
    json_path: Option<PathBuf>,
}

impl Args {
    /// Defaults, then the config file, then flags.
    fn to_config(&self) -> anyhow::Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => BenchConfig::default(),
        };

        if let Some(sizes) = &self.sizes {
            config.sizes = sizes.clone();
        }
        if let Some(path) = &self.table_path {
            config.table_path = path.clone();
        }
        if let Some(path) = &self.plot_path {
            config.plot_path = path.clone();
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.to_config()?;

    let series = run_experiment(&config)?;
    let table = ResultsTable::from_series(&series);
    report(&table, &config)?;

    if let Some(path) = &args.json_path {
        table.write_json(path)?;
        tracing::info!("Saved results JSON as {}", path.display());
    }

    println!("\n{}", table);
    Ok(())
}
