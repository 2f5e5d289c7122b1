// Entry point: renders the built-in MPKI table to one SVG file.
mod cli;

use std::error::Error;

use bpchart::{ChartBuilder, ChartConfig, dataset};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = cli::Args::parse();
    init_tracing(&args.log_level);

    let mut cfg = ChartConfig::load_or_default(&args.config);
    args.apply(&mut cfg);

    let data = dataset::branch_predictor_mpki();
    info!(
        benchmarks = data.categories.len(),
        series = data.series.len(),
        "building chart"
    );

    let artifact = ChartBuilder::new(cfg.clone()).build_dataset(&data)?;
    artifact.save_svg(&cfg.chart.output_path)?;

    println!("Saved chart to {}", cfg.chart.output_path.display());
    Ok(())
}
