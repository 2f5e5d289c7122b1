use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML (created with commented defaults if missing)
    #[arg(long, default_value = "bpchart.toml")]
    pub config: PathBuf,

    /// Output SVG path (overrides config)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Chart title (overrides config)
    #[arg(long)]
    pub title: Option<String>,

    /// Bar width in category units (overrides config)
    #[arg(long)]
    pub bar_width: Option<f64>,

    /// Log filter, e.g. "info" or "bpchart=debug"
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn apply(&self, cfg: &mut bpchart::ChartConfig) {
        if let Some(output) = &self.output {
            cfg.chart.output_path = output.clone();
        }
        if let Some(title) = &self.title {
            cfg.chart.title = title.clone();
        }
        if let Some(width) = self.bar_width {
            cfg.layout.bar_width = width;
        }
    }
}
