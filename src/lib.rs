//! Grouped MPKI bar charts for branch predictor comparisons.
//!
//! [`chart::ChartBuilder`] validates the series, appends the aggregate
//! category and lays out the bars and labels; [`render`] draws the result to
//! SVG.
pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod render;

pub use chart::{ChartArtifact, ChartBuilder};
pub use config::ChartConfig;
pub use dataset::{AGGREGATE_LABEL, AggregateRow, Dataset, Series};
pub use error::{ChartError, Result};
