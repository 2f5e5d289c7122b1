use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between raw series and a written chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Series lengths or aggregate keys disagree with the category list.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("no series to plot")]
    EmptySeriesSet,

    /// `width * series_count` must stay within one category unit.
    #[error("bar width {width} does not fit {series} series into one category (width * series > 1)")]
    InvalidWidth { width: f64, series: usize },

    #[error("series '{series}' has invalid value {value} at index {index}")]
    InvalidValue {
        series: String,
        index: usize,
        value: f64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to draw chart: {0}")]
    Render(String),

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChartError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
