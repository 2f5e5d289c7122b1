//! Grouped bar layout: turns categories, series and an aggregate row into a
//! fully positioned [`ChartArtifact`].
//!
//! Category `i` sits on the integer tick `i`; the `K` bars of a category are
//! spread symmetrically around it, `width` apart. The aggregate category is
//! always the last tick.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ChartConfig;
use crate::dataset::{AggregateRow, Dataset, Series};
use crate::error::{ChartError, Result};

/// matplotlib "tab10", cycled per series.
pub const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Fraction of the plot height kept free above the tallest bar or label.
const Y_HEADROOM: f64 = 0.12;

/// printf-style fixed-point format, `"%.Nf"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelFormat {
    precision: usize,
}

impl LabelFormat {
    pub fn with_precision(precision: usize) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

impl FromStr for LabelFormat {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("%.")
            .and_then(|rest| rest.strip_suffix('f'))
            .ok_or_else(|| {
                ChartError::InvalidConfig(format!("label format {s:?} is not of the form %.Nf"))
            })?;
        let precision = digits.parse::<usize>().map_err(|_| {
            ChartError::InvalidConfig(format!("label format {s:?} has a bad precision"))
        })?;
        if precision > 17 {
            return Err(ChartError::InvalidConfig(format!(
                "label precision {precision} exceeds f64 resolution"
            )));
        }
        Ok(Self { precision })
    }
}

impl TryFrom<String> for LabelFormat {
    type Error = ChartError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<LabelFormat> for String {
    fn from(f: LabelFormat) -> Self {
        f.to_string()
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%.{}f", self.precision)
    }
}

/// Which bars get a value label.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Annotate {
    /// Only the bars of the trailing aggregate category.
    #[default]
    AggregateOnly,
    All,
    None,
}

impl Annotate {
    pub fn selects(self, category_index: usize, aggregate_index: usize) -> bool {
        match self {
            Annotate::AggregateOnly => category_index == aggregate_index,
            Annotate::All => true,
            Annotate::None => false,
        }
    }
}

/// Horizontal shift of series `k` out of `count`, centred on the category tick.
pub fn bar_offset(k: usize, count: usize, width: f64) -> f64 {
    (k as f64 - (count as f64 - 1.0) / 2.0) * width
}

/// Rejects widths that would make neighbouring series overlap.
pub fn validate_width(width: f64, series: usize) -> Result<()> {
    if !width.is_finite() || width <= 0.0 || width * series as f64 > 1.0 + 1e-9 {
        return Err(ChartError::InvalidWidth { width, series });
    }
    Ok(())
}

/// Categories and series with the aggregate appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Augmented {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl Augmented {
    pub fn aggregate_index(&self) -> Option<usize> {
        self.categories.len().checked_sub(1)
    }
}

/// Validates shapes and appends the aggregate row to copies of the inputs.
pub fn augment(
    categories: &[String],
    series: &[Series],
    aggregate: &AggregateRow,
) -> Result<Augmented> {
    if series.is_empty() {
        return Err(ChartError::EmptySeriesSet);
    }

    let mut seen = HashSet::with_capacity(series.len());
    for s in series {
        if !seen.insert(s.name.as_str()) {
            return Err(ChartError::ShapeMismatch(format!(
                "series '{}' appears more than once",
                s.name
            )));
        }
        if s.values.len() != categories.len() {
            return Err(ChartError::ShapeMismatch(format!(
                "series '{}' has {} values for {} categories",
                s.name,
                s.values.len(),
                categories.len()
            )));
        }
        if let Some((index, &value)) = s
            .values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ChartError::InvalidValue {
                series: s.name.clone(),
                index,
                value,
            });
        }
    }

    let mut agg_seen = HashSet::with_capacity(aggregate.values.len());
    for (name, _) in &aggregate.values {
        if !agg_seen.insert(name.as_str()) {
            return Err(ChartError::ShapeMismatch(format!(
                "aggregate value for '{name}' given more than once"
            )));
        }
        if !seen.contains(name.as_str()) {
            return Err(ChartError::ShapeMismatch(format!(
                "aggregate value for unknown series '{name}'"
            )));
        }
    }

    let mut augmented_series = Vec::with_capacity(series.len());
    for s in series {
        let value = aggregate.get(&s.name).ok_or_else(|| {
            ChartError::ShapeMismatch(format!("no aggregate value for series '{}'", s.name))
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidValue {
                series: s.name.clone(),
                index: categories.len(),
                value,
            });
        }
        let mut values = Vec::with_capacity(s.values.len() + 1);
        values.extend_from_slice(&s.values);
        values.push(value);
        augmented_series.push(Series::new(s.name.clone(), values));
    }

    let mut augmented_categories = Vec::with_capacity(categories.len() + 1);
    augmented_categories.extend_from_slice(categories);
    augmented_categories.push(aggregate.label.clone());

    Ok(Augmented {
        categories: augmented_categories,
        series: augmented_series,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub category_index: usize,
    /// Bar centre in category units.
    pub x: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub series: String,
    pub color: RGBColor,
    pub bars: Vec<Bar>,
}

/// A value annotation anchored at its bottom centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub series_index: usize,
    pub category_index: usize,
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Counter-clockwise, in degrees.
    pub rotation_deg: f64,
}

/// A laid-out chart, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub ticks: Vec<String>,
    pub groups: Vec<BarGroup>,
    pub labels: Vec<Label>,
    pub bar_width: f64,
    pub y_max: f64,
    pub size: (u32, u32),
    pub label_font_size: u32,
    pub tick_rotation_deg: f64,
}

impl ChartArtifact {
    /// Index of the trailing aggregate tick, `None` for a chart without ticks.
    pub fn aggregate_index(&self) -> Option<usize> {
        self.ticks.len().checked_sub(1)
    }

    pub fn x_range(&self) -> std::ops::Range<f64> {
        -0.5..(self.ticks.len() as f64 - 0.5)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    config: ChartConfig,
}

impl ChartBuilder {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn build_dataset(&self, data: &Dataset) -> Result<ChartArtifact> {
        self.build(&data.categories, &data.series, &data.aggregate)
    }

    pub fn build(
        &self,
        categories: &[String],
        series: &[Series],
        aggregate: &AggregateRow,
    ) -> Result<ChartArtifact> {
        let layout = &self.config.layout;
        let labels_cfg = &self.config.labels;

        let augmented = augment(categories, series, aggregate)?;
        let count = augmented.series.len();
        validate_width(layout.bar_width, count)?;
        // augment always appends the aggregate after the N benchmarks.
        let aggregate_index = categories.len();

        let mut groups = Vec::with_capacity(count);
        let mut labels = Vec::new();
        for (k, s) in augmented.series.iter().enumerate() {
            let offset = bar_offset(k, count, layout.bar_width);
            let bars: Vec<Bar> = s
                .values
                .iter()
                .enumerate()
                .map(|(i, &height)| Bar {
                    category_index: i,
                    x: i as f64 + offset,
                    height,
                })
                .collect();

            labels.extend(
                bars.iter()
                    .filter(|bar| labels_cfg.annotate.selects(bar.category_index, aggregate_index))
                    .map(|bar| Label {
                        series_index: k,
                        category_index: bar.category_index,
                        text: labels_cfg.format.format(bar.height),
                        x: bar.x,
                        y: bar.height + labels_cfg.offset_for(k),
                        rotation_deg: labels_cfg.rotation_deg,
                    }),
            );

            groups.push(BarGroup {
                series: s.name.clone(),
                color: SERIES_COLORS[k % SERIES_COLORS.len()],
                bars,
            });
        }

        let top = groups
            .iter()
            .flat_map(|g| g.bars.iter().map(|b| b.height))
            .chain(labels.iter().map(|l| l.y))
            .fold(0.0f64, f64::max);
        let y_max = (top * (1.0 + Y_HEADROOM)).max(1.0);

        debug!(
            categories = augmented.categories.len(),
            series = count,
            labels = labels.len(),
            y_max,
            "laid out grouped bar chart"
        );

        Ok(ChartArtifact {
            title: self.config.chart.title.clone(),
            x_axis_label: self.config.chart.x_axis_label.clone(),
            y_axis_label: self.config.chart.y_axis_label.clone(),
            ticks: augmented.categories,
            groups,
            labels,
            bar_width: layout.bar_width,
            y_max,
            size: (layout.width_px, layout.height_px),
            label_font_size: labels_cfg.font_size,
            tick_rotation_deg: labels_cfg.tick_rotation_deg,
        })
    }
}
