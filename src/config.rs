use crate::chart::{Annotate, LabelFormat};
use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSection {
    #[serde(default = "ChartSection::default_title")]
    pub title: String,
    #[serde(default = "ChartSection::default_x_axis_label")]
    pub x_axis_label: String,
    #[serde(default = "ChartSection::default_y_axis_label")]
    pub y_axis_label: String,
    #[serde(default = "ChartSection::default_output_path")]
    pub output_path: PathBuf,
}

impl ChartSection {
    fn default_title() -> String {
        "MPKI Comparison for Branch Predictor Configurations (Including AMEAN)".to_string()
    }
    fn default_x_axis_label() -> String {
        "Benchmarks".to_string()
    }
    fn default_y_axis_label() -> String {
        "MPKI".to_string()
    }
    fn default_output_path() -> PathBuf {
        PathBuf::from("mpki_comparison.svg")
    }
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            x_axis_label: Self::default_x_axis_label(),
            y_axis_label: Self::default_y_axis_label(),
            output_path: Self::default_output_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Bar thickness in category units.
    #[serde(default = "LayoutConfig::default_bar_width")]
    pub bar_width: f64,
    #[serde(default = "LayoutConfig::default_width_px")]
    pub width_px: u32,
    #[serde(default = "LayoutConfig::default_height_px")]
    pub height_px: u32,
}

impl LayoutConfig {
    fn default_bar_width() -> f64 {
        0.15
    }
    fn default_width_px() -> u32 {
        1500
    }
    fn default_height_px() -> u32 {
        800
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bar_width: Self::default_bar_width(),
            width_px: Self::default_width_px(),
            height_px: Self::default_height_px(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelConfig {
    #[serde(default)]
    pub format: LabelFormat,
    /// Counter-clockwise, in degrees.
    #[serde(default = "LabelConfig::default_rotation_deg")]
    pub rotation_deg: f64,
    /// Gap between bar top and label, per series in plotting order.
    #[serde(default = "LabelConfig::default_offsets")]
    pub offsets: Vec<f64>,
    #[serde(default = "LabelConfig::default_font_size")]
    pub font_size: u32,
    #[serde(default = "LabelConfig::default_tick_rotation_deg")]
    pub tick_rotation_deg: f64,
    #[serde(default)]
    pub annotate: Annotate,
}

impl LabelConfig {
    fn default_rotation_deg() -> f64 {
        45.0
    }
    fn default_offsets() -> Vec<f64> {
        vec![0.5, 2.0, 1.5, 1.0, 0.5]
    }
    fn default_font_size() -> u32 {
        8
    }
    fn default_tick_rotation_deg() -> f64 {
        90.0
    }

    /// Offset for series `k`; series past the configured list reuse the last entry.
    pub fn offset_for(&self, k: usize) -> f64 {
        self.offsets
            .get(k)
            .or_else(|| self.offsets.last())
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            format: LabelFormat::default(),
            rotation_deg: Self::default_rotation_deg(),
            offsets: Self::default_offsets(),
            font_size: Self::default_font_size(),
            tick_rotation_deg: Self::default_tick_rotation_deg(),
            annotate: Annotate::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ChartConfig {
    #[serde(default)]
    pub chart: ChartSection,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub labels: LabelConfig,
}

impl ChartConfig {
    /// Strict load: a missing, unreadable or malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| ChartError::io(path, err))?;
        toml::from_str(&contents)
            .map_err(|err| ChartError::InvalidConfig(format!("{}: {err}", path.display())))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return match Self::load(path) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("{err}. Using defaults.");
                    Self::default()
                }
            };
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        match default_cfg.to_commented_toml() {
            Ok(text) => match fs::write(path, text) {
                Ok(()) => info!("wrote default config to {}", path.display()),
                Err(err) => warn!("Failed to write default config to {}: {err}", path.display()),
            },
            Err(err) => warn!("Failed to serialize default config: {err}"),
        }
        default_cfg
    }

    /// Serialized form with every key commented out, section headers kept.
    pub fn to_commented_toml(&self) -> Result<String> {
        let text = toml::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        let mut commented = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                commented.push('\n');
            } else if trimmed.starts_with('[') && trimmed.ends_with(']') && !line.starts_with(' ')
            {
                commented.push_str(line);
                commented.push('\n');
            } else {
                commented.push_str("# ");
                commented.push_str(line);
                commented.push('\n');
            }
        }
        Ok(commented)
    }
}
