use std::fs;
use std::path::PathBuf;

use bpchart::ChartConfig;
use bpchart::chart::{Annotate, LabelFormat};
use bpchart::config::{ChartSection, LabelConfig, LayoutConfig};
use tempfile::tempdir;

fn custom() -> ChartConfig {
    ChartConfig {
        chart: ChartSection {
            title: "Predictors".to_string(),
            x_axis_label: "Trace".to_string(),
            y_axis_label: "Misses / KI".to_string(),
            output_path: PathBuf::from("plots/out.svg"),
        },
        layout: LayoutConfig {
            bar_width: 0.12,
            width_px: 1200,
            height_px: 600,
        },
        labels: LabelConfig {
            format: LabelFormat::with_precision(1),
            rotation_deg: 90.0,
            offsets: vec![0.25, 0.75],
            font_size: 10,
            tick_rotation_deg: 0.0,
            annotate: Annotate::None,
        },
    }
}

#[test]
fn config_roundtrip_default_toml() {
    let default_cfg = ChartConfig::default();
    let text = toml::to_string_pretty(&default_cfg).expect("serialize default");
    let parsed: ChartConfig = toml::from_str(&text).expect("parse default");
    assert_eq!(parsed, default_cfg);
}

#[test]
fn config_load_custom_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    let text = toml::to_string_pretty(&custom()).expect("serialize custom");
    fs::write(&path, text).expect("write custom config");

    let loaded = ChartConfig::load_or_default(&path);
    assert_eq!(loaded, custom());
}

#[test]
fn config_missing_file_fallback() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let loaded = ChartConfig::load_or_default(&path);
    assert!(path.exists(), "missing config should be created");
    assert_eq!(loaded, ChartConfig::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let text = r#"
[labels]
rotation_deg = 30.0
"#;
    let parsed: ChartConfig = toml::from_str(text).expect("parse partial");
    assert_eq!(parsed.labels.rotation_deg, 30.0);
    assert_eq!(parsed.labels.format.precision(), 2);
    assert_eq!(parsed.layout, LayoutConfig::default());
}
