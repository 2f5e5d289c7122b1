//! SVG rendering and export of a laid-out [`ChartArtifact`].

use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::{debug, info, warn};

use crate::chart::ChartArtifact;
use crate::error::{ChartError, Result};

const FONT: &str = "sans-serif";
const TICK_FONT_SIZE: f64 = 12.0;
/// Rough glyph advance at the tick font size, for sizing the label area.
const TICK_CHAR_PX: u32 = 7;

/// Snaps a counter-clockwise angle to the nearest quarter turn the plotters
/// text backend can draw. Only used for tick labels.
pub fn quarter_turn(deg: f64) -> FontTransform {
    let turns = (deg / 90.0).round().rem_euclid(4.0) as u8;
    match turns {
        0 => FontTransform::None,
        1 => FontTransform::Rotate270,
        2 => FontTransform::Rotate180,
        _ => FontTransform::Rotate90,
    }
}

fn tick_text(ticks: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    ticks.get(idx as usize).cloned().unwrap_or_default()
}

fn x_label_area_px(artifact: &ChartArtifact) -> u32 {
    let longest = artifact
        .ticks
        .iter()
        .map(|t| t.chars().count() as u32)
        .max()
        .unwrap_or(0);
    match quarter_turn(artifact.tick_rotation_deg) {
        FontTransform::Rotate90 | FontTransform::Rotate270 => longest * TICK_CHAR_PX + 40,
        _ => 50,
    }
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    artifact: &ChartArtifact,
) -> std::result::Result<Vec<(i32, i32)>, DrawingAreaErrorKind<DB::ErrorType>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&artifact.title, (FONT, 20.0))
        .margin(10)
        .x_label_area_size(x_label_area_px(artifact))
        .y_label_area_size(60)
        .build_cartesian_2d(artifact.x_range(), 0f64..artifact.y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.15))
        .x_desc(artifact.x_axis_label.as_str())
        .y_desc(artifact.y_axis_label.as_str())
        .x_labels(artifact.ticks.len())
        .x_label_formatter(&|x| tick_text(&artifact.ticks, *x))
        .x_label_style(
            (FONT, TICK_FONT_SIZE)
                .into_font()
                .transform(quarter_turn(artifact.tick_rotation_deg)),
        )
        .draw()?;

    let half = artifact.bar_width / 2.0;
    for group in &artifact.groups {
        let color = group.color;
        chart
            .draw_series(group.bars.iter().map(|bar| {
                Rectangle::new(
                    [(bar.x - half, 0.0), (bar.x + half, bar.height)],
                    color.filled(),
                )
            }))?
            .label(group.series.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    // Value labels are written into the document afterwards, at their exact
    // angle; only their pixel anchors come from the chart.
    let anchors = artifact
        .labels
        .iter()
        .map(|label| chart.backend_coord(&(label.x, label.y)))
        .collect();

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(anchors)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// SVG `<text>` elements for the value labels, rotated counter-clockwise by
/// each label's angle about its anchor.
fn label_elements(artifact: &ChartArtifact, anchors: &[(i32, i32)]) -> String {
    let mut out = String::new();
    for (label, &(x, y)) in artifact.labels.iter().zip(anchors) {
        let upright = label.rotation_deg.rem_euclid(360.0) == 0.0;
        let anchor = if upright { "middle" } else { "start" };
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" font-family=\"{FONT}\" font-size=\"{}\" fill=\"#000000\" \
             text-anchor=\"{anchor}\" transform=\"rotate({}, {x}, {y})\">{}</text>\n",
            artifact.label_font_size,
            -label.rotation_deg,
            escape_xml(&label.text),
        ));
    }
    out
}

/// Renders the whole chart into an in-memory SVG document.
pub fn render_svg(artifact: &ChartArtifact) -> Result<String> {
    let tick_deg = artifact.tick_rotation_deg;
    if (tick_deg / 90.0).fract() != 0.0 {
        warn!(
            "tick label rotation {tick_deg} deg drawn as the nearest quarter turn ({} deg)",
            (tick_deg / 90.0).round() * 90.0
        );
    }

    let mut svg = String::new();
    let anchors = {
        let root = SVGBackend::with_string(&mut svg, artifact.size).into_drawing_area();
        draw_chart(&root, artifact).map_err(|err| ChartError::Render(err.to_string()))?
    };
    let end = svg
        .rfind("</svg>")
        .ok_or_else(|| ChartError::Render("svg document is not closed".to_string()))?;
    svg.insert_str(end, &label_elements(artifact, &anchors));
    debug!(bytes = svg.len(), "rendered svg");
    Ok(svg)
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chart.svg".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Writes `bytes` to the staging file through `write`, then renames it onto
/// `path`. The staging file is removed on any failure.
fn commit_staged<W>(path: &Path, bytes: &[u8], write: W) -> Result<()>
where
    W: FnOnce(&Path, &[u8]) -> std::io::Result<()>,
{
    let staging = staging_path(path);
    if let Err(err) = write(&staging, bytes) {
        let _ = fs::remove_file(&staging);
        return Err(ChartError::io(&staging, err));
    }
    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(ChartError::io(path, err));
    }
    Ok(())
}

/// Renders and writes the chart to `path`.
///
/// The document is written to a sibling staging file and renamed into place,
/// so a failure never leaves a truncated chart at `path`.
pub fn save_svg(artifact: &ChartArtifact, path: &Path) -> Result<()> {
    let svg = render_svg(artifact)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ChartError::io(parent, err))?;
    }
    commit_staged(path, svg.as_bytes(), |staging, bytes| fs::write(staging, bytes))?;

    info!("saved chart to {}", path.display());
    Ok(())
}

impl ChartArtifact {
    pub fn to_svg(&self) -> Result<String> {
        render_svg(self)
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        save_svg(self, path.as_ref())
    }
}
