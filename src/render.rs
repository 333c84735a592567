use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use plotters::prelude::*;
use regex::Regex;

use crate::config::ChartConfig;
use crate::errors::HarnessError;
use crate::types::{BenchmarkData, BenchmarkRecord, UNLABELED};

pub const X_LABEL: &str = "Time (ms)";
pub const Y_LABEL: &str = "Benchmark Method";

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

static PARENTHESIZED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(.*?\)").expect("parenthesized pattern is valid"));

/// Everything needed to draw one section's horizontal bar chart.
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    pub title: String,
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// One bar per record, bottom to top in record order.
    pub bars: &'a [BenchmarkRecord],
    pub width: u32,
    pub height: u32,
}

/// Draws a [`BarChart`] to a file, replacing whatever is already there.
pub trait ChartRenderer {
    fn render(&self, chart: &BarChart<'_>, path: &Path) -> Result<()>;
}

/// PNG output through the plotters bitmap backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngRenderer;

impl ChartRenderer for PngRenderer {
    fn render(&self, chart: &BarChart<'_>, path: &Path) -> Result<()> {
        draw_png(chart, path).map_err(|e| {
            HarnessError::Render {
                path: path.to_path_buf(),
                detail: format!("{e:#}"),
            }
            .into()
        })
    }
}

fn draw_png(chart: &BarChart<'_>, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (chart.width, chart.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let count = chart.bars.len();
    let names: Vec<&str> = chart.bars.iter().map(|b| b.name.as_str()).collect();
    let longest = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) as u32;
    let slowest = chart
        .bars
        .iter()
        .map(|b| b.elapsed_ms)
        .fold(0.0_f64, f64::max);
    let x_max = if slowest > 0.0 { slowest * 1.05 } else { 1.0 };

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size((longest * 8 + 40).max(80).min(chart.width / 2))
        .build_cartesian_2d(0f64..x_max, bar_rows(count).into_segmented())?;

    ctx.configure_mesh()
        .disable_y_mesh()
        .x_desc(chart.x_label)
        .y_desc(chart.y_label)
        .y_labels(count.max(1))
        .y_label_formatter(&|v| row_label(&names, v))
        .draw()?;

    ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        let (bottom, top) = bar_span(i);
        let mut rect = Rectangle::new([(0.0, bottom), (bar.elapsed_ms, top)], SKY_BLUE.filled());
        rect.set_margin(6, 6, 0, 0);
        rect
    }))?;

    root.present()?;
    Ok(())
}

/// Y axis values for `count` bars. Never degenerate, even for zero or one bar.
fn bar_rows(count: usize) -> Range<usize> {
    0..count.max(1)
}

/// Segment occupied by bar `index`.
fn bar_span(index: usize) -> (SegmentValue<usize>, SegmentValue<usize>) {
    (SegmentValue::Exact(index), SegmentValue::Exact(index + 1))
}

fn row_label(names: &[&str], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(i) => names.get(*i).map(|n| n.to_string()).unwrap_or_default(),
        _ => String::new(),
    }
}

/// File stem for a section's chart.
///
/// Every parenthesized run (with the whitespace before it) is dropped, so
/// `"Object Size Benchmark (100 iterations) - Small Objects"` becomes
/// `"Object Size Benchmark - Small Objects"`. Path separators become `_`.
pub fn clean_section_name(label: &str) -> String {
    let stripped = PARENTHESIZED_RE.replace_all(label, "");
    let cleaned: String = stripped
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        UNLABELED.to_string()
    } else {
        cleaned
    }
}

/// Render one chart per section into `results_dir`, creating it if needed.
///
/// Returns the written paths in section order. Two sections that clean to
/// the same name share a file; the later one wins.
pub fn plot_benchmark_results(
    data: &BenchmarkData,
    results_dir: &Path,
    chart: ChartConfig,
    renderer: &impl ChartRenderer,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(results_dir).map_err(|source| HarnessError::CreateResultsDir {
        path: results_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(data.len());
    for (section, records) in data {
        let path = results_dir.join(format!("{}.png", clean_section_name(section.label())));
        let bar_chart = BarChart {
            title: format!("{} Performance", section.label()),
            x_label: X_LABEL,
            y_label: Y_LABEL,
            bars: records,
            width: chart.width,
            height: chart.height,
        };

        tracing::debug!(%section, bars = records.len(), path = %path.display(), "rendering chart");
        renderer.render(&bar_chart, &path)?;
        written.push(path);
    }

    Ok(written)
}
