use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;

use crate::render::clean_section_name;
use crate::types::{BenchmarkData, BenchmarkRecord};

/// Format a time in milliseconds with three decimals, like the benchmark does.
pub fn format_ms(ms: f64) -> String {
    format!("{:.3} ms", ms)
}

fn fastest(records: &[BenchmarkRecord]) -> Option<&BenchmarkRecord> {
    records
        .iter()
        .min_by(|a, b| a.elapsed_ms.total_cmp(&b.elapsed_ms))
}

fn style_section() -> Style {
    Style::new().cyan().bold()
}

/// Console summary: one line per section, then where the charts went.
pub fn format_summary(data: &BenchmarkData, written: &[PathBuf], results_dir: &Path) -> String {
    let mut out = String::new();

    if data.is_empty() {
        out.push_str(
            &"No benchmark results found in output."
                .if_supports_color(Stream::Stdout, |s| s.yellow())
                .to_string(),
        );
        out.push('\n');
    } else {
        let label_width = data.keys().map(|k| k.label().len()).max().unwrap_or(0);
        let section_style = style_section();

        for (section, records) in data {
            let label = format!("{:<width$}", section.label(), width = label_width);
            let label_colored = label
                .if_supports_color(Stream::Stdout, |s| s.style(section_style))
                .to_string();

            let count = format!(
                "{:>3} result{}",
                records.len(),
                if records.len() == 1 { "" } else { "s" }
            );

            let best = match fastest(records) {
                Some(record) => format!(
                    "fastest: {} ({})",
                    record.name,
                    format_ms(record.elapsed_ms)
                        .if_supports_color(Stream::Stdout, |s| s.green())
                ),
                None => "(no results)"
                    .if_supports_color(Stream::Stdout, |s| s.dimmed())
                    .to_string(),
            };

            out.push_str(&format!("  {}  {}  {}\n", label_colored, count, best));
        }
    }

    if !written.is_empty() {
        out.push('\n');
        let footer = format!(
            "Wrote {} chart{} to {}",
            written.len(),
            if written.len() == 1 { "" } else { "s" },
            results_dir.display()
        );
        out.push_str(
            &footer
                .if_supports_color(Stream::Stdout, |s| s.dimmed())
                .to_string(),
        );
        out.push('\n');
    }

    out
}

/// JSON output format.
#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    sections: Vec<JsonSection<'a>>,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    section: &'a str,
    file_stem: String,
    records: &'a [BenchmarkRecord],
}

pub fn format_json(data: &BenchmarkData, now: DateTime<Utc>) -> String {
    let report = JsonReport {
        generated_at: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        sections: data
            .iter()
            .map(|(section, records)| JsonSection {
                section: section.label(),
                file_stem: clean_section_name(section.label()),
                records,
            })
            .collect(),
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}
