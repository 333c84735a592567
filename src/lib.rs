pub mod config;
pub mod display;
pub mod errors;
pub mod logging;
pub mod parse;
pub mod render;
pub mod runner;
pub mod types;

#[cfg(test)]
mod pipeline_tests {
    // Parse and render agree on naming: every parsed section maps to exactly
    // the file name the JSON report advertises.

    use crate::config::ChartConfig;
    use crate::display::format_json;
    use crate::parse::parse_benchmark_output;
    use crate::render::{BarChart, ChartRenderer, plot_benchmark_results};

    struct TouchRenderer;

    impl ChartRenderer for TouchRenderer {
        fn render(&self, _chart: &BarChart<'_>, path: &std::path::Path) -> anyhow::Result<()> {
            std::fs::write(path, b"")?;
            Ok(())
        }
    }

    const OUTPUT: &str = "\
=== Simple Allocation Benchmark (100 iterations) ===
new/delete : 1.250 ms
Arena allocator : 0.250 ms
=== Object Size Benchmark (100 iterations) ===
Small Objects:
new/delete : 1.000 ms
Large Objects:
new/delete : 3.000 ms
=== Fragmentation Benchmark ===
Arena allocator : 0.900 ms
";

    #[test]
    fn report_file_stems_match_written_files() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let data = parse_benchmark_output(OUTPUT);
        let written =
            plot_benchmark_results(&data, tmp.path(), ChartConfig::default(), &TouchRenderer)
                .unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&format_json(&data, chrono::Utc::now())).unwrap();
        let stems: Vec<String> = report["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["file_stem"].as_str().unwrap().to_string())
            .collect();
        let written_stems: Vec<String> = written
            .iter()
            .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(stems, written_stems);
        assert_eq!(
            written_stems,
            vec![
                "Simple Allocation Benchmark",
                "Object Size Benchmark - Small Objects",
                "Object Size Benchmark - Large Objects",
                "Fragmentation Benchmark",
            ]
        );
    }
}
