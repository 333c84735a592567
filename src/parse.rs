use std::sync::LazyLock;

use regex::Regex;

use crate::types::{BenchmarkData, BenchmarkRecord, ObjectSize, Section};

/// Sections whose results are split into Small/Medium/Large subsections.
pub const OBJECT_SIZE_PREFIX: &str = "Object Size Benchmark";

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=== (.*?) ===").expect("section pattern is valid"));

static SUBSECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Small|Medium|Large) Objects:").expect("subsection pattern is valid")
});

static RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\n:]+)\s*:\s*([0-9]+\.[0-9]+)\s*ms").expect("result pattern is valid")
});

/// Parse the benchmark executable's stdout into per-section timing records.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. They are trimmed and classified
/// in order: section header, object-size subsection (only inside an
/// `Object Size Benchmark` section), result line.
/// Anything else is ignored. Results seen before the first header are filed
/// under [`Section::Unlabeled`].
pub fn parse_benchmark_output(text: &str) -> BenchmarkData {
    let mut data = BenchmarkData::new();
    let mut section: Option<Section> = None;
    let mut subsection: Option<Section> = None;

    for raw in text.split(['\n', '\r']) {
        let line = raw.trim();

        if let Some(caps) = SECTION_RE.captures(line) {
            section = Some(Section::named(&caps[1]));
            subsection = None;
            continue;
        }

        if let Some(current) = section.as_ref().filter(|s| s.starts_with(OBJECT_SIZE_PREFIX))
            && let Some(size) = match_subsection(line)
        {
            let key = current.with_subsection(size);
            data.insert(key.clone(), Vec::new());
            subsection = Some(key);
            continue;
        }

        if let Some(record) = match_result(line) {
            let key = subsection
                .clone()
                .or_else(|| section.clone())
                .unwrap_or(Section::Unlabeled);
            data.entry(key).or_default().push(record);
        }
    }

    data
}

fn match_subsection(line: &str) -> Option<ObjectSize> {
    let caps = SUBSECTION_RE.captures(line)?;
    ObjectSize::from_word(&caps[1])
}

fn match_result(line: &str) -> Option<BenchmarkRecord> {
    let caps = RESULT_RE.captures(line)?;
    let name = caps[1].trim();
    match caps[2].parse::<f64>() {
        Ok(elapsed_ms) => Some(BenchmarkRecord::new(name, elapsed_ms)),
        Err(err) => {
            tracing::debug!(line, %err, "skipping result line with unparseable time");
            None
        }
    }
}
