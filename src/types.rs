use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Label used for results that appear before any section header.
pub const UNLABELED: &str = "Unlabeled";

/// Key of a group of benchmark results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Section {
    /// Results seen before any `=== name ===` header.
    Unlabeled,
    /// A non-empty, trimmed section label.
    Named(String),
}

impl Section {
    /// Build a section from a raw header label. Blank labels collapse to `Unlabeled`.
    pub fn named(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            Section::Unlabeled
        } else {
            Section::Named(label.to_string())
        }
    }

    /// Key for an object-size subsection of this section.
    pub fn with_subsection(&self, size: ObjectSize) -> Self {
        Section::Named(format!("{} - {} Objects", self.label(), size))
    }

    pub fn label(&self) -> &str {
        match self {
            Section::Unlabeled => UNLABELED,
            Section::Named(label) => label,
        }
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        matches!(self, Section::Named(label) if label.starts_with(prefix))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Object size category used by the object-size benchmark subsections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectSize {
    Small,
    Medium,
    Large,
}

impl ObjectSize {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "Small" => Some(ObjectSize::Small),
            "Medium" => Some(ObjectSize::Medium),
            "Large" => Some(ObjectSize::Large),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            ObjectSize::Small => "Small",
            ObjectSize::Medium => "Medium",
            ObjectSize::Large => "Large",
        };
        f.write_str(word)
    }
}

/// One `name : 1.234 ms` measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRecord {
    pub name: String,
    pub elapsed_ms: f64,
}

impl BenchmarkRecord {
    pub fn new(name: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            name: name.into(),
            elapsed_ms,
        }
    }
}

/// Parsed results, keyed by section in order of first appearance.
pub type BenchmarkData = IndexMap<Section, Vec<BenchmarkRecord>>;
