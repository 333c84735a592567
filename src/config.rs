use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::errors::HarnessError;

/// File looked up in the working directory when no `--config` is given.
pub const LOCAL_CONFIG_FILE: &str = "arena-bench.toml";

pub const DEFAULT_ITERATIONS: &str = "1000000";

#[cfg(windows)]
const DEFAULT_BENCHMARK_BINARY: &str = "build/windows/x64/release/arena.exe";
#[cfg(not(windows))]
const DEFAULT_BENCHMARK_BINARY: &str = "build/linux/x86_64/release/arena";

/// Everything the harness needs to know about where to build, run and write.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub working_dir: PathBuf,
    /// Program and arguments of the build step. Empty disables the build.
    pub build_command: Vec<String>,
    pub benchmark_binary: PathBuf,
    pub results_dir: PathBuf,
    pub default_iterations: String,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            build_command: vec!["xmake".to_string(), "build".to_string()],
            benchmark_binary: PathBuf::from(DEFAULT_BENCHMARK_BINARY),
            results_dir: PathBuf::from("results"),
            default_iterations: DEFAULT_ITERATIONS.to_string(),
            chart: ChartConfig::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

impl HarnessConfig {
    /// Parse a TOML document. Missing keys fall back to defaults.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            HarnessError::ConfigParse {
                path: path.to_path_buf(),
                detail: e.message().to_string(),
            }
            .into()
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(HarnessError::ConfigNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let text = std::fs::read_to_string(path).map_err(|source| HarnessError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load the config for a run.
    ///
    /// An explicit path must exist. Otherwise `arena-bench.toml` in
    /// `working_dir`, then `<config dir>/arena-bench/config.toml`, then defaults.
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading explicit config");
            return Self::from_file(path);
        }

        let candidates = [
            Some(working_dir.join(LOCAL_CONFIG_FILE)),
            dirs::config_dir().map(|d| d.join("arena-bench").join("config.toml")),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// `path` relative to the working directory, unless already absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    pub fn benchmark_binary_path(&self) -> PathBuf {
        self.resolve(&self.benchmark_binary)
    }

    pub fn results_dir_path(&self) -> PathBuf {
        self.resolve(&self.results_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_the_stock_layout() {
        let config = HarnessConfig::default();
        assert_eq!(config.build_command, vec!["xmake", "build"]);
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.default_iterations, "1000000");
        assert_eq!(config.chart, ChartConfig { width: 1000, height: 600 });
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = HarnessConfig::from_toml(
            "benchmark_binary = \"out/arena\"\n[chart]\nwidth = 1600\n",
            Path::new("test.toml"),
        )
        .unwrap();
        assert_eq!(config.benchmark_binary, PathBuf::from("out/arena"));
        assert_eq!(config.chart.width, 1600);
        assert_eq!(config.chart.height, 600);
        assert_eq!(config.build_command, vec!["xmake", "build"]);
    }

    #[test]
    fn empty_build_command_is_allowed() {
        let config =
            HarnessConfig::from_toml("build_command = []\n", Path::new("test.toml")).unwrap();
        assert!(config.build_command.is_empty());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = HarnessConfig::from_toml("iterations = 5\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HarnessError>(),
            Some(HarnessError::ConfigParse { .. })
        ));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn explicit_missing_config_errors() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = HarnessConfig::load(Some(&missing), tmp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HarnessError>(),
            Some(HarnessError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "build_command = [\"make\", \"arena\"]").unwrap();
        writeln!(file, "default_iterations = \"5000\"").unwrap();

        let config = HarnessConfig::load(Some(file.path()), Path::new(".")).unwrap();
        assert_eq!(config.build_command, vec!["make", "arena"]);
        assert_eq!(config.default_iterations, "5000");
    }

    #[test]
    fn local_config_file_is_picked_up() {
        let tmp = assert_fs::TempDir::new().unwrap();
        fs::write(
            tmp.path().join(LOCAL_CONFIG_FILE),
            "results_dir = \"charts\"\n",
        )
        .unwrap();
        let config = HarnessConfig::load(None, tmp.path()).unwrap();
        assert_eq!(config.results_dir, PathBuf::from("charts"));
    }

    #[test]
    fn resolve_is_relative_to_working_dir() {
        let config = HarnessConfig {
            working_dir: PathBuf::from("/work"),
            ..HarnessConfig::default()
        };
        assert_eq!(config.results_dir_path(), PathBuf::from("/work/results"));
        let abs = std::env::temp_dir().join("arena");
        assert_eq!(config.resolve(&abs), abs);
    }
}
