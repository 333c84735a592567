use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum HarnessError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Config file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("Failed to read benchmark output from {path}: {source}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not create results directory {path}: {source}")]
    CreateResultsDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to render chart {path}: {detail}")]
    Render { path: PathBuf, detail: String },
}
