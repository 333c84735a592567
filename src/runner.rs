use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::Result;

use crate::config::HarnessConfig;
use crate::errors::HarnessError;

/// Build the benchmark suite, then run it once and return its stdout.
///
/// Neither exit status is treated as a failure: a benchmark binary that
/// exits non-zero after printing partial results still has those results
/// returned. Only failing to launch a process is an error.
pub fn run_benchmarks(config: &HarnessConfig, iterations: &str) -> Result<String> {
    run_build(config)?;
    capture_benchmark_output(config, iterations)
}

/// Run the configured build command in the working directory, stdio inherited.
pub fn run_build(config: &HarnessConfig) -> Result<()> {
    let Some((program, args)) = config.build_command.split_first() else {
        tracing::debug!("no build command configured, skipping build");
        return Ok(());
    };

    tracing::info!(command = %config.build_command.join(" "), "building benchmarks");
    let status = Command::new(program)
        .args(args)
        .current_dir(&config.working_dir)
        .status()
        .map_err(|source| HarnessError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !status.success() {
        tracing::warn!(%status, "build command exited unsuccessfully, continuing");
    }
    Ok(())
}

/// Run the benchmark binary with `iterations` as its only argument.
///
/// Stdout is captured and decoded lossily; stderr goes straight to the terminal.
pub fn capture_benchmark_output(config: &HarnessConfig, iterations: &str) -> Result<String> {
    // The child starts inside `working_dir`, so a relative path would be
    // resolved against it a second time.
    let binary = config.benchmark_binary_path();
    let binary = std::path::absolute(&binary).map_err(|source| spawn_error(&binary, source))?;
    tracing::info!(binary = %binary.display(), iterations, "running benchmarks");

    let output = Command::new(&binary)
        .arg(iterations)
        .current_dir(&config.working_dir)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|source| spawn_error(&binary, source))?;

    if !output.status.success() {
        tracing::warn!(
            status = %output.status,
            "benchmark binary exited unsuccessfully, parsing its output anyway"
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn spawn_error(program: &Path, source: std::io::Error) -> HarnessError {
    HarnessError::Spawn {
        program: program.display().to_string(),
        source,
    }
}
