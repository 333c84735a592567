use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use arena_bench::config::HarnessConfig;
use arena_bench::display;
use arena_bench::errors::HarnessError;
use arena_bench::logging;
use arena_bench::parse;
use arena_bench::render::{self, PngRenderer};
use arena_bench::runner;

#[derive(Parser)]
#[command(
    name = "arena-bench",
    version,
    about = "Build, run and chart the arena allocator benchmark suite"
)]
struct Cli {
    /// Iteration count, passed verbatim to the benchmark binary
    #[arg(allow_hyphen_values = true)]
    iterations: Option<String>,

    /// Config file (default: ./arena-bench.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory to build and run in
    #[arg(short = 'C', long, value_name = "DIR")]
    working_dir: Option<PathBuf>,

    /// Benchmark executable, relative to the working directory
    #[arg(long, value_name = "PATH")]
    binary: Option<PathBuf>,

    /// Where charts are written, relative to the working directory
    #[arg(long, value_name = "DIR")]
    results_dir: Option<PathBuf>,

    #[arg(long)]
    skip_build: bool,

    /// Parse previously captured output instead of running ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    #[arg(long)]
    json: bool,

    #[arg(long)]
    no_plots: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_input(path: &Path) -> Result<String> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|source| HarnessError::InputRead {
                path: path.to_path_buf(),
                source,
            })?;
        buf
    } else {
        std::fs::read(path).map_err(|source| HarnessError::InputRead {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let lookup_dir = cli.working_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut config = HarnessConfig::load(cli.config.as_deref(), &lookup_dir)?;
    if let Some(dir) = cli.working_dir {
        config.working_dir = dir;
    }
    if let Some(binary) = cli.binary {
        config.benchmark_binary = binary;
    }
    if let Some(dir) = cli.results_dir {
        config.results_dir = dir;
    }
    if cli.skip_build {
        config.build_command.clear();
    }

    let output = match &cli.input {
        Some(path) => {
            if cli.iterations.is_some() {
                tracing::warn!("--input given, ignoring iteration count");
            }
            read_input(path)?
        }
        None => {
            let iterations = match cli.iterations {
                Some(n) => n,
                None => {
                    let notice = format!(
                        "Running benchmark with default iterations: {}",
                        config.default_iterations
                    );
                    // Keep stdout clean for the JSON report.
                    if cli.json {
                        eprintln!("{}", notice);
                    } else {
                        println!("{}", notice);
                    }
                    config.default_iterations.clone()
                }
            };
            runner::run_benchmarks(&config, &iterations)?
        }
    };

    let data = parse::parse_benchmark_output(&output);
    tracing::info!(sections = data.len(), "parsed benchmark output");

    let results_dir = config.results_dir_path();
    let written = if cli.no_plots {
        Vec::new()
    } else {
        render::plot_benchmark_results(&data, &results_dir, config.chart, &PngRenderer)?
    };

    if cli.json {
        println!("{}", display::format_json(&data, Utc::now()));
    } else {
        print!("{}", display::format_summary(&data, &written, &results_dir));
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
