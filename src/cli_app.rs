//! Top-level CLI definition and dispatch.

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell as CompletionShell, generate};
use colored::control;

use slowrm::core::config::{Config, default_chunk_mb, default_sleep_secs};
use slowrm::core::errors::Result;
use slowrm::core::report::StderrReporter;
use slowrm::engine::driver::Driver;

/// Remove paths while pacing deletion I/O.
#[derive(Debug, Parser)]
#[command(
    name = "slowrm",
    author,
    version,
    about = "Remove files and directories without flooding the disk",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Dive into directories recursively.
    #[arg(short, long)]
    recursive: bool,
    /// Chunk size in megabytes.
    #[arg(short, long, value_name = "SIZE_MB", default_value_t = default_chunk_mb())]
    chunk: u64,
    /// Sleep time between chunks, in seconds.
    #[arg(short, long, value_name = "SECONDS", default_value_t = default_sleep_secs())]
    sleep: f64,
    /// Continue on errors (by default bail on everything).
    #[arg(short, long)]
    force: bool,
    /// Only operate on one file system.
    #[arg(short = 'x', long)]
    one_file_system: bool,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
    /// Generate shell completions and exit.
    #[arg(long, value_name = "SHELL")]
    completions: Option<CompletionShell>,
    /// Paths to remove.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
}

/// Validate the parsed arguments and run the deletion engine.
pub fn run(cli: &Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "slowrm", &mut io::stdout());
        return Ok(());
    }

    if cli.no_color {
        control::set_override(false);
    }

    let config = Config::new(
        cli.recursive,
        cli.chunk,
        cli.sleep,
        cli.force,
        cli.one_file_system,
        cli.paths.clone(),
    )?;

    let mut reporter = StderrReporter::new();
    Driver::new(&config, &mut reporter).run()
}
