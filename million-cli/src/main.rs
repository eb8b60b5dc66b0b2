use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};

use million_cli::logging::{LogConfig, init_logging};
use million_cli::{Prompter, Session};
use million_core::{Estimator, TracingWarnings};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Road to $1,000,000: a rough estimate of how many years of saving it takes
/// to collect a million dollars after federal tax, payroll tax and expenses.
///
/// All inputs are asked for interactively.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Log level or filter directive. `RUST_LOG` wins when set.
    /// Warnings only show when this is lowered to `warn` or below.
    #[arg(long, default_value = "error")]
    log_level: String,

    /// Also append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn run() -> anyhow::Result<()> {
    let estimator = Estimator::for_2024().context("cannot load the built-in tax tables")?;

    let prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    Session::new(prompter, &estimator, &TracingWarnings)
        .run()
        .context("console session failed")
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: cli.log_level,
        file: cli.log_file,
    };
    if let Err(err) = init_logging(&log_config) {
        eprintln!("warning: logging disabled: {err:#}");
    }
    debug!(?log_config, "starting");

    // Failures are reported but never change the exit code.
    if let Err(err) = run() {
        error!("{err:#}");
        eprintln!("{err:#}");
    }
}
