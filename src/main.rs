// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use dotally::{history::GitLog, report, tally};

use anyhow::Result;
use clap::Parser;
use std::{io::stdout, path::PathBuf, process::exit};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "dotally <path> [<path>...]",
    version
)]
struct Cli {
    /// Files or directories to tally line authorship for.
    #[arg(value_name = "path")]
    pub paths: Vec<PathBuf>,
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    match run() {
        Ok(code) => exit(code),
        Err(error) => {
            error!("{error:?}");
            exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let opts = Cli::parse();

    if opts.paths.is_empty() {
        println!("dotally requires a filename / directory argument");
        return Ok(1);
    }

    let mut log = GitLog::open(opts.paths)?;
    let result = tally::scan(log.reader()?)?;
    let status = log.finish()?;

    // INVARIANT: Print no tally when the log facility fails.
    //   - Its diagnostics already went to stderr, and its exit code is the
    //     observable failure.
    if !status.success() {
        return Ok(status.code().unwrap_or(1));
    }

    report::write_report(stdout().lock(), &result)?;

    Ok(0)
}
