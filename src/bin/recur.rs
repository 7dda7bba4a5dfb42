// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use dotally::temporal::{self, suggest_alias};

use anyhow::Result;
use clap::Parser;
use std::{fs::File, io::BufReader, path::PathBuf, process::exit};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(about, override_usage = "recur [options]", version)]
struct Cli {
    /// Minimum non-adjacent days a pattern must recur on.
    #[arg(short, long, default_value_t = 5)]
    pub min_days: usize,

    /// Number of top patterns to show per section.
    #[arg(short = 'n', long, default_value_t = 15)]
    pub top: usize,

    /// History file to analyze, defaults to ~/.bash_history.
    #[arg(long, value_name = "path")]
    pub history: Option<PathBuf>,
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

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    let opts = Cli::parse();

    let path = match opts.history {
        Some(path) => path,
        None => temporal::default_history_path()?,
    };

    let file = File::open(&path)?;
    let entries = temporal::parse_history(BufReader::new(file))?;
    if entries.is_empty() {
        println!("No history entries found in {}.", path.display());
        return Ok(());
    }

    let analysis = temporal::analyze(&entries, opts.min_days);

    println!("Processed {} history entries from {}.", entries.len(), path.display());
    if let Some((first, last)) = analysis.period {
        println!("Dated activity spans {first} through {last}.");
    }
    println!(
        "Kept {} commands, skipped {} shell constructs and {} overlong words.",
        analysis.kept_commands, analysis.skipped_shell_constructs, analysis.skipped_overlong
    );
    println!(
        "{} recurring patterns past the {}-day filter, {} filtered out.",
        analysis.recurring().len(),
        opts.min_days,
        analysis.filtered_patterns
    );

    println!("\nTOP {} RECURRING COMMANDS", opts.top);
    println!("{:>4} {:>6} {:>5} {:>5}  command", "rank", "uses", "days", "span");
    for (rank, usage) in analysis.top_single_word(opts.top).iter().enumerate() {
        println!(
            "{:>4} {:>6} {:>5} {:>5}  {}",
            rank + 1,
            usage.count,
            usage.non_adjacent_days,
            usage.span_days,
            usage.pattern
        );
    }

    println!("\nALIAS SUGGESTIONS");
    for usage in analysis.top_multi_word(opts.top) {
        let alias = suggest_alias(&usage.pattern);
        let savings = usage.pattern.len().saturating_sub(alias.len()) as u64 * usage.count;
        println!(
            "alias {alias}='{}'  # {} uses over {} days, saves ~{savings} keystrokes",
            usage.pattern, usage.count, usage.non_adjacent_days
        );
    }

    Ok(())
}
