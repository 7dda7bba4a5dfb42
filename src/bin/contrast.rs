// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use dotally::contrast::{contrast, swatch, Palette, Rgb};

use anyhow::Result;
use clap::Parser;
use std::process::exit;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(about, override_usage = "contrast [options]", version)]
struct Cli {
    /// Number of sample points across the 24-bit color cube.
    #[arg(short, long, default_value_t = 20_000)]
    pub steps: u32,

    /// Minimum luminance contrast a candidate must keep.
    #[arg(short, long, default_value_t = 1.8)]
    pub threshold: f64,

    /// Foreground palette color in hex notation, repeatable.
    #[arg(short, long = "foreground", value_name = "color")]
    pub foregrounds: Vec<Rgb>,

    /// Background palette color in hex notation, repeatable.
    #[arg(short, long = "background", value_name = "color")]
    pub backgrounds: Vec<Rgb>,
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

    let palette = if opts.foregrounds.is_empty() && opts.backgrounds.is_empty() {
        Palette::solarized_dark()
    } else {
        Palette::new(opts.foregrounds, opts.backgrounds)
    };

    for candidate in palette.sweep(opts.steps, opts.threshold) {
        print!("{:6.2} minCont : ", candidate.min_contrast);
        for fore in &palette.foregrounds {
            print_sample(*fore, candidate.color);
        }
        for back in &palette.backgrounds {
            print_sample(candidate.color, *back);
        }
        println!();
    }

    Ok(())
}

fn print_sample(fore: Rgb, back: Rgb) {
    let cont = contrast(fore.luminance(), back.luminance());
    print!(
        "{cont:6.2} cont : fore {fore} back {back}   {}  ",
        swatch(fore, back)
    );
}
