//! Cascara - a CSS/HTML asset emitter for build pipelines.

#![allow(dead_code)]

mod cli;
mod config;
mod emit;
mod logger;
mod matcher;
mod transform;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::EmitConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Some(args) = cli.build_args() {
        logger::set_verbose(args.verbose);
    }

    let config = EmitConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::run_build(&config),
        Commands::Check => cli::check::run_check(&config),
    }
}
