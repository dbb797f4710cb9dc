//! tocspy - table of contents and scroll-spy for Markdown blog posts.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tocspy::cli::{self, Cli, Commands};
use tocspy::config::TocConfig;
use tocspy::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = TocConfig::load(&cli)?;

    match &cli.command {
        Commands::Outline { args } => cli::outline::run_outline(args, &config),
        Commands::Spy { args } => cli::spy::run_spy(args, &config),
        Commands::Tags { args } => cli::tags::run_tags(args, &config),
    }
}
