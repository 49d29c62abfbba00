//! preview-links CLI entry point.
//!
//! Provides command-line tools for working with preview link templates:
//! - `preview-links placeholders` - List and check template placeholders
//! - `preview-links resolve` - Resolve a template against field values
//! - `preview-links urls` - Compose preview, live, and disable links
//! - `preview-links simulate` - Replay field and locale changes through a session

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_placeholders, run_resolve, run_simulate, run_urls, PlaceholdersArgs, ResolveArgs,
    SimulateArgs, UrlsArgs,
};
use tracing_subscriber::EnvFilter;

/// Preview link template tools.
#[derive(Debug, Parser)]
#[command(name = "preview-links")]
#[command(about = "Preview link template tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the placeholders of a path template
    Placeholders(PlaceholdersArgs),
    /// Resolve a path template against field values
    Resolve(ResolveArgs),
    /// Compose the preview links for a record
    Urls(UrlsArgs),
    /// Replay a script of record changes through a live session
    Simulate(SimulateArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool, color_when: ColorWhen) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(verbose)
        .with_ansi(!matches!(color_when, ColorWhen::Never))
        .try_init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose, cli.color);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Placeholders(args) => run_placeholders(args),
        Commands::Resolve(args) => run_resolve(args),
        Commands::Urls(args) => run_urls(args),
        Commands::Simulate(args) => run_simulate(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
