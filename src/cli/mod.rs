//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod generate;
mod palette;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Pixmon - Procedural pixel monsters from a text description
#[derive(Parser)]
#[command(name = "pixmon")]
#[command(about = "Pixmon - Procedural pixel monsters from a text description")]
#[command(version)]
pub struct Cli {
    /// Path to pixmon.toml (default: discovered from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a batch of creatures with matching sound effects
    Generate {
        /// What the creature looks like, e.g. "angry fire dragon"
        description: String,

        /// Output directory. If omitted: ./{description}_{n}.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result as JSON instead of writing files
        #[arg(long)]
        json: bool,

        /// Sprite size in pixels: 32, 64 or 128
        #[arg(long, value_parser = clap::value_parser!(u32))]
        size: Option<u32>,

        /// Number of creatures, 1 to 4
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=4))]
        quantity: Option<u8>,

        /// Palette override: 3 to 5 comma-separated CSS colors
        #[arg(long, value_delimiter = ',')]
        colors: Vec<String>,

        /// Enhancement service URL
        #[arg(long, conflicts_with = "offline")]
        endpoint: Option<String>,

        /// Never contact the enhancement service
        #[arg(long)]
        offline: bool,

        /// Directory holding the sound effect clips
        #[arg(long)]
        audio_root: Option<PathBuf>,

        /// Extra token mixed into each local item for a different batch
        #[arg(long)]
        batch_token: Option<String>,
    },

    /// Show the palette and body plan chosen for a description
    Palette {
        /// Creature description
        description: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            description,
            output,
            json,
            size,
            quantity,
            colors,
            endpoint,
            offline,
            audio_root,
            batch_token,
        } => generate::run_generate(
            &description,
            cli.config.as_deref(),
            output.as_deref(),
            json,
            crate::config::CliOverrides {
                endpoint,
                offline,
                pixel_size: size,
                quantity,
                audio_root,
            },
            colors,
            batch_token,
        ),
        Commands::Palette { description, json } => palette::run_palette(&description, json),
    }
}
