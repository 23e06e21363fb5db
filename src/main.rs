//! Stack Source Mapper CLI
//!
//! Resolves minified JavaScript stack traces back to their original
//! sources using the `.map` files in a directory.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use stack_source_mapper::commands::{
    execute_map, execute_parse, validate_args, MapArgs, MapInput, ParseArgs,
};
use stack_source_mapper::mapper::MappingOptions;
use stack_source_mapper::utils::config::{
    DEFAULT_SNIPPET_RADIUS, FRAMES_SCHEMA_VERSION, MAPS_DIR_ENV,
};

/// Stack Source Mapper - original locations for minified stack traces
#[derive(Parser, Debug)]
#[command(name = "stack-source-mapper")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Map a stack trace through source maps
    Map {
        /// Directory containing the .map files
        #[arg(short, long, env = MAPS_DIR_ENV)]
        maps: PathBuf,

        /// Stack trace text file (reads stdin when omitted)
        #[arg(short, long, conflicts_with = "frames")]
        trace: Option<PathBuf>,

        /// JSON frame document produced by `parse`
        #[arg(long)]
        frames: Option<PathBuf>,

        /// Only accept map files named exactly `<file>.map`
        #[arg(long)]
        strict: bool,

        /// Include original source lines around each frame
        #[arg(long)]
        snippet: bool,

        /// Lines before/after the mapped line in snippets
        #[arg(long, default_value_t = DEFAULT_SNIPPET_RADIUS)]
        radius: usize,

        /// Write mapped frames as JSON to this path instead of printing text
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Parse a stack trace into a JSON frame document
    Parse {
        /// Stack trace text file (reads stdin when omitted)
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Output path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Map {
            maps,
            trace,
            frames,
            strict,
            snippet,
            radius,
            json,
        } => {
            let input = match frames {
                Some(path) => MapInput::Frames(path),
                None => MapInput::Trace(trace),
            };

            let args = MapArgs {
                maps_dir: maps,
                input,
                options: MappingOptions::new()
                    .with_strict_matching(strict)
                    .with_snippet(snippet)
                    .with_snippet_radius(radius),
                output_json: json,
            };

            // Validate args first
            validate_args(&args)?;

            execute_map(args)?;
        }

        Commands::Parse { trace, output } => {
            execute_parse(ParseArgs { trace, output })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Stack Source Mapper v{}", env!("CARGO_PKG_VERSION"));
    println!("Frame document schema: v{}", FRAMES_SCHEMA_VERSION);
}
