//! Command line interface definition

use clap::{Parser, Subcommand};
use procpool_types::{ColorChoice, ReclaimStrategy};
use std::path::PathBuf;

/// procpool - Run shell commands with bounded concurrency
#[derive(Parser)]
#[command(name = "procpool")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run shell commands with bounded concurrency")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Maximum number of commands running at once
    #[arg(short = 'j', long, global = true, value_name = "N")]
    pub capacity: Option<usize>,

    /// Print what would run without starting anything
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Milliseconds between polls while waiting for a free slot
    #[arg(long, global = true, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// How many exited processes one polling round reclaims
    #[arg(long, global = true, value_enum)]
    pub reclaim: Option<ReclaimStrategy>,

    /// Shell program that interprets each command
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub shell: Option<String>,

    /// Output the final report in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to the state directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the given commands, and any read from a file
    #[command(alias = "r")]
    Run {
        /// Commands to run, each handed to the shell as one string
        commands: Vec<String>,

        /// Read one command per line from PATH (`-` for stdin)
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Run a command template against every file matching the patterns
    #[command(alias = "x")]
    Expand {
        /// Template with `{}`, `{name}`, `{stem}` or `{dir}` placeholders
        #[arg(short, long)]
        template: String,

        /// Directory the patterns are matched under
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Glob patterns such as `*.csv` or `logs/**/*.log`
        #[arg(required = true)]
        patterns: Vec<String>,
    },
}
