//! CLI argument parsing using clap derive

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

/// Folder Mirror - keep a replica directory identical to a source directory
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Mirror source onto replica repeatedly until Ctrl-C
    ///
    /// Missing options are prompted for when running in a terminal.
    ///
    /// Examples:
    ///   mirror run -s ./src -r ./backup -i 00:05:00 -l mirror.log
    ///   mirror run -c mirror.toml
    Run {
        #[command(flatten)]
        session: SessionArgs,

        /// Time between passes, as HH:MM:SS or seconds
        #[arg(short, long, value_parser = parse_interval_arg)]
        interval: Option<Duration>,
    },

    /// Run a single pass and exit
    Once {
        #[command(flatten)]
        session: SessionArgs,

        /// Print the pass summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options shared by every command that runs a pass
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionArgs {
    /// Source folder to mirror
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Replica folder to keep identical to the source
    #[arg(short, long)]
    pub replica: Option<PathBuf>,

    /// File that receives the log
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Settings file (.toml, .json, .yaml); command-line options win
    #[arg(short, long, env = "MIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fail instead of prompting for missing options
    #[arg(long)]
    pub no_prompt: bool,
}

fn parse_interval_arg(value: &str) -> Result<Duration, String> {
    mirror_core::parse_interval(value).map_err(|e| e.to_string())
}
