//! Folder Mirror CLI
//!
//! Keeps a replica folder identical to a source folder, once or on an
//! interval.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;
mod render;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.verbose),
        None => {
            println!("{} Folder Mirror", "mirror".green().bold());
            println!();
            println!("Run {} for available commands.", "mirror --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, verbose: bool) -> Result<()> {
    match cmd {
        Commands::Run { session, interval } => commands::run_watch(&session, interval, verbose),
        Commands::Once { session, json } => commands::run_single(&session, json, verbose),
    }
}
