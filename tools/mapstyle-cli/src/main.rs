//! Mapstyle CLI - Command-line interface for the Elm binding generator
//!
//! This tool reads the Mapbox GL style specification document and regenerates
//! the `Mapbox.Layer` Elm module checked into the consuming package.

use clap::{Parser, Subcommand};
use commands::generate::GenerateCommand;

mod commands;
mod error;

/// Mapstyle CLI - Generate Elm bindings from the Mapbox GL style spec
#[derive(Debug, Parser)]
#[command(name = "mapstyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the Mapbox.Layer module from a style spec document
    #[command(name = "generate")]
    Generate(GenerateCommand),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(cmd) => cmd.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
