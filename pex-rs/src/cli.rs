//! Root CLI structure for pex-rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::simulate::SimulateArgs;

#[derive(Parser)]
#[command(name = "pex-rs")]
#[command(about = "Command-line tools for particle emitter descriptors", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display the parameters stored in a descriptor
    Info {
        /// Path to the descriptor file
        file: PathBuf,
    },

    /// Run an emitter headless and report particle counts
    Simulate(SimulateArgs),

    /// Write a sample descriptor
    Template {
        /// Path to write the descriptor to
        output: PathBuf,

        /// Built-in emitter to write (fire, galaxy)
        #[arg(short, long, default_value = "fire")]
        preset: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
