//! Command-line interface for pigpen.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pigpen - trap the pig on a hex board
#[derive(Parser, Debug)]
#[command(name = "pigpen")]
#[command(about = "Trap-the-pig board game with move advisors", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (optional)
    #[arg(short, long, global = true, default_value = "pigpen.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the lookahead advisor over HTTP
    Serve {
        /// Host to bind to (defaults to the config's server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to the config's server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play in the terminal against the pig
    Play {
        /// Seed for obstacles and pig tie-breaks
        #[arg(long)]
        seed: Option<u64>,

        /// Remote advisor for hints; the built-in one when absent
        #[arg(long)]
        advisor_url: Option<String>,
    },

    /// Let the advisor play the blocking side
    Auto {
        /// Seed for obstacles and pig tie-breaks
        #[arg(long)]
        seed: Option<u64>,

        /// Remote advisor; the built-in one when absent
        #[arg(long)]
        advisor_url: Option<String>,

        /// Stop after this many blocking rounds
        #[arg(long, default_value = "100")]
        max_rounds: u32,
    },
}
