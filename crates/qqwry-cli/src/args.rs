use clap::{Parser, Subcommand};
use qqwry_core::SourceMode;

/// CLI arguments for qqwry
#[derive(Debug, Parser)]
#[command(
    name = "qqwry",
    version,
    about = "Look up IPv4 addresses in a qqwry.dat geolocation database"
)]
pub struct CliArgs {
    /// Path to the database (default: $QQWRY_PATH, then the bundled data/qqwry.dat)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// Backing source: "file" or "memory" (default: $QQWRY_MODE, then memory)
    #[arg(short = 'm', long = "mode", global = true)]
    pub mode: Option<SourceMode>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up one or more addresses
    Query {
        /// Dotted-quad IPv4 addresses (e.g. 1.0.0.1)
        #[arg(required = true)]
        ips: Vec<String>,

        /// Print one JSON object per address
        #[arg(long)]
        json: bool,
    },

    /// Print the database build identifier
    Version,

    /// Show a summary of the database header
    Stats,
}
