//! qqwry: look up IPv4 addresses from the terminal.
//!
//! Usage examples
//! --------------
//!
//! - Look up addresses
//!   $ qqwry -i qqwry.dat query 1.0.0.1 8.8.8.8
//!
//! - Same, as JSON lines, reading through the file instead of memory
//!   $ qqwry -i qqwry.dat -m file query --json 1.0.0.1
//!
//! - Print the database build identifier
//!   $ qqwry version
//!
//! - Show header statistics
//!   $ qqwry stats
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use qqwry_core::{DbConfig, QqwryDb, QqwryError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = DbConfig::from_env().context("invalid QQWRY_* environment")?;
    if let Some(input) = args.input {
        config.path = input.into();
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    debug!(?config, "resolved configuration");

    let db = QqwryDb::open_with(&config)
        .with_context(|| format!("failed to open {}", config.path.display()))?;

    match args.command {
        Commands::Query { ips, json } => {
            let mut failed = 0usize;
            for ip in &ips {
                let ip = ip.trim();
                match db.query(ip) {
                    Ok(record) if json => {
                        let mut value = serde_json::to_value(&record)?;
                        value["ip"] = ip.into();
                        println!("{value}");
                    }
                    Ok(record) => println!("{ip}\t{}\t{}", record.country, record.region),
                    Err(e @ QqwryError::NotFound(_)) | Err(e @ QqwryError::InvalidAddress(_)) => {
                        failed += 1;
                        eprintln!("{ip}: {e}");
                    }
                    Err(e) => return Err(e).with_context(|| format!("lookup of {ip} failed")),
                }
            }
            if failed > 0 {
                anyhow::bail!("{failed} of {} lookups failed", ips.len());
            }
        }

        Commands::Version => println!("{}", db.version()),

        Commands::Stats => {
            let stats = db.stats();
            println!("Database statistics:");
            println!("  Version: {}", stats.version);
            println!("  Records: {}", stats.records);
            println!("  Index: {}..{}", stats.index_begin, stats.index_end);
            println!("  Source: {} ({})", config.path.display(), config.mode);
        }
    }

    Ok(())
}
