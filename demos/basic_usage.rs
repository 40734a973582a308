//! Basic usage example for qqwry-rs
//!
//! Run with a database path or set QQWRY_PATH:
//!
//! ```text
//! cargo run --example basic_usage -- /path/to/qqwry.dat
//! ```

use qqwry_core::{DbConfig, MemoryDb, Result};

fn main() -> Result<()> {
    println!("=== qqwry-rs Basic Usage Example ===\n");

    let path = match std::env::args().nth(1) {
        Some(path) => path.into(),
        None => DbConfig::from_env()?.path,
    };

    // Example 1: Load the database into memory
    println!("--- Example 1: Loading database ---");
    let db = MemoryDb::open_memory(&path)?;
    println!("  Path: {}", path.display());
    println!("  Version: {}", db.version());
    println!("  Records: {}", db.record_count());
    println!();

    // Example 2: Simple lookups
    println!("--- Example 2: Looking up addresses ---");
    for ip in ["1.0.0.1", "8.8.8.8", "114.114.114.114"] {
        let record = db.query(ip)?;
        println!("  {ip:<16} {} / {}", record.country, record.region);
    }
    println!();

    // Example 3: The covering range
    println!("--- Example 3: Covering range ---");
    let hit = db.locate("8.8.8.8".parse().expect("literal address"))?;
    println!("  {} - {}: {}", hit.begin, hit.end, hit.record);
    println!();

    // Example 4: The reserved block never touches the index
    println!("--- Example 4: Reserved block ---");
    let record = db.query("255.255.255.255")?;
    println!("  255.255.255.255 reserved: {}", record.is_reserved());

    Ok(())
}
