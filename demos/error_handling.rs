//! Error handling example for qqwry-rs
//!
//! This example demonstrates the error cases a caller should expect.

use qqwry_core::{DbConfig, FileDb, QqwryError, Result};

fn main() -> Result<()> {
    println!("=== qqwry-rs Error Handling Example ===\n");

    // Example 1: Handling open errors
    println!("--- Example 1: Opening a missing file ---");
    match FileDb::open_file("/definitely/not/here/qqwry.dat") {
        Ok(_) => println!("  unexpectedly opened"),
        Err(QqwryError::Io(e)) => println!("  I/O error: {e}"),
        Err(e) => println!("  other error: {e}"),
    }
    println!();

    let path = match std::env::args().nth(1) {
        Some(path) => path.into(),
        None => DbConfig::from_env()?.path,
    };
    let mut db = FileDb::open_file(&path)?;

    // Example 2: Malformed input
    println!("--- Example 2: Invalid addresses ---");
    for ip in ["", "1.2.3", "256.1.1.1", "example.com", "::1"] {
        match db.query(ip) {
            Err(QqwryError::InvalidAddress(s)) => println!("  rejected {s:?}"),
            other => println!("  {ip:?}: {other:?}"),
        }
    }
    println!();

    // Example 3: Addresses without a covering range
    println!("--- Example 3: Lookups that may miss ---");
    for ip in ["0.0.0.0", "224.0.0.1", "255.255.255.1"] {
        match db.query(ip) {
            Ok(record) => println!("  {ip}: {record}"),
            Err(QqwryError::NotFound(addr)) => println!("  {addr}: no range"),
            Err(e) => println!("  {ip}: {e}"),
        }
    }
    println!();

    // Example 4: Queries after close fail instead of panicking
    println!("--- Example 4: Query after close ---");
    db.close()?;
    match db.query("1.0.0.1") {
        Ok(record) => println!("  unexpectedly answered: {record}"),
        Err(e) => println!("  closed database: {e}"),
    }

    Ok(())
}
