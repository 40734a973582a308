//! Sharing one database between threads.
//!
//! ```text
//! RUST_LOG=qqwry_core=debug cargo run --example concurrent_queries -- /path/to/qqwry.dat file
//! ```

use qqwry_core::{DbConfig, QqwryDb, Result, SourceMode};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const THREADS: u32 = 8;
const QUERIES_PER_THREAD: u32 = 50_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = DbConfig::from_env()?;
    if let Some(path) = args.next() {
        config.path = path.into();
    }
    if let Some(mode) = args.next() {
        config.mode = mode.parse::<SourceMode>()?;
    }

    let db = Arc::new(QqwryDb::open_with(&config)?);
    println!("database {} ({} mode)", db.version(), config.mode);

    let start = Instant::now();
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let db = Arc::clone(&db);
            thread::spawn(move || -> Result<(u32, u32)> {
                let (mut hits, mut misses) = (0, 0);
                for i in 0..QUERIES_PER_THREAD {
                    let ip = (t.wrapping_mul(0x9e37_79b9) ^ i.wrapping_mul(2_654_435_761)).into();
                    match db.query_addr(ip) {
                        Ok(_) => hits += 1,
                        Err(qqwry_core::QqwryError::NotFound(_)) => misses += 1,
                        Err(e) => return Err(e),
                    }
                }
                Ok((hits, misses))
            })
        })
        .collect();

    let (mut hits, mut misses) = (0, 0);
    for handle in handles {
        let (h, m) = handle.join().expect("query thread panicked")?;
        hits += h;
        misses += m;
    }
    let elapsed = start.elapsed();
    let total = THREADS * QUERIES_PER_THREAD;
    println!(
        "{total} queries on {THREADS} threads in {elapsed:?}: {hits} hits, {misses} misses ({:.0} q/s)",
        f64::from(total) / elapsed.as_secs_f64()
    );
    Ok(())
}
