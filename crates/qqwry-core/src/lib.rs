// crates/qqwry-core/src/lib.rs

//! # qqwry-core
//!
//! Read-only lookup engine for the legacy `qqwry.dat` IPv4 geolocation
//! database: a sorted index of range starts plus a pool of pointer-chained,
//! GBK-encoded country/region strings.
//!
//! ```no_run
//! use qqwry_core::QqwryDb;
//!
//! let db = QqwryDb::open_memory("qqwry.dat")?;
//! let record = db.query("1.0.0.1")?;
//! println!("{} / {} (db {})", record.country, record.region, db.version());
//! # Ok::<(), qqwry_core::QqwryError>(())
//! ```
//!
//! A database is queried through `&self` and is `Send + Sync`, so it can be
//! shared across threads as-is.

pub mod common;
pub mod db;
pub mod error;
pub mod field;
pub mod index;
pub mod loader;
pub mod source;
pub mod text;

// Re-exports
pub use crate::common::{DbStats, Located, Record};
pub use crate::db::{parse_ipv4, FileDb, MemoryDb, QqwryDb};
pub use crate::error::{QqwryError, Result, TextError};
pub use crate::loader::{DbConfig, SourceMode};
pub use crate::source::{Cursor, FileSource, MemorySource, ReadAt, Source};
