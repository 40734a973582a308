//! qqwry-cli
//! =========
//!
//! Command-line interface for the `qqwry-core` IPv4 geolocation engine.
//!
//! This crate primarily provides a binary (`qqwry`). The library target only
//! exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install qqwry-cli
//! qqwry --help
//! qqwry -i qqwry.dat query 1.0.0.1 8.8.8.8
//! qqwry -i qqwry.dat --mode file query --json 1.0.0.1
//! qqwry version
//! qqwry stats
//! ```
//!
//! The database path and source mode fall back to the `QQWRY_PATH` and
//! `QQWRY_MODE` environment variables. Set `RUST_LOG` or pass `--verbose`
//! for diagnostics on stderr.
//!
//! For programmatic access use the [`qqwry-core`] crate directly.
//!
//! Links
//! -----
//! - Repository: <https://github.com/holg/qqwry-rs>
//! - Core crate: <https://docs.rs/qqwry-core>
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
