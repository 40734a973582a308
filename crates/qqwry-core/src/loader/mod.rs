// crates/qqwry-core/src/loader/mod.rs

//! # Data Loader
//!
//! Chooses and constructs the backing source. The engine itself never
//! branches on the variant; this is the only place that does.

use crate::db::{MemoryDb, QqwryDb};
use crate::error::{QqwryError, Result};
use crate::source::{FileSource, MemorySource, Source};
use once_cell::sync::OnceCell;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

pub mod common_io;

static QQWRY_DB_CACHE: OnceCell<MemoryDb> = OnceCell::new();

/// Environment variable overriding the database path.
pub const ENV_PATH: &str = "QQWRY_PATH";
/// Environment variable selecting the source mode (`file` or `memory`).
pub const ENV_MODE: &str = "QQWRY_MODE";

/// Which backing source to instantiate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceMode {
    /// Positional reads against the open file.
    File,
    /// The whole file loaded into memory once.
    #[default]
    Memory,
}

impl FromStr for SourceMode {
    type Err = QqwryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(SourceMode::File),
            "memory" | "mem" => Ok(SourceMode::Memory),
            other => Err(QqwryError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("unknown source mode {other:?} (expected \"file\" or \"memory\")"),
            ))),
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceMode::File => "file",
            SourceMode::Memory => "memory",
        })
    }
}

/// Where the database lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub path: PathBuf,
    pub mode: SourceMode,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            path: QqwryDb::<MemorySource>::default_data_dir()
                .join(QqwryDb::<MemorySource>::default_dataset_filename()),
            mode: SourceMode::default(),
        }
    }
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>, mode: SourceMode) -> Self {
        DbConfig {
            path: path.into(),
            mode,
        }
    }

    /// Defaults overridden by `QQWRY_PATH` / `QQWRY_MODE` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = DbConfig::default();
        if let Some(path) = lookup(ENV_PATH).filter(|p| !p.is_empty()) {
            config.path = PathBuf::from(path);
        }
        if let Some(mode) = lookup(ENV_MODE).filter(|m| !m.is_empty()) {
            config.mode = mode.parse()?;
        }
        Ok(config)
    }

    /// Instantiates the configured source without opening it.
    pub fn source(&self) -> Box<dyn Source> {
        match self.mode {
            SourceMode::File => Box::new(FileSource::new(&self.path)),
            SourceMode::Memory => Box::new(MemorySource::new(&self.path)),
        }
    }
}

impl<S: Source> QqwryDb<S> {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "qqwry.dat"
    }
}

impl QqwryDb<Box<dyn Source>> {
    /// Opens the database described by `config`.
    pub fn open_with(config: &DbConfig) -> Result<Self> {
        debug!(path = %config.path.display(), mode = %config.mode, "opening database");
        Self::new(config.source())
    }
}

impl QqwryDb<MemorySource> {
    /// Process-wide database loaded once from [`DbConfig::from_env`]'s path.
    ///
    /// The database is always held in memory regardless of `QQWRY_MODE`.
    pub fn load() -> Result<&'static Self> {
        QQWRY_DB_CACHE.get_or_try_init(|| {
            let config = DbConfig::from_env()?;
            Self::open_memory(&config.path)
        })
    }
}
