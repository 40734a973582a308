// crates/qqwry-core/src/db.rs

//! # Lookup Engine
//!
//! [`QqwryDb`] owns a [`Source`] and the header parsed from it. After
//! construction every query goes through `&self` and only uses positional
//! reads, so a single instance can be shared across threads (for example in
//! an `Arc`) and queried concurrently without locking.

use crate::common::{DbStats, Located, Record};
use crate::error::{QqwryError, Result};
use crate::field::{FieldResolver, RawRecord};
use crate::index::{IndexMeta, IndexTable, VERSION_IP_BEGIN, VERSION_IP_END};
use crate::source::{FileSource, MemorySource, Source};
use crate::text;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use tracing::debug;

/// A read-only qqwry database.
#[derive(Debug)]
pub struct QqwryDb<S: Source> {
    source: S,
    meta: IndexMeta,
    version: String,
}

/// Database read through positional file I/O.
pub type FileDb = QqwryDb<FileSource>;
/// Database loaded fully into memory.
pub type MemoryDb = QqwryDb<MemorySource>;

impl<S: Source> QqwryDb<S> {
    /// Opens `source`, reads the header and loads the version record.
    pub fn new(mut source: S) -> Result<Self> {
        source.open()?;
        let meta = IndexMeta::load(&mut source)?;
        debug!(
            index_begin = meta.begin,
            index_end = meta.end,
            records = meta.total,
            "loaded index header"
        );

        let mut db = QqwryDb {
            source,
            meta,
            version: String::new(),
        };
        db.version = db.load_version()?;
        debug!(version = %db.version, "loaded database version");
        Ok(db)
    }

    /// The version text is the region of the record behind the entry at
    /// `index_end`, resolved past its 4-byte range end like any other record.
    fn load_version(&self) -> Result<String> {
        let entry = IndexTable::new(&self.source, self.meta).version_record()?;
        let record = self.read_record(entry.fields_offset())?;
        Ok(record.region.chars().filter(char::is_ascii_digit).collect())
    }

    /// Looks up a textual IPv4 address.
    ///
    /// Dotted quads and IPv4-mapped IPv6 text (`::ffff:1.2.3.4`) are
    /// accepted; anything else fails with [`QqwryError::InvalidAddress`].
    pub fn query(&self, ip: &str) -> Result<Record> {
        self.query_addr(parse_ipv4(ip)?)
    }

    /// Looks up an already-parsed address.
    pub fn query_addr(&self, ip: Ipv4Addr) -> Result<Record> {
        self.locate(ip).map(|hit| hit.record)
    }

    /// Like [`query_addr`](Self::query_addr), also returning the covering
    /// range.
    pub fn locate(&self, ip: Ipv4Addr) -> Result<Located> {
        let target = u32::from(ip);
        if (VERSION_IP_BEGIN..=VERSION_IP_END).contains(&target) {
            return Ok(Located {
                begin: Ipv4Addr::from(VERSION_IP_BEGIN),
                end: Ipv4Addr::from(VERSION_IP_END),
                record: Record::reserved(),
            });
        }

        let hit = IndexTable::new(&self.source, self.meta)
            .lookup(target)?
            .ok_or(QqwryError::NotFound(ip))?;
        let record = self.read_record(hit.record.fields_offset())?;
        Ok(Located {
            begin: Ipv4Addr::from(hit.ip_begin),
            end: Ipv4Addr::from(hit.ip_end),
            record,
        })
    }

    /// Resolves and decodes the country/region pair starting at `pos`.
    fn read_record(&self, pos: u64) -> Result<Record> {
        let RawRecord { country, region } = FieldResolver::new(&self.source).resolve_record(pos)?;
        let country = text::decode(country.text_bytes())?;
        let region = text::decode(region.text_bytes()).map_err(|_| QqwryError::Decode)?;
        Ok(Record::new(country, text::replace_unknown_region(region)))
    }

    /// Build identifier: the digits of the version record's region text.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of searchable index records.
    pub fn record_count(&self) -> u32 {
        self.meta.total
    }

    pub fn stats(&self) -> DbStats {
        DbStats {
            records: self.meta.total,
            index_begin: self.meta.begin,
            index_end: self.meta.end,
            version: self.version.clone(),
        }
    }

    /// Releases the backing source. Later queries fail with an I/O error.
    pub fn close(&mut self) -> Result<()> {
        debug!("closing database");
        self.source.close()
    }

    /// Consumes the database, returning its source.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl QqwryDb<FileSource> {
    /// Opens a database read through positional file I/O.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(FileSource::new(path))
    }
}

impl QqwryDb<MemorySource> {
    /// Loads a whole database file into memory.
    pub fn open_memory(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(MemorySource::new(path))
    }

    /// Builds a database over bytes already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::new(MemorySource::from_bytes(bytes))
    }
}

/// Parses IPv4 text, accepting the IPv4-mapped IPv6 form.
pub fn parse_ipv4(ip: &str) -> Result<Ipv4Addr> {
    match ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => Ok(v4),
        Ok(IpAddr::V6(v6)) => v6
            .to_ipv4_mapped()
            .ok_or_else(|| QqwryError::InvalidAddress(ip.to_owned())),
        Err(_) => Err(QqwryError::InvalidAddress(ip.to_owned())),
    }
}
