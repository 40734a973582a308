// crates/qqwry-core/src/index.rs

//! Header parsing and binary search over the fixed-stride index.

use crate::error::{QqwryError, Result};
use crate::source::{ReadAt, Source};
use byteorder::{ByteOrder, LittleEndian};
use std::io::SeekFrom;
use tracing::trace;

/// Size of one header field (`index_begin` / `index_end`).
pub const INDEX_OFFSET_SIZE: usize = 4;
/// Size of an IP value stored on disk.
pub const IP_SIZE: u64 = 4;
/// Size of one index record: 4-byte IP + 3-byte pointer.
pub const INDEX_RECORD_SIZE: u64 = 7;

/// First address of the reserved block holding the database's own metadata.
pub const VERSION_IP_BEGIN: u32 = 4_294_967_040;
/// Last address of the reserved block.
pub const VERSION_IP_END: u32 = 4_294_967_295;

/// The 8-byte file header and the record count derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMeta {
    pub begin: u32,
    pub end: u32,
    pub total: u32,
}

impl IndexMeta {
    pub fn from_bytes(buf: [u8; INDEX_OFFSET_SIZE * 2]) -> Result<Self> {
        let begin = LittleEndian::read_u32(&buf[..INDEX_OFFSET_SIZE]);
        let end = LittleEndian::read_u32(&buf[INDEX_OFFSET_SIZE..]);
        if end < begin {
            return Err(QqwryError::CorruptData(format!(
                "index end {end} precedes index begin {begin}"
            )));
        }
        Ok(IndexMeta {
            begin,
            end,
            total: (end - begin) / INDEX_RECORD_SIZE as u32,
        })
    }

    /// Reads the header through the source's sequential path.
    ///
    /// Only valid before the source is shared with queries.
    pub fn load<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
        source.seek(SeekFrom::Start(0))?;
        let mut buf = [0u8; INDEX_OFFSET_SIZE * 2];
        source.read_exact(&mut buf)?;
        Self::from_bytes(buf)
    }

    /// Absolute offset of the record with the given index.
    #[inline]
    pub fn record_offset(&self, index: u32) -> u64 {
        u64::from(self.begin) + u64::from(index) * INDEX_RECORD_SIZE
    }
}

/// One 7-byte index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRecord {
    pub ip_begin: u32,
    /// Position of the record: a 4-byte range end followed by its fields.
    pub offset: u64,
}

impl IndexRecord {
    pub fn from_bytes(buf: [u8; INDEX_RECORD_SIZE as usize]) -> Self {
        IndexRecord {
            ip_begin: LittleEndian::read_u32(&buf[..4]),
            offset: u64::from(LittleEndian::read_u32(&buf[3..]) >> 8),
        }
    }

    /// Where the country field of this record starts.
    #[inline]
    pub fn fields_offset(&self) -> u64 {
        self.offset + IP_SIZE
    }
}

/// A successful index lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHit {
    pub ip_begin: u32,
    pub ip_end: u32,
    pub record: IndexRecord,
}

/// Read-only view of the index over a shared source.
#[derive(Debug)]
pub struct IndexTable<'a, R: ReadAt + ?Sized> {
    source: &'a R,
    meta: IndexMeta,
}

impl<'a, R: ReadAt + ?Sized> IndexTable<'a, R> {
    pub fn new(source: &'a R, meta: IndexMeta) -> Self {
        IndexTable { source, meta }
    }

    /// Reads the index record at an absolute offset.
    pub fn read_record_at(&self, pos: u64) -> Result<IndexRecord> {
        let mut buf = [0u8; INDEX_RECORD_SIZE as usize];
        self.source.read_exact_at(&mut buf, pos)?;
        Ok(IndexRecord::from_bytes(buf))
    }

    /// Reads a little-endian IP value.
    pub fn read_ip(&self, pos: u64) -> Result<u32> {
        let mut buf = [0u8; IP_SIZE as usize];
        self.source.read_exact_at(&mut buf, pos)?;
        Ok(LittleEndian::read_u32(&buf))
    }

    /// The entry stored at `index_end`, pointing at the version record.
    pub fn version_record(&self) -> Result<IndexRecord> {
        self.read_record_at(u64::from(self.meta.end))
    }

    /// Binary search for the range containing `target`.
    pub fn lookup(&self, target: u32) -> Result<Option<IndexHit>> {
        if self.meta.total == 0 {
            return Ok(None);
        }
        let mut left: u32 = 0;
        let mut right: u32 = self.meta.total - 1;

        while left <= right {
            let mid = left + (right - left) / 2;
            let record = self.read_record_at(self.meta.record_offset(mid))?;
            trace!(mid, ip_begin = record.ip_begin, "index probe");

            if record.ip_begin > target {
                if mid == 0 {
                    break;
                }
                right = mid - 1;
                continue;
            }

            if record.ip_begin == target {
                // the range end is only reported, not needed to decide the hit
                let ip_end = self.read_ip(record.offset).unwrap_or(target);
                return Ok(Some(IndexHit {
                    ip_begin: record.ip_begin,
                    ip_end: ip_end.max(target),
                    record,
                }));
            }

            let ip_end = self.read_ip(record.offset)?;
            if ip_end >= target {
                return Ok(Some(IndexHit {
                    ip_begin: record.ip_begin,
                    ip_end,
                    record,
                }));
            }
            left = mid + 1;
        }
        Ok(None)
    }
}
