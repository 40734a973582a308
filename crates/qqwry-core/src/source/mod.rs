// crates/qqwry-core/src/source/mod.rs

//! # Backing Sources
//!
//! The database is read through a capability split in two:
//!
//! - [`ReadAt`]: positional reads through `&self`. This is the only access
//!   path used by queries, so it must be safe to call from many threads at
//!   once and must never move a shared cursor.
//! - [`Source`]: the stateful half (`open`, sequential `read`, `seek`,
//!   `close`), all through `&mut self`. The borrow checker keeps it out of
//!   reach while queries hold `&self`.
//!
//! Sequential scans under concurrency go through a call-local [`Cursor`]
//! layered on top of `read_at`.

use crate::error::{QqwryError, Result};
use std::io::SeekFrom;

mod cursor;
mod file;
mod memory;

pub use cursor::Cursor;
pub use file::FileSource;
pub use memory::MemorySource;

/// Positional, thread-safe read access to the raw database bytes.
pub trait ReadAt: Send + Sync {
    /// Reads up to `buf.len()` bytes starting at absolute `offset`.
    ///
    /// Returns the number of bytes read; `0` means `offset` is at the end of
    /// the data.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize>;

    /// Total length of the backing data in bytes.
    fn size(&self) -> Result<u64>;

    /// Error for data ending at `offset` before a read was satisfied.
    ///
    /// Defaults to an `UnexpectedEof` I/O error; the memory-backed source
    /// reports [`QqwryError::OutOfRange`] instead.
    fn short_read(&self, offset: u64) -> QqwryError {
        QqwryError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("data ends at offset {offset}"),
        ))
    }

    /// Fills `buf` completely from absolute `offset`.
    ///
    /// Fails with [`short_read`](Self::short_read) when the data ends first.
    fn read_exact_at(&self, mut buf: &mut [u8], mut offset: u64) -> Result<()> {
        while !buf.is_empty() {
            let n = self.read_at(buf, offset)?;
            if n == 0 {
                return Err(self.short_read(offset));
            }
            buf = &mut buf[n..];
            offset += n as u64;
        }
        Ok(())
    }
}

/// The full byte-source capability set.
///
/// `open` must be called before the first structural read. Implementations
/// must make `open` idempotent on success and must make every operation fail
/// with an I/O error after `close`.
pub trait Source: ReadAt {
    /// Opens (or re-opens) the resource and rewinds the sequential cursor.
    fn open(&mut self) -> Result<()>;

    /// Sequential read from the shared cursor.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Moves the shared cursor, returning the new absolute position.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64>;

    /// Releases the resource.
    fn close(&mut self) -> Result<()>;

    /// Fills `buf` from the shared cursor.
    fn read_exact(&mut self, mut buf: &mut [u8]) -> Result<()> {
        while !buf.is_empty() {
            let n = self.read(buf)?;
            if n == 0 {
                let offset = self.seek(SeekFrom::Current(0))?;
                return Err(self.short_read(offset));
            }
            buf = &mut buf[n..];
        }
        Ok(())
    }
}

impl<R: ReadAt + ?Sized> ReadAt for Box<R> {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        (**self).read_at(buf, offset)
    }

    #[inline]
    fn size(&self) -> Result<u64> {
        (**self).size()
    }

    fn short_read(&self, offset: u64) -> QqwryError {
        (**self).short_read(offset)
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        (**self).seek(pos)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Resolves a `SeekFrom` against a known length, rejecting targets outside
/// `[0, len]`.
pub(crate) fn resolve_seek(pos: SeekFrom, current: u64, len: u64) -> Result<u64> {
    let target = match pos {
        SeekFrom::Start(n) => i128::from(n),
        SeekFrom::Current(n) => i128::from(current) + i128::from(n),
        SeekFrom::End(n) => i128::from(len) + i128::from(n),
    };
    if target < 0 || target > i128::from(len) {
        return Err(QqwryError::OutOfRange {
            offset: target.clamp(0, i128::from(u64::MAX)) as u64,
            len,
        });
    }
    Ok(target as u64)
}
