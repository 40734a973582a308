// crates/qqwry-core/src/source/memory.rs
use super::{resolve_seek, ReadAt, Source};
use crate::error::{QqwryError, Result};
use crate::loader::common_io;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Memory-backed source: the whole database in one immutable buffer.
///
/// The buffer is loaded once by `open` and never written afterwards, so
/// `read_at` is a plain slice copy.
#[derive(Debug)]
pub struct MemorySource {
    path: Option<PathBuf>,
    data: Option<Vec<u8>>,
    pos: u64,
}

impl MemorySource {
    /// Loads `path` into memory on the first [`Source::open`] call.
    ///
    /// With the `compact` feature, paths ending in `.gz` are decompressed.
    pub fn new(path: impl AsRef<Path>) -> Self {
        MemorySource {
            path: Some(path.as_ref().to_path_buf()),
            data: None,
            pos: 0,
        }
    }

    /// Wraps bytes that are already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        MemorySource {
            path: None,
            data: Some(bytes.into()),
            pos: 0,
        }
    }

    fn bytes(&self) -> Result<&[u8]> {
        self.data.as_deref().ok_or_else(QqwryError::closed)
    }
}

impl ReadAt for MemorySource {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        let data = self.bytes()?;
        let len = data.len() as u64;
        if offset > len {
            return Err(QqwryError::OutOfRange { offset, len });
        }
        let tail = &data[offset as usize..];
        let n = buf.len().min(tail.len());
        buf[..n].copy_from_slice(&tail[..n]);
        Ok(n)
    }

    fn size(&self) -> Result<u64> {
        Ok(self.bytes()?.len() as u64)
    }

    fn short_read(&self, offset: u64) -> QqwryError {
        match self.bytes() {
            Ok(data) => QqwryError::OutOfRange {
                offset,
                len: data.len() as u64,
            },
            Err(e) => e,
        }
    }
}

impl Source for MemorySource {
    fn open(&mut self) -> Result<()> {
        if self.data.is_none() {
            let path = self.path.as_ref().ok_or_else(QqwryError::closed)?;
            let data = common_io::read_all(path)?;
            debug!(path = %path.display(), bytes = data.len(), "loaded database into memory");
            self.data = Some(data);
        }
        self.pos = 0;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = self.read_at(buf, self.pos)?;
        self.pos += n as u64;
        Ok(n)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let len = self.size()?;
        self.pos = resolve_seek(pos, self.pos, len)?;
        Ok(self.pos)
    }

    fn close(&mut self) -> Result<()> {
        if self.data.take().is_some() {
            debug!("released in-memory database");
        }
        self.pos = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn sequential_read_advances() {
        let mut src = MemorySource::from_bytes(b"abcdef".to_vec());
        src.open().unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(src.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(src.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(src.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn read_at_past_end_is_out_of_range() {
        let src = MemorySource::from_bytes(vec![0u8; 8]);
        assert_eq!(src.read_at(&mut [0u8; 4], 8).unwrap(), 0);
        assert!(matches!(
            src.read_at(&mut [0u8; 4], 9),
            Err(QqwryError::OutOfRange { offset: 9, len: 8 })
        ));
    }

    #[test]
    fn sequential_read_past_end_is_out_of_range() {
        let mut src = MemorySource::from_bytes(vec![0u8; 6]);
        src.open().unwrap();
        src.seek(SeekFrom::Start(4)).unwrap();
        assert!(matches!(
            src.read_exact(&mut [0u8; 4]),
            Err(QqwryError::OutOfRange { offset: 6, len: 6 })
        ));
    }

    #[test]
    fn seek_outside_buffer_is_rejected() {
        let mut src = MemorySource::from_bytes(vec![0u8; 8]);
        assert_eq!(src.seek(SeekFrom::End(-3)).unwrap(), 5);
        assert!(matches!(
            src.seek(SeekFrom::Start(9)),
            Err(QqwryError::OutOfRange { .. })
        ));
        // failed seek keeps the old position
        assert_eq!(src.seek(SeekFrom::Current(0)).unwrap(), 5);
    }

    #[test]
    fn loads_lazily_and_rewinds_on_reopen() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(b"hello").unwrap();
        tmp.flush().unwrap();

        let mut src = MemorySource::new(tmp.path());
        assert!(matches!(src.size(), Err(QqwryError::Io(_))));
        src.open().unwrap();
        src.seek(SeekFrom::Start(3)).unwrap();
        src.open().unwrap();
        let mut buf = [0u8; 5];
        src.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");
    }

    #[test]
    fn close_releases_buffer() {
        let mut src = MemorySource::from_bytes(b"data".to_vec());
        src.close().unwrap();
        assert!(matches!(src.read_at(&mut [0u8; 1], 0), Err(QqwryError::Io(_))));
        assert!(matches!(src.open(), Err(QqwryError::Io(_))));
    }
}
