// crates/qqwry-core/src/source/file.rs
use super::{ReadAt, Source};
use crate::error::{QqwryError, Result};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed source.
///
/// Positional reads use the OS positional read, so they never touch the
/// handle's seek position. `read`/`seek` share that position and are only
/// reachable through `&mut self`.
#[derive(Debug)]
pub struct FileSource {
    path: Option<PathBuf>,
    file: Option<File>,
}

impl FileSource {
    /// Lazy variant: the file is opened by the first [`Source::open`] call.
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSource {
            path: Some(path.as_ref().to_path_buf()),
            file: None,
        }
    }

    /// Eager variant: wraps an already-open handle.
    ///
    /// Without a path the source cannot be re-opened after `close`.
    pub fn from_file(file: File) -> Self {
        FileSource {
            path: None,
            file: Some(file),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn handle(&self) -> Result<&File> {
        self.file.as_ref().ok_or_else(QqwryError::closed)
    }

    fn handle_mut(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or_else(QqwryError::closed)
    }
}

#[cfg(unix)]
fn positional_read(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(windows)]
fn positional_read(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_read(buf, offset)
}

impl ReadAt for FileSource {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        let file = self.handle()?;
        loop {
            match positional_read(file, buf, offset) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn size(&self) -> Result<u64> {
        Ok(self.handle()?.metadata()?.len())
    }
}

impl Source for FileSource {
    fn open(&mut self) -> Result<()> {
        if self.file.is_none() {
            let path = self.path.as_ref().ok_or_else(QqwryError::closed)?;
            debug!(path = %path.display(), "opening database file");
            self.file = Some(File::open(path)?);
        }
        self.handle_mut()?.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.handle_mut()?.read(buf)?)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        Ok(self.handle_mut()?.seek(pos)?)
    }

    fn close(&mut self) -> Result<()> {
        if self.file.take().is_some() {
            debug!("closed file source");
        }
        Ok(())
    }
}
