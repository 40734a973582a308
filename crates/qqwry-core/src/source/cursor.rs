// crates/qqwry-core/src/source/cursor.rs
use super::ReadAt;
use crate::error::Result;

/// Bytes fetched per positional read while scanning for a delimiter.
const SCAN_CHUNK: usize = 64;

/// A call-local sequential reader over any [`ReadAt`].
///
/// The cursor owns its position; reads go through `read_at` and only advance
/// that local counter, so any number of cursors can scan the same source at
/// once without coordinating.
#[derive(Debug)]
pub struct Cursor<'a, R: ReadAt + ?Sized> {
    source: &'a R,
    pos: u64,
}

impl<'a, R: ReadAt + ?Sized> Cursor<'a, R> {
    pub fn new(source: &'a R, pos: u64) -> Self {
        Cursor { source, pos }
    }

    /// Current absolute position.
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = self.source.read_at(buf, self.pos)?;
        self.pos += n as u64;
        Ok(n)
    }

    /// Reads until `delim` (inclusive) or end of data.
    ///
    /// The returned bytes end with `delim` unless the data ran out first.
    pub fn read_until(&mut self, delim: u8) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut chunk = [0u8; SCAN_CHUNK];
        loop {
            let n = self.source.read_at(&mut chunk, self.pos)?;
            if n == 0 {
                return Ok(out);
            }
            match chunk[..n].iter().position(|&b| b == delim) {
                Some(i) => {
                    out.extend_from_slice(&chunk[..=i]);
                    self.pos += (i + 1) as u64;
                    return Ok(out);
                }
                None => {
                    out.extend_from_slice(&chunk[..n]);
                    self.pos += n as u64;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[test]
    fn read_until_stops_after_delimiter() {
        let src = MemorySource::from_bytes(b"abc\0def\0".to_vec());
        let mut cur = Cursor::new(&src, 0);
        assert_eq!(cur.read_until(0).unwrap(), b"abc\0");
        assert_eq!(cur.position(), 4);
        assert_eq!(cur.read_until(0).unwrap(), b"def\0");
        assert_eq!(cur.read_until(0).unwrap(), b"");
    }

    #[test]
    fn read_until_spans_chunks() {
        let mut data = vec![b'x'; SCAN_CHUNK * 2 + 5];
        data.push(0);
        data.extend_from_slice(b"tail");
        let src = MemorySource::from_bytes(data);
        let mut cur = Cursor::new(&src, 3);
        let got = cur.read_until(0).unwrap();
        assert_eq!(got.len(), SCAN_CHUNK * 2 + 3);
        assert_eq!(got.last(), Some(&0));
        assert_eq!(cur.position(), (SCAN_CHUNK * 2 + 6) as u64);
    }

    #[test]
    fn unterminated_scan_returns_remaining_bytes() {
        let src = MemorySource::from_bytes(b"abc".to_vec());
        let mut cur = Cursor::new(&src, 1);
        assert_eq!(cur.read_until(0).unwrap(), b"bc");
    }

    #[test]
    fn cursors_do_not_share_position() {
        let src = MemorySource::from_bytes(b"0123456789".to_vec());
        let mut a = Cursor::new(&src, 0);
        let mut b = Cursor::new(&src, 5);
        let mut buf = [0u8; 2];
        a.read(&mut buf).unwrap();
        assert_eq!(&buf, b"01");
        b.read(&mut buf).unwrap();
        assert_eq!(&buf, b"56");
        a.read(&mut buf).unwrap();
        assert_eq!(&buf, b"23");
    }
}
