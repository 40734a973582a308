// crates/qqwry-core/src/field.rs

//! # Field Resolution
//!
//! Country and region strings are stored as NUL-terminated GBK bytes, but a
//! field position may instead hold a 4-byte pointer: one mode byte followed
//! by a 3-byte little-endian offset.
//!
//! | mode | meaning                                                     |
//! |------|-------------------------------------------------------------|
//! | `1`  | mixed redirect: the target is re-evaluated (may chain)      |
//! | `2`  | string redirect: the target is a literal field; the next    |
//! |      | field continues right after this pointer                    |
//! | else | the field is the literal string at this position            |

use crate::error::{QqwryError, Result};
use crate::source::{Cursor, ReadAt};
use crate::text::UNKNOWN_TEXT_GBK;
use byteorder::{ByteOrder, LittleEndian};
use tracing::{trace, warn};

/// Size of a mode byte plus its 3-byte offset.
pub const POINTER_SIZE: u64 = 4;

const REDIRECT_MIXED: u8 = 1;
const REDIRECT_STRING: u8 = 2;

/// Upper bound on redirect hops before the chain is treated as corrupt.
pub const MAX_REDIRECTS: usize = 16;

/// The decoded meaning of the 4 bytes at a field position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Literal,
    Mixed(u64),
    String(u64),
}

impl Mode {
    /// Decodes a mode byte and its packed offset.
    pub fn from_bytes(buf: [u8; 4]) -> Self {
        let offset = u64::from(LittleEndian::read_u32(&buf) >> 8);
        match buf[0] {
            REDIRECT_MIXED => Mode::Mixed(offset),
            REDIRECT_STRING => Mode::String(offset),
            _ => Mode::Literal,
        }
    }
}

/// A raw field together with the position where the following field starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// GBK bytes, including the trailing terminator when read from a literal.
    pub bytes: Vec<u8>,
    pub next: u64,
}

impl RawField {
    /// The field bytes without the trailing NUL.
    pub fn text_bytes(&self) -> &[u8] {
        self.bytes.strip_suffix(&[0]).unwrap_or(&self.bytes)
    }
}

/// Raw country and region of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub country: RawField,
    pub region: RawField,
}

/// Walks redirect chains over a shared source using positional reads only.
#[derive(Debug)]
pub struct FieldResolver<'a, R: ReadAt + ?Sized> {
    source: &'a R,
}

impl<'a, R: ReadAt + ?Sized> FieldResolver<'a, R> {
    pub fn new(source: &'a R) -> Self {
        FieldResolver { source }
    }

    /// Reads the mode at `pos`. A literal may be shorter than a pointer when
    /// it ends the data, so fewer than 4 bytes only fail for a redirect.
    fn read_mode(&self, pos: u64) -> Result<Mode> {
        let mut buf = [0u8; POINTER_SIZE as usize];
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.source.read_at(&mut buf[filled..], pos + filled as u64)?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        match (filled, buf[0]) {
            (0, _) => Err(self.source.short_read(pos)),
            (4, _) => Ok(Mode::from_bytes(buf)),
            (_, REDIRECT_MIXED | REDIRECT_STRING) => {
                Err(self.source.short_read(pos + filled as u64))
            }
            _ => Ok(Mode::Literal),
        }
    }

    /// Resolves the field stored (directly or through redirects) at `pos`.
    pub fn resolve_field(&self, mut pos: u64) -> Result<RawField> {
        let mut next: Option<u64> = None;

        for _ in 0..=MAX_REDIRECTS {
            let mode = self.read_mode(pos)?;
            trace!(pos, ?mode, "field pointer");
            match mode {
                Mode::Mixed(0) | Mode::String(0) => {
                    warn!(pos, "zero-offset redirect, substituting unknown text");
                    return Ok(RawField {
                        bytes: UNKNOWN_TEXT_GBK.to_vec(),
                        next: next.unwrap_or(pos + POINTER_SIZE),
                    });
                }
                Mode::Mixed(offset) => pos = offset,
                Mode::String(offset) => {
                    next.get_or_insert(pos + POINTER_SIZE);
                    pos = offset;
                }
                Mode::Literal => {
                    let bytes = Cursor::new(self.source, pos).read_until(0)?;
                    if bytes.last() != Some(&0) {
                        return Err(QqwryError::CorruptData(format!(
                            "unterminated field at offset {pos}"
                        )));
                    }
                    let next = next.unwrap_or(pos + bytes.len() as u64);
                    return Ok(RawField { bytes, next });
                }
            }
        }

        Err(QqwryError::CorruptData(format!(
            "more than {MAX_REDIRECTS} redirects, last at offset {pos}"
        )))
    }

    /// Resolves the country at `pos` and the region that follows it.
    pub fn resolve_record(&self, pos: u64) -> Result<RawRecord> {
        let country = self.resolve_field(pos)?;
        let region = self.resolve_field(country.next)?;
        Ok(RawRecord { country, region })
    }
}
