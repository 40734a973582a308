// crates/qqwry-core/src/error.rs

//! Error types for the qqwry lookup engine.

use std::net::Ipv4Addr;
use thiserror::Error;

/// Failure to decode a raw GBK field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// The byte sequence is not valid GBK.
    #[error("malformed GBK sequence in {len}-byte field")]
    Malformed { len: usize },
}

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum QqwryError {
    /// The query text is not an IPv4 address.
    #[error("invalid IPv4 address: {0:?}")]
    InvalidAddress(String),

    /// The address is valid but no index range covers it.
    #[error("no record found for {0}")]
    NotFound(Ipv4Addr),

    /// A record was found but its region field is not valid GBK.
    #[error("record found but the region field could not be decoded")]
    Decode,

    /// The country field is not valid GBK.
    #[error(transparent)]
    Text(#[from] TextError),

    /// An error originating from the backing source (open, read, closed).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A read or seek fell outside the backing data.
    #[error("offset {offset} is out of range (data length {len})")]
    OutOfRange { offset: u64, len: u64 },

    /// The file is structurally invalid.
    #[error("corrupt database: {0}")]
    CorruptData(String),
}

/// A convenience `Result` type alias using the crate's `QqwryError` type.
pub type Result<T> = std::result::Result<T, QqwryError>;

impl QqwryError {
    /// Error returned by every source operation after `close()`.
    pub(crate) fn closed() -> Self {
        QqwryError::Io(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            "source is closed",
        ))
    }
}
