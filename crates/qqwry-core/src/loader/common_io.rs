// crates/qqwry-core/src/loader/common_io.rs
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// True when `path` ends in `.gz` (case-insensitive).
pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the name
/// says so and the `compact` feature is enabled.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    {
        if is_gzip(path) {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
    }

    Ok(Box::new(reader))
}

/// Reads the whole (possibly compressed) database into memory.
pub fn read_all(path: &Path) -> Result<Vec<u8>> {
    let mut stream = open_stream(path)?;
    let mut data = Vec::new();
    stream.read_to_end(&mut data)?;
    Ok(data)
}
