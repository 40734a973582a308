// crates/qqwry-core/src/text.rs

//! GBK field decoding and the placeholder-region rule.

use crate::error::TextError;
use encoding_rs::GBK;

/// Text substituted for unknown or placeholder fields.
pub const UNKNOWN_TEXT: &str = "未知";

/// GBK bytes of [`UNKNOWN_TEXT`], returned raw by the field resolver for
/// zero-offset redirects.
pub const UNKNOWN_TEXT_GBK: &[u8] = &[0xce, 0xb4, 0xd6, 0xaa];

/// Region placeholder written by the database publisher (`" CZ88.NET"`).
pub const DEFAULT_UNKNOWN_REGION: [u8; 9] = [32, 67, 90, 56, 56, 46, 78, 69, 84];

/// Country text of the fixed record returned for the reserved block.
pub const RESERVED_TEXT: &str = "保留地址";

/// Decodes one raw (terminator-stripped) GBK field.
pub fn decode(raw: &[u8]) -> Result<String, TextError> {
    GBK.decode_without_bom_handling_and_without_replacement(raw)
        .map(|text| text.into_owned())
        .ok_or(TextError::Malformed { len: raw.len() })
}

/// Replaces the publisher's placeholder region with [`UNKNOWN_TEXT`].
///
/// Only an exact byte-for-byte match of [`DEFAULT_UNKNOWN_REGION`] is
/// replaced.
pub fn replace_unknown_region(region: String) -> String {
    if region.as_bytes() == DEFAULT_UNKNOWN_REGION {
        UNKNOWN_TEXT.to_owned()
    } else {
        region
    }
}
