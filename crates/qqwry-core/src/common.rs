// crates/qqwry-core/src/common.rs
use crate::text::RESERVED_TEXT;
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// A decoded lookup result.
///
/// `location` is `country` immediately followed by `region`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub country: String,
    pub region: String,
    pub location: String,
}

impl Record {
    pub fn new(country: String, region: String) -> Self {
        let mut location = String::with_capacity(country.len() + region.len());
        location.push_str(&country);
        location.push_str(&region);
        Record {
            country,
            region,
            location,
        }
    }

    /// The fixed record returned for the reserved top-256 block.
    pub fn reserved() -> Self {
        Record::new(RESERVED_TEXT.to_owned(), String::new())
    }

    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.country == RESERVED_TEXT && self.region.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location)
    }
}

/// A record together with the inclusive address range it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Located {
    pub begin: Ipv4Addr,
    pub end: Ipv4Addr,
    pub record: Record,
}

/// Simple aggregate statistics for the database.
///
/// Returned by [`QqwryDb::stats`](crate::QqwryDb::stats); the values come
/// from the header read at open time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbStats {
    pub records: u32,
    pub index_begin: u32,
    pub index_end: u32,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_concatenates_without_separator() {
        let r = Record::new("美国".into(), "加州".into());
        assert_eq!(r.location, "美国加州");
        assert_eq!(r.to_string(), "美国加州");
        assert!(!r.is_reserved());
    }

    #[test]
    fn reserved_record_shape() {
        let r = Record::reserved();
        assert_eq!(r.country, "保留地址");
        assert_eq!(r.region, "");
        assert_eq!(r.location, "保留地址");
        assert!(r.is_reserved());
    }
}
