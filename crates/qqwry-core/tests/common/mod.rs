// crates/qqwry-core/tests/common/mod.rs
//! Synthetic qqwry databases for tests and benchmarks.
#![allow(dead_code)]

use encoding_rs::GBK;
use std::io::Write;
use std::net::Ipv4Addr;
use tempfile::NamedTempFile;

pub const VERSION_IP_BEGIN: u32 = 4_294_967_040;

/// How a record's two fields are laid out in the data area.
#[derive(Debug, Clone, Copy)]
pub enum Layout {
    /// `[end][country\0][region\0]`
    Inline,
    /// `[end][1 -> X]`, `X: [country\0][region\0]`
    Mixed,
    /// `[end][2 -> C][region\0]`
    CountryString,
    /// `[end][1 -> X]`, `X: [2 -> C][region\0]`
    MixedThenString,
    /// `[end][country\0][2 -> R]`
    RegionString,
    /// `n` chained mixed redirects ending at `[country\0][region\0]`
    Chain(usize),
    /// `[end][1 -> 0][region\0]`
    ZeroCountry,
}

pub fn ip(s: &str) -> u32 {
    u32::from(s.parse::<Ipv4Addr>().expect("valid test address"))
}

pub fn gbk(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = GBK.encode(text);
    assert!(!had_errors, "{text:?} is not representable in GBK");
    bytes.into_owned()
}

/// Builds a database file in memory.
pub struct FixtureBuilder {
    data: Vec<u8>,
    entries: Vec<(u32, u32)>,
    version_region: Vec<u8>,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureBuilder {
    pub fn new() -> Self {
        FixtureBuilder {
            data: vec![0; 8],
            entries: Vec::new(),
            version_region: gbk("2024年01月15日IP数据"),
        }
    }

    pub fn version(mut self, region: &str) -> Self {
        self.version_region = gbk(region);
        self
    }

    pub fn range(self, begin: u32, end: u32, country: &str, region: &str) -> Self {
        self.range_with(begin, end, country, region, Layout::Inline)
    }

    pub fn range_with(
        self,
        begin: u32,
        end: u32,
        country: &str,
        region: &str,
        layout: Layout,
    ) -> Self {
        self.range_bytes(begin, end, &gbk(country), &gbk(region), layout)
    }

    pub fn range_bytes(
        mut self,
        begin: u32,
        end: u32,
        country: &[u8],
        region: &[u8],
        layout: Layout,
    ) -> Self {
        let end = end.to_le_bytes();
        let rec = match layout {
            Layout::Inline => {
                let rec = self.append(&end);
                self.literal(country);
                self.literal(region);
                rec
            }
            Layout::Mixed => {
                let x = self.literal(country);
                self.literal(region);
                let rec = self.append(&end);
                self.pointer(1, x);
                rec
            }
            Layout::CountryString => {
                let c = self.literal(country);
                let rec = self.append(&end);
                self.pointer(2, c);
                self.literal(region);
                rec
            }
            Layout::MixedThenString => {
                let c = self.literal(country);
                let x = self.pointer(2, c);
                self.literal(region);
                let rec = self.append(&end);
                self.pointer(1, x);
                rec
            }
            Layout::RegionString => {
                let r = self.literal(region);
                let rec = self.append(&end);
                self.literal(country);
                self.pointer(2, r);
                rec
            }
            Layout::Chain(hops) => {
                let mut target = self.literal(country);
                self.literal(region);
                for _ in 1..hops.max(1) {
                    target = self.pointer(1, target);
                }
                let rec = self.append(&end);
                self.pointer(1, target);
                rec
            }
            Layout::ZeroCountry => {
                let rec = self.append(&end);
                self.append(&[1, 0, 0, 0]);
                self.literal(region);
                rec
            }
        };
        self.entries.push((begin, rec));
        self
    }

    fn append(&mut self, bytes: &[u8]) -> u32 {
        let at = self.data.len() as u32;
        self.data.extend_from_slice(bytes);
        at
    }

    fn literal(&mut self, text: &[u8]) -> u32 {
        let at = self.append(text);
        self.data.push(0);
        at
    }

    fn pointer(&mut self, mode: u8, target: u32) -> u32 {
        assert!(target < 1 << 24, "offset does not fit in 3 bytes");
        let at = self.append(&[mode]);
        self.data.extend_from_slice(&target.to_le_bytes()[..3]);
        at
    }

    pub fn build(mut self) -> Vec<u8> {
        let version_region = std::mem::take(&mut self.version_region);
        let version_rec = self.append(&u32::MAX.to_le_bytes());
        self.literal(&gbk("纯真网络"));
        self.literal(&version_region);

        self.entries.sort_by_key(|&(begin, _)| begin);
        let index_begin = self.data.len() as u32;
        for &(begin, rec) in &self.entries {
            self.data.extend_from_slice(&begin.to_le_bytes());
            self.data.extend_from_slice(&rec.to_le_bytes()[..3]);
        }
        let index_end = self.data.len() as u32;
        self.data.extend_from_slice(&VERSION_IP_BEGIN.to_le_bytes());
        self.data.extend_from_slice(&version_rec.to_le_bytes()[..3]);

        self.data[..4].copy_from_slice(&index_begin.to_le_bytes());
        self.data[4..8].copy_from_slice(&index_end.to_le_bytes());
        self.data
    }
}

/// Expected decoded values for the reference database.
pub const REFERENCE: &[(&str, &str, &str, &str)] = &[
    // (begin, end, country, region)
    ("0.0.0.0", "0.255.255.255", "IANA", "保留地址"),
    ("1.0.0.0", "1.0.0.255", "美国", "APNIC&CloudFlare公共DNS服务器"),
    ("1.0.1.0", "1.0.3.255", "福建省", "电信"),
    ("1.0.4.0", "1.0.7.255", "澳大利亚", "未知"),
    ("1.0.8.0", "1.0.15.255", "广东省", "电信"),
    ("1.0.32.0", "1.0.63.255", "广东省", "电信"),
    ("8.8.8.0", "8.8.8.255", "美国", "加利福尼亚州圣克拉拉县山景市谷歌公司DNS服务器"),
    ("223.255.255.0", "223.255.255.255", "澳大利亚", "CZ88.NET"),
];

/// Addresses that fall between the reference ranges.
pub const REFERENCE_GAPS: &[&str] = &[
    "1.0.16.0",
    "1.0.31.255",
    "1.0.64.0",
    "8.8.7.255",
    "8.8.9.0",
    "223.255.254.255",
    "224.0.0.0",
    "255.255.254.255",
];

/// A small database exercising every field layout.
pub fn reference() -> Vec<u8> {
    FixtureBuilder::new()
        .range(ip("0.0.0.0"), ip("0.255.255.255"), "IANA", "保留地址")
        .range_with(
            ip("1.0.0.0"),
            ip("1.0.0.255"),
            "美国",
            "APNIC&CloudFlare公共DNS服务器",
            Layout::MixedThenString,
        )
        .range_with(ip("1.0.1.0"), ip("1.0.3.255"), "福建省", "电信", Layout::Mixed)
        .range_with(
            ip("1.0.4.0"),
            ip("1.0.7.255"),
            "澳大利亚",
            " CZ88.NET",
            Layout::CountryString,
        )
        .range_with(ip("1.0.8.0"), ip("1.0.15.255"), "广东省", "电信", Layout::RegionString)
        .range_with(ip("1.0.32.0"), ip("1.0.63.255"), "广东省", "电信", Layout::Chain(3))
        .range(
            ip("8.8.8.0"),
            ip("8.8.8.255"),
            "美国",
            "加利福尼亚州圣克拉拉县山景市谷歌公司DNS服务器",
        )
        .range(ip("223.255.255.0"), ip("223.255.255.255"), "澳大利亚", "CZ88.NET")
        .build()
}

pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(bytes).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}
