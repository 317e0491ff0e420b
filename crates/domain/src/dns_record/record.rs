use super::{RecordClass, RecordType};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Type-specific payload of a resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// One entry per length-prefixed character-string.
    Txt(Vec<Vec<u8>>),

    A(Ipv4Addr),

    Aaaa(Ipv6Addr),

    /// CNAME, NS and PTR targets.
    Name(String),

    /// Raw rdata of a type this crate does not interpret.
    Unparsed(Vec<u8>),
}

impl RecordData {
    pub fn txt_segments(&self) -> Option<&[Vec<u8>]> {
        match self {
            RecordData::Txt(segments) => Some(segments),
            _ => None,
        }
    }

    /// Concatenates all TXT segments, the way long values split over several
    /// character-strings are meant to be read.
    pub fn txt_joined(&self) -> Option<Vec<u8>> {
        self.txt_segments().map(|segments| segments.concat())
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, RecordData::Unparsed(_))
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::Txt(segments) => {
                let quoted: Vec<String> = segments
                    .iter()
                    .map(|s| format!("\"{}\"", String::from_utf8_lossy(s).escape_debug()))
                    .collect();
                write!(f, "{}", quoted.join(" "))
            }
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::Aaaa(addr) => write!(f, "{}", addr),
            RecordData::Name(name) => write!(f, "{}", name),
            RecordData::Unparsed(raw) => write!(f, "\\# {}", raw.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResourceRecord {
    pub name: String,

    pub record_type: RecordType,

    pub class: RecordClass,

    pub ttl: u32,

    pub data: RecordData,
}

impl DnsResourceRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        class: RecordClass,
        ttl: u32,
        data: RecordData,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
            ttl,
            data,
        }
    }

    pub fn txt<S: AsRef<[u8]>>(name: impl Into<String>, ttl: u32, segments: &[S]) -> Self {
        Self::new(
            name,
            RecordType::TXT,
            RecordClass::IN,
            ttl,
            RecordData::Txt(segments.iter().map(|s| s.as_ref().to_vec()).collect()),
        )
    }

    pub fn is_txt(&self) -> bool {
        self.record_type == RecordType::TXT
    }
}

impl fmt::Display for DnsResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name, self.ttl, self.class, self.record_type, self.data
        )
    }
}
