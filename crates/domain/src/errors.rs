use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Name is not eligible for a DNS claim: {0}")]
    EligibilityRejected(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("DNS response does not match query: {0}")]
    ResponseMismatch(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True when no answer was received at all, as opposed to an answer that
    /// could not be used.
    pub fn is_transport(&self) -> bool {
        matches!(self, DomainError::Transport(_))
    }
}

/// Failures of the HTTP round trip. None of these carry a DNS message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Timeout waiting for DoH response from {url}")]
    Timeout { url: String },

    #[error("Connection refused by {url}")]
    ConnectionRefused { url: String },

    #[error("DoH request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("DoH server {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to read DoH response from {url}: {reason}")]
    Body { url: String, reason: String },
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            TransportError::Timeout { url }
            | TransportError::ConnectionRefused { url }
            | TransportError::Request { url, .. }
            | TransportError::HttpStatus { url, .. }
            | TransportError::Body { url, .. } => url,
        }
    }
}

/// Part of a DNS message being read when decoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Question,
    Answer,
    Authority,
    Additional,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Question => "question",
            Section::Answer => "answer",
            Section::Authority => "authority",
            Section::Additional => "additional",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("needed {needed} bytes but only {remaining} remain")]
    Truncated { needed: usize, remaining: usize },

    #[error("compression pointer to offset {target} is invalid")]
    BadPointer { target: usize },

    #[error("too many compression pointers")]
    PointerLoop,

    #[error("reserved label type 0x{0:02x}")]
    ReservedLabelType(u8),

    #[error("name exceeds 255 octets")]
    NameTooLong,

    /// A `.` byte inside a label has no unambiguous dotted form.
    #[error("label contains a '.' byte")]
    DotInLabel,

    #[error("TXT segment of {declared} bytes overruns rdata ({remaining} left)")]
    TxtOverrun { declared: usize, remaining: usize },

    #[error("rdata length {actual} is invalid, expected {expected}")]
    BadRdataLength { expected: usize, actual: usize },
}

/// Malformed or truncated wire-format payload.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Malformed DNS message at offset {offset} ({section} {field}): {kind}")]
pub struct DecodeError {
    pub offset: usize,
    pub section: Section,
    pub field: &'static str,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(offset: usize, section: Section, field: &'static str, kind: DecodeErrorKind) -> Self {
        Self {
            offset,
            section,
            field,
            kind,
        }
    }

    pub fn truncated(
        offset: usize,
        section: Section,
        field: &'static str,
        needed: usize,
        remaining: usize,
    ) -> Self {
        Self::new(
            offset,
            section,
            field,
            DecodeErrorKind::Truncated { needed, remaining },
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Label '{0}' exceeds 63 octets")]
    LabelTooLong(String),

    #[error("Name '{0}' contains an empty label")]
    EmptyLabel(String),

    #[error("Name '{0}' exceeds 255 octets")]
    NameTooLong(String),

    #[error("TXT segment of {0} bytes exceeds 255 octets")]
    TxtSegmentTooLong(usize),

    #[error("Record data of {0} bytes exceeds 65535 octets")]
    RdataTooLong(usize),

    #[error("Section holds {0} entries, more than a DNS message can carry")]
    SectionTooLarge(usize),
}
