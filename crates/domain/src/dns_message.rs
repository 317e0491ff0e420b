use crate::dns_record::{DnsResourceRecord, RecordClass, RecordData, RecordType};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuestion {
    pub name: String,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl DnsQuestion {
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: RecordClass::IN,
        }
    }

    /// Same name (ignoring ASCII case and a trailing dot), type and class.
    pub fn matches(&self, other: &DnsQuestion) -> bool {
        self.record_type == other.record_type
            && self.class == other.class
            && names_equal(&self.name, &other.name)
    }
}

impl fmt::Display for DnsQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.class, self.record_type)
    }
}

/// Compares two domain names the way DNS does: ASCII case-insensitive, with
/// the root dot optional.
pub fn names_equal(a: &str, b: &str) -> bool {
    let a = a.strip_suffix('.').unwrap_or(a);
    let b = b.strip_suffix('.').unwrap_or(b);
    a.eq_ignore_ascii_case(b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl ResponseCode {
    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NxDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NxDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Other(code) => code & 0x0F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NxDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The 16-bit flags word of the DNS header.
///
/// ```text
/// QR | OPCODE(4) | AA | TC | RD | RA | Z(3) | RCODE(4)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MessageFlags(u16);

impl MessageFlags {
    pub const RESPONSE: u16 = 0x8000;
    pub const AUTHORITATIVE: u16 = 0x0400;
    pub const TRUNCATED: u16 = 0x0200;
    pub const RECURSION_DESIRED: u16 = 0x0100;
    pub const RECURSION_AVAILABLE: u16 = 0x0080;

    const OPCODE_SHIFT: u16 = 11;
    const OPCODE_MASK: u16 = 0x7800;
    const RCODE_MASK: u16 = 0x000F;

    pub fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Flags of a standard recursive query.
    pub fn recursive_query() -> Self {
        Self(Self::RECURSION_DESIRED)
    }

    pub fn is_response(&self) -> bool {
        self.0 & Self::RESPONSE != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.0 & Self::OPCODE_MASK) >> Self::OPCODE_SHIFT) as u8
    }

    pub fn authoritative(&self) -> bool {
        self.0 & Self::AUTHORITATIVE != 0
    }

    pub fn truncated(&self) -> bool {
        self.0 & Self::TRUNCATED != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.0 & Self::RECURSION_DESIRED != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.0 & Self::RECURSION_AVAILABLE != 0
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from_u8((self.0 & Self::RCODE_MASK) as u8)
    }

    pub fn with(self, bit: u16, enabled: bool) -> Self {
        if enabled {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }

    pub fn with_response_code(self, rcode: ResponseCode) -> Self {
        Self((self.0 & !Self::RCODE_MASK) | u16::from(rcode.to_u8()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub id: u16,
    pub flags: MessageFlags,
    pub questions: Vec<DnsQuestion>,
    pub answers: Vec<DnsResourceRecord>,
    pub authorities: Vec<DnsResourceRecord>,
    pub additionals: Vec<DnsResourceRecord>,
}

impl DnsMessage {
    /// A recursive query carrying a single question.
    pub fn query(id: u16, question: DnsQuestion) -> Self {
        Self {
            id,
            flags: MessageFlags::recursive_query(),
            questions: vec![question],
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    /// An empty response echoing `query`'s id, RD bit and questions.
    pub fn response_to(query: &DnsMessage) -> Self {
        Self {
            id: query.id,
            flags: MessageFlags::from_bits(MessageFlags::RESPONSE)
                .with(
                    MessageFlags::RECURSION_DESIRED,
                    query.flags.recursion_desired(),
                )
                .with(MessageFlags::RECURSION_AVAILABLE, true),
            questions: query.questions.clone(),
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn with_answer(mut self, record: DnsResourceRecord) -> Self {
        self.answers.push(record);
        self
    }

    pub fn question(&self) -> Option<&DnsQuestion> {
        self.questions.first()
    }

    pub fn is_response(&self) -> bool {
        self.flags.is_response()
    }

    pub fn response_code(&self) -> ResponseCode {
        self.flags.response_code()
    }

    pub fn has_records(&self) -> bool {
        !(self.answers.is_empty() && self.authorities.is_empty() && self.additionals.is_empty())
    }

    /// Every TXT segment found in the answer section, in wire order.
    pub fn txt_answers(&self) -> Vec<&[u8]> {
        self.answers
            .iter()
            .filter_map(|record| match &record.data {
                RecordData::Txt(segments) => Some(segments),
                _ => None,
            })
            .flatten()
            .map(Vec::as_slice)
            .collect()
    }
}
