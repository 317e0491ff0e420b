use super::reader::WireReader;
use super::{HEADER_LEN, MIN_QUESTION_LEN, MIN_RECORD_LEN};
use dnsproof_domain::{
    DecodeError, DecodeErrorKind, DnsMessage, DnsQuestion, DnsResourceRecord, MessageFlags,
    RecordClass, RecordData, RecordType, Section,
};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// Parse a complete wire-format message.
///
/// Either the whole message decodes or an error is returned; no partially
/// filled message ever escapes.
pub fn decode(bytes: &[u8]) -> Result<DnsMessage, DecodeError> {
    let mut reader = WireReader::new(bytes);

    let id = reader.read_u16("id")?;
    let flags = MessageFlags::from_bits(reader.read_u16("flags")?);
    let qdcount = usize::from(reader.read_u16("qdcount")?);
    let ancount = usize::from(reader.read_u16("ancount")?);
    let nscount = usize::from(reader.read_u16("nscount")?);
    let arcount = usize::from(reader.read_u16("arcount")?);

    let minimum = qdcount * MIN_QUESTION_LEN + (ancount + nscount + arcount) * MIN_RECORD_LEN;
    if minimum > reader.remaining() {
        return Err(DecodeError::truncated(
            HEADER_LEN,
            Section::Header,
            "section counts",
            minimum,
            reader.remaining(),
        ));
    }

    reader.enter(Section::Question);
    let mut questions = Vec::with_capacity(qdcount);
    for _ in 0..qdcount {
        questions.push(read_question(&mut reader)?);
    }

    let answers = read_records(&mut reader, Section::Answer, ancount)?;
    let authorities = read_records(&mut reader, Section::Authority, nscount)?;
    let additionals = read_records(&mut reader, Section::Additional, arcount)?;

    if reader.remaining() > 0 {
        debug!(
            offset = reader.position(),
            trailing = reader.remaining(),
            "Ignoring trailing bytes after DNS message"
        );
    }

    Ok(DnsMessage {
        id,
        flags,
        questions,
        answers,
        authorities,
        additionals,
    })
}

fn read_question(reader: &mut WireReader<'_>) -> Result<DnsQuestion, DecodeError> {
    let name = reader.read_name("qname")?;
    let record_type = RecordType::from_u16(reader.read_u16("qtype")?);
    let class = RecordClass::from_u16(reader.read_u16("qclass")?);
    Ok(DnsQuestion {
        name,
        record_type,
        class,
    })
}

fn read_records(
    reader: &mut WireReader<'_>,
    section: Section,
    count: usize,
) -> Result<Vec<DnsResourceRecord>, DecodeError> {
    reader.enter(section);
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        records.push(read_record(reader)?);
    }
    Ok(records)
}

fn read_record(reader: &mut WireReader<'_>) -> Result<DnsResourceRecord, DecodeError> {
    let name = reader.read_name("name")?;
    let record_type = RecordType::from_u16(reader.read_u16("type")?);
    let class = RecordClass::from_u16(reader.read_u16("class")?);
    let ttl = reader.read_u32("ttl")?;
    let rdlength = usize::from(reader.read_u16("rdlength")?);
    let rdata_start = reader.position();
    let rdata = reader.read_bytes(rdlength, "rdata")?;

    let data = match record_type {
        RecordType::TXT => RecordData::Txt(read_txt(reader, rdata_start, rdata)?),
        RecordType::A => {
            let octets: [u8; 4] = fixed_rdata(reader, rdata_start, rdata)?;
            RecordData::A(Ipv4Addr::from(octets))
        }
        RecordType::AAAA => {
            let octets: [u8; 16] = fixed_rdata(reader, rdata_start, rdata)?;
            RecordData::Aaaa(Ipv6Addr::from(octets))
        }
        t if t.carries_name() => {
            let mut target = reader.at(rdata_start);
            let name = target.read_name("rdata name")?;
            let consumed = target.position() - rdata_start;
            if consumed != rdlength {
                return Err(reader.error(
                    rdata_start,
                    "rdata name",
                    DecodeErrorKind::BadRdataLength {
                        expected: consumed,
                        actual: rdlength,
                    },
                ));
            }
            RecordData::Name(name)
        }
        _ => RecordData::Unparsed(rdata.to_vec()),
    };

    Ok(DnsResourceRecord {
        name,
        record_type,
        class,
        ttl,
        data,
    })
}

/// Splits TXT rdata into its length-prefixed character-strings. The
/// segments must fill the rdata exactly.
fn read_txt(
    reader: &WireReader<'_>,
    rdata_start: usize,
    rdata: &[u8],
) -> Result<Vec<Vec<u8>>, DecodeError> {
    let mut segments = Vec::new();
    let mut pos = 0;
    while pos < rdata.len() {
        let declared = usize::from(rdata[pos]);
        let remaining = rdata.len() - pos - 1;
        if declared > remaining {
            return Err(reader.error(
                rdata_start + pos,
                "txt segment",
                DecodeErrorKind::TxtOverrun {
                    declared,
                    remaining,
                },
            ));
        }
        segments.push(rdata[pos + 1..pos + 1 + declared].to_vec());
        pos += 1 + declared;
    }
    Ok(segments)
}

fn fixed_rdata<const N: usize>(
    reader: &WireReader<'_>,
    rdata_start: usize,
    rdata: &[u8],
) -> Result<[u8; N], DecodeError> {
    rdata.try_into().map_err(|_| {
        reader.error(
            rdata_start,
            "rdata",
            DecodeErrorKind::BadRdataLength {
                expected: N,
                actual: rdata.len(),
            },
        )
    })
}
