use super::{MAX_LABEL_LEN, MAX_NAME_LEN};
use bytes::BufMut;
use dnsproof_domain::{DnsMessage, DnsResourceRecord, EncodeError, RecordData};

const MAX_TXT_SEGMENT_LEN: usize = 255;

/// Serialize a message to wire format. Names are written uncompressed.
pub fn encode(message: &DnsMessage) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(512);

    buf.put_u16(message.id);
    buf.put_u16(message.flags.bits());
    buf.put_u16(section_count(message.questions.len())?);
    buf.put_u16(section_count(message.answers.len())?);
    buf.put_u16(section_count(message.authorities.len())?);
    buf.put_u16(section_count(message.additionals.len())?);

    for question in &message.questions {
        put_name(&mut buf, &question.name)?;
        buf.put_u16(question.record_type.to_u16());
        buf.put_u16(question.class.to_u16());
    }

    for record in message
        .answers
        .iter()
        .chain(&message.authorities)
        .chain(&message.additionals)
    {
        put_record(&mut buf, record)?;
    }

    Ok(buf)
}

fn section_count(len: usize) -> Result<u16, EncodeError> {
    u16::try_from(len).map_err(|_| EncodeError::SectionTooLarge(len))
}

fn put_record(buf: &mut Vec<u8>, record: &DnsResourceRecord) -> Result<(), EncodeError> {
    put_name(buf, &record.name)?;
    buf.put_u16(record.record_type.to_u16());
    buf.put_u16(record.class.to_u16());
    buf.put_u32(record.ttl);

    let mut rdata = Vec::new();
    match &record.data {
        RecordData::Txt(segments) => {
            for segment in segments {
                if segment.len() > MAX_TXT_SEGMENT_LEN {
                    return Err(EncodeError::TxtSegmentTooLong(segment.len()));
                }
                rdata.put_u8(segment.len() as u8);
                rdata.put_slice(segment);
            }
        }
        RecordData::A(addr) => rdata.put_slice(&addr.octets()),
        RecordData::Aaaa(addr) => rdata.put_slice(&addr.octets()),
        RecordData::Name(target) => put_name(&mut rdata, target)?,
        RecordData::Unparsed(raw) => rdata.put_slice(raw),
    }

    let rdlength =
        u16::try_from(rdata.len()).map_err(|_| EncodeError::RdataTooLong(rdata.len()))?;
    buf.put_u16(rdlength);
    buf.put_slice(&rdata);
    Ok(())
}

/// Writes `name` as a sequence of length-prefixed labels. A trailing dot is
/// optional; `""` and `"."` both mean the root.
fn put_name(buf: &mut Vec<u8>, name: &str) -> Result<(), EncodeError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        buf.put_u8(0);
        return Ok(());
    }

    let mut wire_len = 1;
    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(EncodeError::EmptyLabel(name.to_string()));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(EncodeError::LabelTooLong(label.to_string()));
        }
        wire_len += label.len() + 1;
    }
    if wire_len > MAX_NAME_LEN {
        return Err(EncodeError::NameTooLong(name.to_string()));
    }

    for label in trimmed.split('.') {
        buf.put_u8(label.len() as u8);
        buf.put_slice(label.as_bytes());
    }
    buf.put_u8(0);
    Ok(())
}
