use super::MAX_NAME_LEN;
use dnsproof_domain::{DecodeError, DecodeErrorKind, Section};

const POINTER_MASK: u8 = 0xC0;
const MAX_POINTER_HOPS: usize = 64;

/// Bounds-checked cursor over a wire-format message.
///
/// Every read names the field it is reading so a failure can say where the
/// message went wrong.
pub(crate) struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
    section: Section,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            section: Section::Header,
        }
    }

    /// A reader over the same buffer positioned at `pos`, used for names
    /// inside rdata that may point back into earlier sections.
    pub fn at(&self, pos: usize) -> Self {
        Self {
            buf: self.buf,
            pos,
            section: self.section,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn enter(&mut self, section: Section) {
        self.section = section;
    }

    pub fn error(&self, offset: usize, field: &'static str, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(offset, self.section, field, kind)
    }

    pub fn read_bytes(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::truncated(
                self.pos,
                self.section,
                field,
                len,
                self.remaining(),
            ));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        let b = self.read_bytes(2, field)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        let b = self.read_bytes(4, field)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a possibly compressed domain name and returns it in dotted form
    /// without the trailing root dot (`"."` for the root itself).
    ///
    /// Pointers must refer strictly backwards; the cursor ends up just past
    /// the first pointer or the terminating zero label.
    pub fn read_name(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let mut labels: Vec<String> = Vec::new();
        let mut cursor = self.pos;
        let mut resume_at: Option<usize> = None;
        let mut hops = 0;
        let mut wire_len = 1;

        loop {
            let len_byte = *self
                .buf
                .get(cursor)
                .ok_or_else(|| DecodeError::truncated(cursor, self.section, field, 1, 0))?;

            match len_byte & POINTER_MASK {
                0x00 => {}
                POINTER_MASK => {
                    let low = *self.buf.get(cursor + 1).ok_or_else(|| {
                        DecodeError::truncated(cursor, self.section, field, 2, 1)
                    })?;
                    let target = (usize::from(len_byte & !POINTER_MASK) << 8) | usize::from(low);
                    if target >= cursor {
                        return Err(self.error(cursor, field, DecodeErrorKind::BadPointer { target }));
                    }
                    hops += 1;
                    if hops > MAX_POINTER_HOPS {
                        return Err(self.error(cursor, field, DecodeErrorKind::PointerLoop));
                    }
                    resume_at.get_or_insert(cursor + 2);
                    cursor = target;
                    continue;
                }
                reserved => {
                    return Err(self.error(
                        cursor,
                        field,
                        DecodeErrorKind::ReservedLabelType(reserved),
                    ));
                }
            }

            let len = usize::from(len_byte);
            if len == 0 {
                cursor += 1;
                break;
            }
            wire_len += len + 1;
            if wire_len > MAX_NAME_LEN {
                return Err(self.error(cursor, field, DecodeErrorKind::NameTooLong));
            }

            let start = cursor + 1;
            let available = self.buf.len().saturating_sub(start);
            if len > available {
                return Err(DecodeError::truncated(start, self.section, field, len, available));
            }
            let label = &self.buf[start..start + len];
            if label.contains(&b'.') {
                return Err(self.error(cursor, field, DecodeErrorKind::DotInLabel));
            }
            labels.push(String::from_utf8_lossy(label).into_owned());
            cursor = start + len;
        }

        self.pos = resume_at.unwrap_or(cursor);

        if labels.is_empty() {
            Ok(".".to_string())
        } else {
            Ok(labels.join("."))
        }
    }
}
