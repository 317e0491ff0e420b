/// Hand-assembles wire-format messages, including malformed ones the
/// encoder would refuse to produce.
pub struct WireBuilder {
    buf: Vec<u8>,
}

impl WireBuilder {
    pub fn new(id: u16, flags: u16) -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(&id.to_be_bytes());
        buf.extend_from_slice(&flags.to_be_bytes());
        buf.extend_from_slice(&[0; 8]);
        Self { buf }
    }

    /// A NOERROR, RD+RA response header.
    pub fn response(id: u16) -> Self {
        Self::new(id, 0x8180)
    }

    pub fn counts(mut self, qd: u16, an: u16, ns: u16, ar: u16) -> Self {
        for (i, count) in [qd, an, ns, ar].into_iter().enumerate() {
            let at = 4 + i * 2;
            self.buf[at..at + 2].copy_from_slice(&count.to_be_bytes());
        }
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        for label in name.split('.').filter(|l| !l.is_empty()) {
            self.buf.push(label.len() as u8);
            self.buf.extend_from_slice(label.as_bytes());
        }
        self.buf.push(0);
        self
    }

    /// Compression pointer to `offset`.
    pub fn pointer(mut self, offset: u16) -> Self {
        self.buf.extend_from_slice(&(0xC000 | offset).to_be_bytes());
        self
    }

    pub fn question(self, name: &str, qtype: u16) -> Self {
        self.name(name).u16(qtype).u16(1)
    }

    /// Record header after the owner name: type, class IN, ttl, rdlength.
    pub fn record_header(self, rtype: u16, ttl: u32, rdlength: u16) -> Self {
        self.u16(rtype).u16(1).u32(ttl).u16(rdlength)
    }

    pub fn txt(self, owner: &str, ttl: u32, segments: &[&str]) -> Self {
        let rdlength: usize = segments.iter().map(|s| s.len() + 1).sum();
        let mut builder = self.name(owner).record_header(16, ttl, rdlength as u16);
        for segment in segments {
            builder = builder.raw(&[segment.len() as u8]).raw(segment.as_bytes());
        }
        builder
    }

    pub fn u16(mut self, value: u16) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}
