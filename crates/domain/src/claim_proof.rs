//! Claimant addresses published under `_ens.<name>`.
//!
//! A proof record is a TXT record whose text is `a=0x` followed by a
//! 20-byte hex address. Segments of one record are joined before parsing.
//! CNAME aliases in the answer section are followed so a proof published
//! behind an alias still counts.

use crate::dns_message::{names_equal, DnsMessage};
use crate::dns_record::RecordData;
use std::fmt;

pub const CLAIM_ADDRESS_PREFIX: &str = "a=";

const ADDRESS_HEX_LEN: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClaimAddress(String);

impl ClaimAddress {
    /// Accepts `0x` + 40 hex digits, any case; stored lowercase.
    pub fn parse(text: &str) -> Option<Self> {
        let hex = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))?;
        if hex.len() != ADDRESS_HEX_LEN || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClaimProof {
    pub addresses: Vec<ClaimAddress>,

    /// `a=` entries whose value is not a well-formed address.
    pub invalid: Vec<String>,
}

impl ClaimProof {
    pub fn from_message(proof_domain: &str, message: &DnsMessage) -> Self {
        let mut owners: Vec<&str> = vec![proof_domain];
        let mut proof = ClaimProof::default();

        for record in &message.answers {
            if !owners.iter().any(|owner| names_equal(owner, &record.name)) {
                continue;
            }
            match &record.data {
                RecordData::Name(target) if record.record_type.carries_name() => {
                    owners.push(target);
                }
                RecordData::Txt(segments) => {
                    let text = String::from_utf8_lossy(&segments.concat()).into_owned();
                    proof.push_text(&text);
                }
                _ => {}
            }
        }

        proof
    }

    fn push_text(&mut self, text: &str) {
        let Some(value) = text.strip_prefix(CLAIM_ADDRESS_PREFIX) else {
            return;
        };
        match ClaimAddress::parse(value.trim()) {
            Some(address) if !self.addresses.contains(&address) => self.addresses.push(address),
            Some(_) => {}
            None => self.invalid.push(text.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
