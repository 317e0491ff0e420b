//! DNS Query Builder
//!
//! Constructs query messages: a random id, the RD flag, one question of
//! class IN and empty answer/authority/additional sections.

use crate::dns_message::{DnsMessage, DnsQuestion};
use crate::dns_record::RecordType;
use crate::eligibility::CandidateName;

pub struct QueryBuilder;

impl QueryBuilder {
    /// Build a recursive query for `fqdn` with a fresh random id.
    pub fn build_query(record_type: RecordType, fqdn: &str) -> DnsMessage {
        Self::build_query_with_id(fastrand::u16(..), record_type, fqdn)
    }

    pub fn build_query_with_id(id: u16, record_type: RecordType, fqdn: &str) -> DnsMessage {
        DnsMessage::query(id, DnsQuestion::new(fqdn, record_type))
    }

    /// TXT query for `_ens.<name>`.
    pub fn build_proof_query(candidate: &CandidateName) -> DnsMessage {
        Self::build_query(RecordType::TXT, &candidate.proof_domain())
    }
}
