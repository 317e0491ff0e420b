//! DNS proof domain layer
pub mod claim_proof;
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod eligibility;
pub mod errors;
pub mod query_builder;

pub use claim_proof::{ClaimAddress, ClaimProof};
pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, PayloadEncoding, ResolverConfig};
pub use dns_message::{DnsMessage, DnsQuestion, MessageFlags, ResponseCode};
pub use dns_record::{DnsResourceRecord, RecordClass, RecordData, RecordType};
pub use eligibility::{classify, is_eligible, CandidateName, NameShape, PROOF_LABEL};
pub use errors::{DecodeError, DecodeErrorKind, DomainError, EncodeError, Section, TransportError};
pub use query_builder::QueryBuilder;
