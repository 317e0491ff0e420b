use async_trait::async_trait;
use dnsproof_domain::{DnsMessage, DomainError};

/// Sends one query message upstream and returns the decoded response.
///
/// Implementations perform exactly one round trip per call: no retries and
/// no fallback to another server.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError>;

    /// Human-readable upstream, used in logs and reports.
    fn endpoint(&self) -> &str;
}
