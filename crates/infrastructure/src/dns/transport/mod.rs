pub mod https;

use async_trait::async_trait;
use bytes::Bytes;
use dnsproof_domain::TransportError;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Bytes,

    pub protocol_used: &'static str,
}

/// Moves raw wire-format bytes to an upstream and back. One call is one
/// request; implementations never retry.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;

    fn protocol_name(&self) -> &'static str;

    fn endpoint(&self) -> &str;
}
