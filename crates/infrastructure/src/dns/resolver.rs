use super::transport::https::HttpsTransport;
use super::transport::DnsTransport;
use super::wire;
use async_trait::async_trait;
use dnsproof_application::ports::DnsResolver;
use dnsproof_domain::{DnsMessage, DomainError, ResolverConfig};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// DoH-backed implementation of the resolver port: encode, send once,
/// decode, then check that the answer belongs to the query.
pub struct DohResolver {
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
    verify_echo: bool,
}

impl DohResolver {
    pub fn new(transport: Arc<dyn DnsTransport>, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            verify_echo: true,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(
            Arc::new(HttpsTransport::from_config(config)),
            Duration::from_secs(config.timeout_secs),
        )
        .with_echo_verification(config.verify_echo)
    }

    pub fn with_echo_verification(mut self, enabled: bool) -> Self {
        self.verify_echo = enabled;
        self
    }
}

#[async_trait]
impl DnsResolver for DohResolver {
    async fn resolve(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError> {
        let start = Instant::now();
        let wire_query = wire::encode(query)?;

        let response = self.transport.send(&wire_query, self.timeout).await?;
        let message = wire::decode(&response.bytes)?;

        if self.verify_echo {
            verify_echo(query, &message)?;
        }

        debug!(
            id = message.id,
            protocol = response.protocol_used,
            rcode = %message.response_code(),
            answers = message.answers.len(),
            truncated = message.flags.truncated(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "DoH query answered"
        );

        Ok(message)
    }

    fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }
}

/// A response must carry QR, the query's id and the query's questions.
fn verify_echo(query: &DnsMessage, response: &DnsMessage) -> Result<(), DomainError> {
    if !response.is_response() {
        return Err(DomainError::ResponseMismatch(
            "QR bit not set on response".to_string(),
        ));
    }

    if response.id != query.id {
        return Err(DomainError::ResponseMismatch(format!(
            "response id {} does not match query id {}",
            response.id, query.id
        )));
    }

    let same_questions = response.questions.len() == query.questions.len()
        && response
            .questions
            .iter()
            .zip(&query.questions)
            .all(|(answered, asked)| answered.matches(asked));
    if !same_questions {
        return Err(DomainError::ResponseMismatch(format!(
            "question section differs from query ({})",
            query
                .question()
                .map(|q| q.to_string())
                .unwrap_or_default()
        )));
    }

    Ok(())
}
