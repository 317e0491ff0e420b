use async_trait::async_trait;
use dnsproof_application::ports::DnsResolver;
use dnsproof_domain::{DnsMessage, DnsResourceRecord, DomainError};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Answers every query with a response echoing it plus the configured
/// records, or with the configured error.
pub struct MockDnsResolver {
    answers: Arc<RwLock<Vec<DnsResourceRecord>>>,
    error: Arc<RwLock<Option<DomainError>>>,
    calls: Arc<RwLock<Vec<DnsMessage>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(RwLock::new(Vec::new())),
            error: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn set_answers(&self, answers: Vec<DnsResourceRecord>) {
        *self.answers.write().await = answers;
    }

    pub async fn set_error(&self, error: DomainError) {
        *self.error.write().await = Some(error);
    }

    pub async fn calls(&self) -> Vec<DnsMessage> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError> {
        self.calls.write().await.push(query.clone());

        if let Some(err) = self.error.read().await.clone() {
            return Err(err);
        }

        let mut response = DnsMessage::response_to(query);
        response.answers = self.answers.read().await.clone();
        Ok(response)
    }

    fn endpoint(&self) -> &str {
        "mock://resolver"
    }
}
