use async_trait::async_trait;
use bytes::Bytes;
use dnsproof_domain::{DnsMessage, DnsResourceRecord, TransportError};
use dnsproof_infrastructure::dns::wire;
use dnsproof_infrastructure::dns::{DnsTransport, TransportResponse};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

enum Behaviour {
    /// Decode the query and answer it with these records.
    Answer(Vec<DnsResourceRecord>),
    /// Reply with fixed bytes regardless of the query.
    Raw(Vec<u8>),
    /// Answer, then rewrite the response before encoding.
    Tamper(fn(&mut DnsMessage)),
    Fail(TransportError),
}

/// In-process transport that speaks wire format, for exercising the
/// resolver without HTTP.
pub struct MockTransport {
    behaviour: Behaviour,
    sent: Arc<RwLock<Vec<Vec<u8>>>>,
}

impl MockTransport {
    pub fn answering(records: Vec<DnsResourceRecord>) -> Self {
        Self::with(Behaviour::Answer(records))
    }

    pub fn raw(bytes: Vec<u8>) -> Self {
        Self::with(Behaviour::Raw(bytes))
    }

    pub fn tampering(edit: fn(&mut DnsMessage)) -> Self {
        Self::with(Behaviour::Tamper(edit))
    }

    pub fn failing(error: TransportError) -> Self {
        Self::with(Behaviour::Fail(error))
    }

    fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.read().await.clone()
    }

    fn respond(query_bytes: &[u8], records: Vec<DnsResourceRecord>, edit: Option<fn(&mut DnsMessage)>) -> Vec<u8> {
        let query = wire::decode(query_bytes).unwrap();
        let mut response = DnsMessage::response_to(&query);
        response.answers = records;
        if let Some(edit) = edit {
            edit(&mut response);
        }
        wire::encode(&response).unwrap()
    }
}

#[async_trait]
impl DnsTransport for MockTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        _timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        self.sent.write().await.push(message_bytes.to_vec());

        let bytes = match &self.behaviour {
            Behaviour::Answer(records) => Self::respond(message_bytes, records.clone(), None),
            Behaviour::Raw(bytes) => bytes.clone(),
            Behaviour::Tamper(edit) => Self::respond(message_bytes, Vec::new(), Some(*edit)),
            Behaviour::Fail(err) => return Err(err.clone()),
        };

        Ok(TransportResponse {
            bytes: Bytes::from(bytes),
            protocol_used: "MOCK",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }

    fn endpoint(&self) -> &str {
        "mock://transport"
    }
}
