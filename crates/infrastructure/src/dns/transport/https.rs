//! HTTPS transport for DNS queries: DNS-over-HTTPS, GET form
//!
//! The wire-format query travels base64-encoded in the `dns` URL parameter;
//! the response body is the raw wire-format answer.
//!
//! Wire format (HTTP):
//! ```text
//! GET /dns-query?ct=application/dns-udpwireformat&dns=<payload> HTTP/1.1
//! Accept: application/dns-message
//! ```

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use dnsproof_domain::{PayloadEncoding, ResolverConfig, TransportError};
use std::error::Error as StdError;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

/// Shared HTTP client with connection pooling. No client-wide timeout: each
/// `send` is bounded by the caller's duration.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Value of the `ct` parameter naming the payload's media type.
const WIRE_FORMAT_CONTENT_TYPE: &str = "application/dns-udpwireformat";

pub struct HttpsTransport {
    url: String,
    encoding: PayloadEncoding,
}

impl HttpsTransport {
    pub fn new(url: String, encoding: PayloadEncoding) -> Self {
        Self { url, encoding }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.url.clone(), config.encoding)
    }

    pub fn encoding(&self) -> PayloadEncoding {
        self.encoding
    }

    pub fn encode_payload(&self, message_bytes: &[u8]) -> String {
        match self.encoding {
            PayloadEncoding::Base64 => STANDARD.encode(message_bytes),
            PayloadEncoding::Base64Url => URL_SAFE_NO_PAD.encode(message_bytes),
        }
    }

    fn request_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                url: self.url.clone(),
            }
        } else if is_connection_refused(&err) {
            TransportError::ConnectionRefused {
                url: self.url.clone(),
            }
        } else {
            TransportError::Request {
                url: self.url.clone(),
                reason: err.to_string(),
            }
        }
    }
}

fn is_connection_refused(err: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = source {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = e.source();
    }
    false
}

#[async_trait]
impl DnsTransport for HttpsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let payload = self.encode_payload(message_bytes);

        debug!(
            url = %self.url,
            message_len = message_bytes.len(),
            encoding = %self.encoding,
            "Sending DoH query"
        );

        let response = tokio::time::timeout(
            timeout,
            SHARED_CLIENT
                .get(&self.url)
                .query(&[("ct", WIRE_FORMAT_CONTENT_TYPE), ("dns", payload.as_str())])
                .header("Accept", DNS_MESSAGE_CONTENT_TYPE)
                .send(),
        )
        .await
        .map_err(|_| TransportError::Timeout {
            url: self.url.clone(),
        })?
        .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %self.url, status = status.as_u16(), "DoH server returned error status");
            return Err(TransportError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let response_bytes = tokio::time::timeout(timeout, response.bytes())
            .await
            .map_err(|_| TransportError::Timeout {
                url: self.url.clone(),
            })?
            .map_err(|e| TransportError::Body {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            url = %self.url,
            response_len = response_bytes.len(),
            "DoH response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "HTTPS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "HTTPS"
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
