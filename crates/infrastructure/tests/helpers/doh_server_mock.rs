use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use dnsproof_domain::{DnsMessage, DnsResourceRecord};
use dnsproof_infrastructure::dns::wire;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, RwLock};

#[derive(Clone)]
pub enum MockReply {
    /// Decode the `dns` parameter and answer it with these records.
    Answer(Vec<DnsResourceRecord>),
    /// Fixed body with status 200.
    Raw(Vec<u8>),
    /// Empty body with this status.
    Status(u16),
    /// Accept the connection and never answer.
    Hang,
    /// Answer with no records after this long.
    Delayed(Duration),
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub accept: Option<String>,
    /// The `dns` parameter, base64-decoded.
    pub query: Option<Vec<u8>>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Minimal HTTP/1.1 DoH endpoint on a tokio `TcpListener`.
pub struct MockDohServer {
    addr: SocketAddr,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDohServer {
    pub async fn start(reply: MockReply) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(RwLock::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            let reply = reply.clone();
                            let recorded = Arc::clone(&recorded);
                            tokio::spawn(async move {
                                let _ = Self::handle(stream, reply, recorded).await;
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}/dns-query", self.addr)
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    async fn handle(
        mut stream: TcpStream,
        reply: MockReply,
        recorded: Arc<RwLock<Vec<RecordedRequest>>>,
    ) -> std::io::Result<()> {
        let mut head = Vec::new();
        let mut chunk = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                return Ok(());
            }
            head.extend_from_slice(&chunk[..n]);
        }

        let request = parse_request(&String::from_utf8_lossy(&head));
        let query = request.query.clone();
        recorded.write().await.push(request);

        let (status, body) = match reply {
            MockReply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                return Ok(());
            }
            MockReply::Status(status) => (status, Vec::new()),
            MockReply::Raw(bytes) => (200, bytes),
            MockReply::Answer(records) => answer(query.as_deref(), records),
            MockReply::Delayed(delay) => {
                tokio::time::sleep(delay).await;
                answer(query.as_deref(), Vec::new())
            }
        };

        let header = format!(
            "HTTP/1.1 {} Mock\r\nContent-Type: application/dns-message\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        );
        stream.write_all(header.as_bytes()).await?;
        stream.write_all(&body).await?;
        stream.shutdown().await
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDohServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn answer(query: Option<&[u8]>, records: Vec<DnsResourceRecord>) -> (u16, Vec<u8>) {
    match query.map(wire::decode) {
        Some(Ok(query)) => {
            let mut response = DnsMessage::response_to(&query);
            response.answers = records;
            (200, wire::encode(&response).unwrap_or_default())
        }
        _ => (400, Vec::new()),
    }
}

fn parse_request(head: &str) -> RecordedRequest {
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default();

    let (path, query_string) = target.split_once('?').unwrap_or((target, ""));
    let params: Vec<(String, String)> = query_string
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(k), percent_decode(v))
        })
        .collect();

    let accept = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("accept"))
        .map(|(_, value)| value.trim().to_string());

    let query = params
        .iter()
        .find(|(k, _)| k == "dns")
        .and_then(|(_, v)| {
            URL_SAFE_NO_PAD
                .decode(v)
                .or_else(|_| STANDARD.decode(v))
                .ok()
        });

    RecordedRequest {
        method,
        path: path.to_string(),
        params,
        accept,
        query,
    }
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
                match u8::from_str_radix(hex, 16) {
                    Ok(b) => {
                        out.push(b);
                        i += 3;
                        continue;
                    }
                    Err(_) => out.push(b'%'),
                }
            }
            b'+' => out.push(b' '),
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
