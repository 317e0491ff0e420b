use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_RESOLVER_URL: &str = "https://cloudflare-dns.com/dns-query";

/// How the wire-format query is carried in the `dns` URL parameter.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayloadEncoding {
    /// Standard alphabet with padding.
    Base64,

    /// URL-safe alphabet without padding (RFC 8484).
    #[default]
    Base64Url,
}

impl PayloadEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Base64Url => "base64url",
        }
    }
}

impl fmt::Display for PayloadEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "base64" => Ok(Self::Base64),
            "base64url" => Ok(Self::Base64Url),
            _ => Err(format!(
                "Invalid payload encoding '{}'. Expected 'base64' or 'base64url'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// DoH endpoint, without query string.
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub encoding: PayloadEncoding,

    /// Reject responses whose id or question differ from the query.
    #[serde(default = "default_true")]
    pub verify_echo: bool,
}

impl ResolverConfig {
    pub fn hostname(&self) -> Option<&str> {
        let rest = self
            .url
            .strip_prefix("https://")
            .or_else(|| self.url.strip_prefix("http://"))?;
        rest.split(['/', '?']).next().filter(|host| !host.is_empty())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            encoding: PayloadEncoding::default(),
            verify_echo: true,
        }
    }
}

fn default_url() -> String {
    DEFAULT_RESOLVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}
