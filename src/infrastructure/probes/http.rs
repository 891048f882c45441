use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::probe::{IpProbe, ProbeError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Queries a "what is my IP" echo service over HTTP.
///
/// The service is expected to answer with the address on the first line of
/// the body; anything after the first line is ignored.
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    /// Builds a probe for the given echo service URL.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::RequestFailed` if the HTTP client cannot be
    /// initialized (e.g. TLS backend failure).
    pub fn new(url: impl Into<String>) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProbeError::RequestFailed(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IpProbe for HttpProbe {
    async fn probe(&self) -> Result<Ipv4Addr, ProbeError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ProbeError::RequestFailed(format!("{}: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::RequestFailed(format!(
                "{} answered HTTP {status}",
                self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::RequestFailed(format!("{}: {e}", self.url)))?;

        parse_ip_body(&body)
    }
}

/// Extracts and validates the address from an echo service response body.
/// Multi-line bodies are allowed; the first line must be the address.
pub fn parse_ip_body(body: &str) -> Result<Ipv4Addr, ProbeError> {
    let first_line = body.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return Err(ProbeError::EmptyResponse);
    }
    first_line
        .parse()
        .map_err(|_| ProbeError::InvalidAddress(first_line.to_string()))
}
