use std::net::Ipv4Addr;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to query external IP: {0}")]
    RequestFailed(String),
    #[error("echo service returned an empty response")]
    EmptyResponse,
    #[error("invalid IP address {0:?}")]
    InvalidAddress(String),
}

/// Source of the host's current external IPv4 address.
#[async_trait]
pub trait IpProbe: Send + Sync {
    /// Query the external address once.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError` if the request fails or the response body
    /// does not start with a valid IPv4 address.
    async fn probe(&self) -> Result<Ipv4Addr, ProbeError>;
}
