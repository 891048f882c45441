use anyhow::Context;

use crate::domain::ports::probe::IpProbe;

/// Query the external IP once and print it.
///
/// # Errors
///
/// Returns an error if the probe fails or JSON serialization fails.
pub async fn run_query(probe: &dyn IpProbe, json: bool) -> anyhow::Result<()> {
    let addr = probe
        .probe()
        .await
        .context("could not determine the external IP")?;

    if json {
        let output = serde_json::json!({ "ip": addr.to_string() });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{addr}");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::ports::probe::ProbeError;
    use async_trait::async_trait;
    use std::net::Ipv4Addr;

    struct FixedProbe;

    #[async_trait]
    impl IpProbe for FixedProbe {
        async fn probe(&self) -> Result<Ipv4Addr, ProbeError> {
            Ok(Ipv4Addr::new(203, 0, 113, 7))
        }
    }

    struct FailingProbe;

    #[async_trait]
    impl IpProbe for FailingProbe {
        async fn probe(&self) -> Result<Ipv4Addr, ProbeError> {
            Err(ProbeError::RequestFailed("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn query_prints_address() {
        assert!(run_query(&FixedProbe, false).await.is_ok());
    }

    #[tokio::test]
    async fn query_prints_json() {
        assert!(run_query(&FixedProbe, true).await.is_ok());
    }

    #[tokio::test]
    async fn query_propagates_probe_failure() {
        let result = run_query(&FailingProbe, false).await;
        assert!(result.is_err());
        let message = format!("{:#}", result.expect_err("should fail"));
        assert!(message.contains("could not determine the external IP"));
    }
}
