//! Network availability gate for background ingestion
//!
//! Scheduled runs are skipped while the flight API host is unreachable
//! instead of burning a run on a guaranteed transport failure.

use std::time::Duration;

use async_trait::async_trait;
use routewatch_domain::{Result, RouteWatchError};
use tokio::net::TcpStream;
use tracing::debug;
use url::Url;

/// Decides whether a scheduled run should go ahead.
#[async_trait]
pub trait NetworkGate: Send + Sync {
    async fn is_available(&self) -> bool;
}

/// Gate that never blocks a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAvailable;

#[async_trait]
impl NetworkGate for AlwaysAvailable {
    async fn is_available(&self) -> bool {
        true
    }
}

/// Gate that opens when a TCP connection to the target host succeeds.
#[derive(Debug, Clone)]
pub struct TcpReachability {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpReachability {
    /// Check `host:port`, giving up on a connect after `timeout`.
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self { host: host.into(), port, timeout }
    }

    /// Check the host and port a URL points at.
    pub fn for_url(url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|err| RouteWatchError::Config(format!("invalid URL '{url}': {err}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| RouteWatchError::Config(format!("URL '{url}' has no host")))?;
        let port = parsed
            .port_or_known_default()
            .ok_or_else(|| RouteWatchError::Config(format!("URL '{url}' has no known port")))?;

        Ok(Self::new(host, port, timeout))
    }
}

#[async_trait]
impl NetworkGate for TcpReachability {
    async fn is_available(&self) -> bool {
        let target = (self.host.as_str(), self.port);
        match tokio::time::timeout(self.timeout, TcpStream::connect(target)).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(err)) => {
                debug!(host = %self.host, port = self.port, error = %err, "host unreachable");
                false
            }
            Err(_) => {
                debug!(host = %self.host, port = self.port, "reachability check timed out");
                false
            }
        }
    }
}
