//! TCP connect probe.
//!
//! Classifies a port by attempting a full TCP handshake through the operating
//! system's socket API. No data is sent or read; a completed connection is
//! dropped straight away.

use crate::error::ProbeError;
use crate::scanner::traits::{PortOutcome, Prober};
use crate::types::Port;
use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Probes ports with a bounded `connect()`.
///
/// Does not require elevated privileges. Each probe owns its socket for the
/// duration of the attempt, so any number of probes can run concurrently.
#[derive(Debug, Clone)]
pub struct TcpConnectProber {
    timeout: Duration,
}

impl TcpConnectProber {
    /// Create a prober that gives each connection attempt `timeout` to
    /// complete.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Attempt to connect to `addr`, classifying any failure.
    async fn attempt_connect(&self, addr: SocketAddr) -> Result<TcpStream, ProbeError> {
        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(classify_connect_error(&e)),
            Err(_) => Err(ProbeError::Timeout),
        }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, address: IpAddr, port: Port) -> PortOutcome {
        let addr = SocketAddr::new(address, port.as_u16());

        match self.attempt_connect(addr).await {
            Ok(stream) => {
                drop(stream);
                PortOutcome::open(port)
            }
            Err(e) => {
                trace!(%addr, error = %e, "probe failed");
                PortOutcome::closed(port)
            }
        }
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn classify_connect_error(e: &io::Error) -> ProbeError {
    if e.kind() == io::ErrorKind::ConnectionRefused {
        return ProbeError::Refused;
    }
    let message = e.to_string();
    if message.to_lowercase().contains("unreachable") {
        ProbeError::Unreachable(message)
    } else {
        ProbeError::Failed(message)
    }
}
