//! Ctrl-C handling.
//!
//! Once tokio listens for SIGINT the default handler no longer terminates the
//! process, so every place that waits on the operator must also wait on
//! [`ctrl_c`].

use std::future::{self, Future};
use std::io;
use tracing::warn;

/// Resolve when the operator presses Ctrl-C.
///
/// If the handler cannot be installed this never resolves.
pub async fn ctrl_c() {
    until_signalled(tokio::signal::ctrl_c()).await
}

async fn until_signalled<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "unable to listen for Ctrl-C");
        future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_failed_registration_never_fires() {
        let failed = async { Err(io::Error::other("signal driver unavailable")) };
        let fired = tokio::time::timeout(Duration::from_secs(60), until_signalled(failed)).await;
        assert!(fired.is_err());
    }

    #[tokio::test]
    async fn test_delivered_signal_fires() {
        until_signalled(async { Ok(()) }).await;
    }
}
