//! A sink that logs key presses instead of transmitting them.
//!
//! Used by the CLI for dry runs: the paced typing task runs exactly as it
//! would against a TV, and every IRCC code it would have sent shows up in
//! the log at `info` level.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bravia_core::RemoteKey;
use tracing::info;

use crate::application::type_text::{RemoteSink, SinkError};

/// Logs every send through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink {
    sent: AtomicUsize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys and codes "sent" so far.
    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RemoteSink for TracingSink {
    async fn send_key(&self, key: RemoteKey) -> Result<(), SinkError> {
        let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        info!(n, code = key.code(), "key {key}");
        Ok(())
    }

    async fn send_raw(&self, code: &str) -> Result<(), SinkError> {
        let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        info!(n, code, "raw IRCC");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_keys_and_raw_codes() {
        // Arrange
        let sink = TracingSink::new();

        // Act
        sink.send_key(RemoteKey::Left).await.unwrap();
        sink.send_raw("AAAAAgAAABoAAABaAw==").await.unwrap();

        // Assert
        assert_eq!(sink.sent_count(), 2);
    }
}
