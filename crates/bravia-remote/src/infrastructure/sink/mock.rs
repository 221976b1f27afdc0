//! In-memory remote sink for tests.
//!
//! # Why a recording sink?
//!
//! A real sink presses keys on a real TV, which a test can neither reach nor
//! observe.  `RecordingSink` pushes every key and raw code into a
//! `Mutex<Vec<...>>` so assertions can inspect exactly what was sent and in
//! what order.
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every send return
//! `SinkError::Transport` while still recording the attempt.  This exercises
//! the best-effort paths of the typing use case.

use std::sync::Mutex;

use async_trait::async_trait;
use bravia_core::RemoteKey;

use crate::application::type_text::{RemoteSink, SinkError};

/// A sink that records every call instead of talking to a TV.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Every key passed to `send_key`, failed attempts included.
    pub keys: Mutex<Vec<RemoteKey>>,
    /// Every code passed to `send_raw`, failed attempts included.
    pub raw: Mutex<Vec<String>>,
    /// When `true`, every call returns `SinkError::Transport`.
    pub should_fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every send fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// A copy of the keys sent so far.
    pub fn sent_keys(&self) -> Vec<RemoteKey> {
        self.keys.lock().map(|k| k.clone()).unwrap_or_default()
    }

    /// A copy of the raw codes sent so far.
    pub fn sent_raw(&self) -> Vec<String> {
        self.raw.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RemoteSink for RecordingSink {
    async fn send_key(&self, key: RemoteKey) -> Result<(), SinkError> {
        if let Ok(mut keys) = self.keys.lock() {
            keys.push(key);
        }
        if self.should_fail {
            return Err(SinkError::Transport("mock failure".into()));
        }
        Ok(())
    }

    async fn send_raw(&self, code: &str) -> Result<(), SinkError> {
        if let Ok(mut raw) = self.raw.lock() {
            raw.push(code.to_string());
        }
        if self.should_fail {
            return Err(SinkError::Transport("mock failure".into()));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
