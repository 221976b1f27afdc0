//! Reads the command directory from a saved `getRemoteControllerInfo` response.
//!
//! Capture the response once from a real TV, for example:
//!
//! ```text
//! curl -s -H "X-Auth-PSK: 0000" \
//!      -d '{"method":"getRemoteControllerInfo","id":1,"params":[],"version":"1.0"}' \
//!      http://192.168.1.20/sony/system > commands.json
//! ```
//!
//! and point the remote at the file.  The file is re-read on every fetch,
//! so editing it and calling `refresh` picks up the change.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bravia_core::{decode_remote_controller_info, DirectoryEntry, JsonRpcResponse};
use tracing::debug;

use crate::application::resolve_command::{DirectoryFetcher, FetchError};

/// A [`DirectoryFetcher`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileDirectory {
    path: PathBuf,
}

impl JsonFileDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DirectoryFetcher for JsonFileDirectory {
    async fn fetch_directory(&self) -> Result<Vec<DirectoryEntry>, FetchError> {
        debug!("reading command directory from {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        let response = JsonRpcResponse::from_json(&body)?;
        Ok(decode_remote_controller_info(response)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
