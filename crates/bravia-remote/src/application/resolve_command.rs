//! CommandResolver: looks up named TV commands by candidate aliases.
//!
//! The TV's command directory is fetched lazily, on the first lookup, and then
//! kept for the resolver's lifetime.  Only a successful, non-empty fetch is
//! kept: a failed or empty fetch leaves the cache empty so the next lookup
//! tries again.
//!
//! # Single flight
//!
//! The cache sits behind a `tokio::sync::Mutex` that stays locked while the
//! fetch is in progress.  When several lookups race on a cold cache, the
//! first one fetches and the rest wait for its result instead of each
//! issuing their own request.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bravia_core::{CommandDirectory, DirectoryEntry, ProtocolError};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Error type for directory fetches.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Source of the TV's command directory.
///
/// Infrastructure implementations query the TV or read a saved response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryFetcher: Send + Sync {
    /// Fetches the raw `(name, code)` listing.
    async fn fetch_directory(&self) -> Result<Vec<DirectoryEntry>, FetchError>;
}

type Cache = Option<Arc<CommandDirectory>>;

/// Lazily populated, at-most-once command directory.
pub struct CommandResolver {
    fetcher: Arc<dyn DirectoryFetcher>,
    cache: Mutex<Cache>,
}

impl CommandResolver {
    pub fn new(fetcher: Arc<dyn DirectoryFetcher>) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(None),
        }
    }

    /// Returns the code of the first candidate the TV knows, fetching the
    /// directory first if needed.
    ///
    /// Returns `None` when no candidate matches or the directory is unavailable.
    pub async fn resolve<S>(&self, candidates: &[S]) -> Option<String>
    where
        S: AsRef<str> + Sync,
    {
        let directory = self.ensure_populated().await?;
        let code = directory.first_match(candidates).map(str::to_string);
        if code.is_none() {
            let names: Vec<&str> = candidates.iter().map(AsRef::as_ref).collect();
            debug!("no directory entry for any of {names:?}");
        }
        code
    }

    /// Returns the cached directory, fetching it if the cache is empty.
    pub async fn ensure_populated(&self) -> Option<Arc<CommandDirectory>> {
        let mut cache = self.cache.lock().await;
        if let Some(directory) = cache.as_ref() {
            return Some(Arc::clone(directory));
        }
        self.populate(&mut cache).await
    }

    /// Fetches the directory again.
    ///
    /// The previous directory is kept when the new fetch fails or comes back
    /// empty.
    pub async fn refresh(&self) -> Option<Arc<CommandDirectory>> {
        let mut cache = self.cache.lock().await;
        match self.populate(&mut cache).await {
            Some(directory) => Some(directory),
            None => cache.as_ref().map(Arc::clone),
        }
    }

    /// A snapshot of the directory, empty when it could not be loaded.
    pub async fn directory(&self) -> CommandDirectory {
        self.ensure_populated()
            .await
            .map(|d| d.as_ref().clone())
            .unwrap_or_default()
    }

    /// Returns `true` once a directory has been cached.
    pub async fn is_populated(&self) -> bool {
        self.cache.lock().await.is_some()
    }

    async fn populate(&self, cache: &mut MutexGuard<'_, Cache>) -> Option<Arc<CommandDirectory>> {
        let entries = match self.fetcher.fetch_directory().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("failed to fetch command directory: {e}");
                return None;
            }
        };

        let directory = CommandDirectory::from_entries(entries);
        if directory.is_empty() {
            warn!("command directory is empty; will retry on next lookup");
            return None;
        }

        info!(commands = directory.len(), "command directory loaded");
        let directory = Arc::new(directory);
        **cache = Some(Arc::clone(&directory));
        Some(directory)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
