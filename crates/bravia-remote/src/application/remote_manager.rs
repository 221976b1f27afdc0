//! RemoteManager: the single entry point the front-end talks to.
//!
//! It bundles the three things a remote screen needs:
//!
//! - fixed key presses (`send`, or by name with `send_key_named`),
//! - named TV commands resolved through the [`CommandResolver`]
//!   (`send_by_name` and the app shortcuts),
//! - text entry on the on-screen keyboard via [`TypeTextUseCase`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bravia_core::{CommandDirectory, RemoteKey, TextPlan, Transliteration};
use thiserror::Error;
use tracing::{debug, error};

use super::resolve_command::{CommandResolver, DirectoryFetcher};
use super::type_text::{Pacing, RemoteSink, SinkError, TypeTextUseCase, TypingHandle};

/// Error type for remote-manager operations.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// None of the candidate names is in the TV's command directory.
    #[error("command not found for candidates {candidates:?}")]
    CommandNotFound { candidates: Vec<String> },

    /// The name does not match any fixed remote key.
    #[error("unknown remote key: {0}")]
    UnknownKey(String),

    /// The name does not match any app shortcut.
    #[error("unknown app: {0}")]
    UnknownApp(String),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Apps and modes that are launched through the command directory.
///
/// Each model names these differently, so each carries a list of aliases
/// tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppShortcut {
    YouTube,
    Netflix,
    Tv,
    DemoMode,
}

impl AppShortcut {
    pub const ALL: [AppShortcut; 4] = [
        AppShortcut::YouTube,
        AppShortcut::Netflix,
        AppShortcut::Tv,
        AppShortcut::DemoMode,
    ];

    /// Directory names to try, most common first.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            AppShortcut::YouTube => &["YouTube", "Youtube", "YT", "APPS_YOUTUBE"],
            AppShortcut::Netflix => &["Netflix", "NETFLIX", "APPS_NETFLIX"],
            AppShortcut::Tv => &["Tv", "TV", "TvAnalog", "TvAntenna"],
            AppShortcut::DemoMode => &["DemoMode", "Demo Mode", "DEMO_MODE", "Demo"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AppShortcut::YouTube => "youtube",
            AppShortcut::Netflix => "netflix",
            AppShortcut::Tv => "tv",
            AppShortcut::DemoMode => "demo-mode",
        }
    }
}

impl fmt::Display for AppShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AppShortcut {
    type Err = RemoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase().replace('_', "-");
        AppShortcut::ALL
            .into_iter()
            .find(|app| app.name() == wanted)
            .ok_or_else(|| RemoteError::UnknownApp(s.to_string()))
    }
}

/// Façade over key delivery, command resolution and typing.
pub struct RemoteManager {
    sink: Arc<dyn RemoteSink>,
    resolver: CommandResolver,
    typing: TypeTextUseCase,
}

impl RemoteManager {
    pub fn new(
        sink: Arc<dyn RemoteSink>,
        fetcher: Arc<dyn DirectoryFetcher>,
        pacing: Pacing,
    ) -> Self {
        Self {
            typing: TypeTextUseCase::new(Arc::clone(&sink), pacing),
            resolver: CommandResolver::new(fetcher),
            sink,
        }
    }

    /// Overrides the per-character step budget used when typing.
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.typing = self.typing.with_max_steps(max_steps);
        self
    }

    pub fn resolver(&self) -> &CommandResolver {
        &self.resolver
    }

    /// Presses one fixed remote key.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Sink`] if the key could not be delivered.
    pub async fn send(&self, key: RemoteKey) -> Result<(), RemoteError> {
        debug!("sending {key}");
        self.sink.send_key(key).await?;
        Ok(())
    }

    /// Presses the fixed key called `name` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::UnknownKey`] for an unknown name, or
    /// [`RemoteError::Sink`] if the key could not be delivered.
    pub async fn send_key_named(&self, name: &str) -> Result<RemoteKey, RemoteError> {
        let key = RemoteKey::from_name(name)
            .ok_or_else(|| RemoteError::UnknownKey(name.to_string()))?;
        self.send(key).await?;
        Ok(key)
    }

    /// Sends a raw IRCC code.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Sink`] if the code could not be delivered.
    pub async fn send_raw(&self, code: &str) -> Result<(), RemoteError> {
        self.sink.send_raw(code).await?;
        Ok(())
    }

    /// Resolves the first known candidate and sends its code.
    ///
    /// Returns the code that was sent.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::CommandNotFound`] when no candidate resolves
    /// (including when the directory could not be fetched), or
    /// [`RemoteError::Sink`] if the code could not be delivered.
    pub async fn send_by_name<S>(&self, candidates: &[S]) -> Result<String, RemoteError>
    where
        S: AsRef<str> + Sync,
    {
        let Some(code) = self.resolver.resolve(candidates).await else {
            let candidates: Vec<String> =
                candidates.iter().map(|c| c.as_ref().to_string()).collect();
            error!("command not found for candidates {candidates:?}");
            return Err(RemoteError::CommandNotFound { candidates });
        };
        self.sink.send_raw(&code).await?;
        Ok(code)
    }

    /// Launches an app or mode through its candidate names.
    ///
    /// # Errors
    ///
    /// See [`send_by_name`](Self::send_by_name).
    pub async fn launch(&self, app: AppShortcut) -> Result<(), RemoteError> {
        self.send_by_name(app.candidates()).await.map(|_| ())
    }

    pub async fn youtube(&self) -> Result<(), RemoteError> {
        self.launch(AppShortcut::YouTube).await
    }

    pub async fn netflix(&self) -> Result<(), RemoteError> {
        self.launch(AppShortcut::Netflix).await
    }

    pub async fn tv(&self) -> Result<(), RemoteError> {
        self.launch(AppShortcut::Tv).await
    }

    pub async fn demo_mode(&self) -> Result<(), RemoteError> {
        self.launch(AppShortcut::DemoMode).await
    }

    /// A snapshot of the TV's command directory, for listing screens.
    ///
    /// Empty when the directory could not be loaded.
    pub async fn load_commands(&self) -> CommandDirectory {
        self.resolver.directory().await
    }

    /// Re-fetches the command directory and returns the resulting snapshot.
    pub async fn refresh_commands(&self) -> CommandDirectory {
        self.resolver
            .refresh()
            .await
            .map(|d| d.as_ref().clone())
            .unwrap_or_default()
    }

    /// Plans `text` without sending anything.
    pub fn plan_text(&self, text: &str) -> (Transliteration, TextPlan) {
        self.typing.plan(text)
    }

    /// Starts typing `text` as a background task.  Dropping the returned
    /// handle cancels it.
    pub fn type_text(&self, text: impl Into<String>) -> TypingHandle {
        self.typing.spawn(text)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
