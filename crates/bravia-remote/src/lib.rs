//! bravia-remote library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does bravia-remote do? (for beginners)
//!
//! A Bravia TV accepts remote-control presses over the network as IRCC
//! codes.  That is enough for Power or Volume Up, but text is harder: search
//! boxes only accept input through an on-screen keyboard that you walk with
//! the arrow keys.
//!
//! This crate drives that walk:
//!
//! 1. `bravia_core` transliterates the text and plans the arrow-key walk.
//! 2. `TypeTextUseCase` replays the walk on a `RemoteSink`, pausing after
//!    every press so the TV can keep up, and stops early if cancelled.
//! 3. `CommandResolver` maps app names such as "YouTube" to the codes this
//!    particular TV uses, fetching its command directory once.
//! 4. `RemoteManager` puts all of it behind one type for a front-end.

/// Application layer: use cases.
pub mod application;

/// Infrastructure layer: sinks, directory sources, and configuration.
pub mod infrastructure;

pub use application::remote_manager::{AppShortcut, RemoteError, RemoteManager};
pub use application::resolve_command::{CommandResolver, DirectoryFetcher, FetchError};
pub use application::type_text::{
    CharOutcome, Pacing, RemoteSink, SinkError, TypeTextUseCase, TypingHandle, TypingReport,
};
