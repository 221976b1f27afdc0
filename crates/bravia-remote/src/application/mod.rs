//! Application layer use cases for the remote.
//!
//! # What use cases does the remote have?
//!
//! - **`type_text`** – Transliterates text, plans the on-screen keyboard walk
//!   and replays it as paced key presses on an injected `RemoteSink`.  Runs as
//!   a cancellable background task and reports what happened to every
//!   character.
//!
//! - **`resolve_command`** – Resolves app and mode names ("YouTube",
//!   "APPS_NETFLIX", …) to IRCC codes through the TV's command directory,
//!   fetching that directory at most once.
//!
//! - **`remote_manager`** – The façade a front-end holds: fixed keys, named
//!   commands, app shortcuts and typing behind one type.

pub mod remote_manager;
pub mod resolve_command;
pub mod type_text;
