//! Domain entities for the Bravia remote.
//!
//! This module contains pure data and rules with no infrastructure dependencies.
//!
//! # What lives in "domain"? (for beginners)
//!
//! The domain layer holds the facts that make this system what it is:
//!
//! - What the TV's on-screen keyboards look like (which character sits in
//!   which grid cell, and which cells are blank).
//! - How a composed Japanese character such as `が` is produced on a keyboard
//!   that only has `か` and a separate `゛` key.
//! - What a command directory is: the TV's own list of named remote commands.
//!
//! None of it talks to the network.  Outer layers (the typing use case, the
//! CLI) depend on the domain, but the domain never depends on them.

/// The TV's named command listing (`getRemoteControllerInfo`).
pub mod directory;

/// On-screen keyboard grids and their character index.
pub mod keyboard;

/// Script detection and kana decomposition.
pub mod transliterate;
