//! # bravia-core
//!
//! Shared library for the Bravia remote containing the on-screen keyboard
//! grids, text transliteration, the cursor navigation planner, the IRCC key
//! table, and typed JSON-RPC payloads.
//!
//! It has zero dependencies on network sockets, async runtimes, or UI code.
//! Everything here is a pure function of its inputs, which is what makes the
//! navigation planner exhaustively testable.
//!
//! # Architecture overview (for beginners)
//!
//! A Bravia TV's search screens (YouTube, the built-in browser, ...) show a
//! *virtual keyboard*: a grid of characters you walk with the remote's arrow
//! keys, pressing Confirm on each character.  Typing "HI" therefore means
//! "Down, Confirm, Right, Confirm" rather than sending the letters directly.
//!
//! This crate (`bravia-core`) is the foundation for automating that.  It defines:
//!
//! - **`domain`** – The keyboard grids (`KeyboardLayout`), Japanese kana
//!   decomposition (`transliterate`), and the command name directory
//!   (`CommandDirectory`).
//!
//! - **`navigation`** – The `NavigationPlanner`: a greedy walk from the current
//!   cursor cell to the next character's cell that routes around blank cells.
//!
//! - **`keymap`** – The fixed IRCC key codes understood by the TV.
//!
//! - **`protocol`** – Typed JSON-RPC request/response shapes and the decoder
//!   for the TV's remote-controller-info listing.

pub mod domain;
pub mod keymap;
pub mod navigation;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `bravia_core::KeyboardLayout` instead of `bravia_core::domain::keyboard::KeyboardLayout`.
pub use domain::directory::{CommandDirectory, DirectoryEntry};
pub use domain::keyboard::{GridPos, KeyboardLayout, LayoutError, LayoutKind};
pub use domain::transliterate::{transliterate, Transliteration};
pub use keymap::ircc::RemoteKey;
pub use navigation::planner::{
    KeystrokePlan, NavCommand, NavigationError, NavigationPlanner, PlanStep, TextPlan,
};
pub use protocol::jsonrpc::{
    decode_remote_controller_info, JsonRpcRequest, JsonRpcResponse, ProtocolError, Service,
};
