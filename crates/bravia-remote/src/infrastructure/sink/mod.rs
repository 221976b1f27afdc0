//! `RemoteSink` implementations.
//!
//! - **`logging`** – `TracingSink`, which logs instead of transmitting.
//! - **`mock`** – `RecordingSink`, which records calls for tests.

pub mod logging;
pub mod mock;

pub use logging::TracingSink;
pub use mock::RecordingSink;
