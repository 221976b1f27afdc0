//! Infrastructure layer for the remote.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `bravia_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`sink`** – `RemoteSink` implementations: a `tracing` logger for dry
//!   runs and a recording sink for tests.
//!
//! - **`directory`** – `DirectoryFetcher` implementations.  `JsonFileDirectory`
//!   reads a saved `getRemoteControllerInfo` response.
//!
//! - **`storage`** – The TOML configuration file.

pub mod directory;
pub mod sink;
pub mod storage;
