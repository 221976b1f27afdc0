//! Remote-control key codes.

pub mod ircc;

pub use ircc::RemoteKey;
