//! `DirectoryFetcher` implementations.

pub mod file;

pub use file::JsonFileDirectory;
