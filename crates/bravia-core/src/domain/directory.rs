//! The TV's command directory: named remote commands and their IRCC codes.
//!
//! Besides the fixed keys in [`crate::keymap`], every Bravia model publishes a
//! list of the commands it understands through `getRemoteControllerInfo`.
//! Names vary between models and firmware versions ("YouTube" vs
//! "APPS_YOUTUBE"), so callers look commands up with an ordered list of
//! candidate aliases via [`CommandDirectory::first_match`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One raw item of a directory listing as reported by the TV.
///
/// Either field may be missing in a malformed listing; such entries are
/// dropped when the directory is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: Option<String>,
    pub code: Option<String>,
}

impl DirectoryEntry {
    /// Creates a complete entry.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            code: Some(code.into()),
        }
    }
}

/// Immutable name → IRCC code mapping.
///
/// Names are matched exactly (case-sensitive), as the TV reports them.
/// Iteration is in name order so listings are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandDirectory {
    codes: BTreeMap<String, String>,
}

impl CommandDirectory {
    /// Builds a directory from raw entries, dropping any entry that lacks a
    /// name or a code.  When a name repeats, the later entry wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DirectoryEntry>,
    {
        let codes = entries
            .into_iter()
            .filter_map(|e| Some((e.name?, e.code?)))
            .collect();
        Self { codes }
    }

    /// Returns the code registered under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.codes.get(name).map(String::as_str)
    }

    /// Returns the code of the first candidate present in the directory.
    pub fn first_match<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&str> {
        candidates.iter().find_map(|c| self.get(c.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates over `(name, code)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
