//! Storage and state management interfaces for ballot modules.

#![deny(missing_docs)]

mod codec;
mod containers;
mod event;
mod internal_cache;
mod ledger_storage;
mod scratchpad;

/// Trait and type definitions related to the [`Storage`] trait.
pub mod storage;

/// Runtime configuration of the storage backends.
pub mod config;


use std::fmt::Display;

pub use containers::*;
pub use event::{Event, EventKey, EventValue};
pub use internal_cache::{OrderedReadsAndWrites, StorageInternalCache};
pub use ledger_storage::LedgerStorage;
pub use scratchpad::*;
pub use storage::Storage;

/// A prefix prepended to each key before insertion and retrieval from the storage.
///
/// All the containers of a module share one working set, so every container
/// gets its own prefix to keep equal keys apart.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Prefix {
    prefix: Vec<u8>,
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match std::str::from_utf8(&self.prefix) {
            Ok(s) => write!(f, "{:?}", s),
            Err(_) => write!(f, "0x{}", hex::encode(&self.prefix)),
        }
    }
}

impl Prefix {
    /// Creates a new prefix from a byte vector.
    pub fn new(prefix: Vec<u8>) -> Self {
        Self { prefix }
    }

    /// The raw bytes of the prefix.
    pub fn as_bytes(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the length in bytes of the prefix.
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    /// Returns `true` if the prefix is empty, `false` otherwise.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Returns a new prefix made of this one followed by `bytes`.
    pub fn extended(&self, bytes: &[u8]) -> Self {
        let mut prefix = self.prefix.clone();
        prefix.extend_from_slice(bytes);
        Self { prefix }
    }
}
