use std::sync::Arc;

use crate::internal_cache::OrderedReadsAndWrites;
use crate::Prefix;

/// The `Key` type for the [`Storage`]: a container prefix followed by the
/// encoded container key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StorageKey {
    key: Arc<Vec<u8>>,
}

impl StorageKey {
    /// Joins a prefix and an already encoded key.
    pub fn new(prefix: &Prefix, encoded_key: &[u8]) -> Self {
        let mut full_key = Vec::with_capacity(prefix.len() + encoded_key.len());
        full_key.extend_from_slice(prefix.as_bytes());
        full_key.extend_from_slice(encoded_key);
        Self::from(full_key)
    }

    /// The key of a value living directly under a prefix.
    pub fn singleton(prefix: &Prefix) -> Self {
        Self::from(prefix.as_bytes().to_vec())
    }
}

impl AsRef<Vec<u8>> for StorageKey {
    fn as_ref(&self) -> &Vec<u8> {
        &self.key
    }
}

impl From<Vec<u8>> for StorageKey {
    fn from(key: Vec<u8>) -> Self {
        Self { key: Arc::new(key) }
    }
}

/// A serialized value suitable for storing. Internally uses an [`Arc<Vec<u8>>`] for cheap cloning.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StorageValue {
    value: Arc<Vec<u8>>,
}

impl From<Vec<u8>> for StorageValue {
    fn from(value: Vec<u8>) -> Self {
        Self {
            value: Arc::new(value),
        }
    }
}

impl StorageValue {
    /// Get the bytes of this value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// An interface for storing and retrieving values in the storage.
///
/// Implementations are cheap to clone and every clone shares the same
/// underlying state.
pub trait Storage: Clone {
    /// The runtime config for this storage instance.
    type RuntimeConfig;

    /// Creates a storage instance out of its runtime config.
    fn with_config(config: Self::RuntimeConfig) -> Result<Self, anyhow::Error>;

    /// Returns the value corresponding to the key or None if key is absent.
    fn get(&self, key: &StorageKey) -> Option<StorageValue>;

    /// Returns the latest state root hash from the storage.
    fn get_state_root(&self) -> [u8; 32];

    /// Applies all the writes of a frozen checkpoint in one step and returns
    /// the new state root. Either every write becomes visible or none does.
    fn commit(&self, state_accesses: &OrderedReadsAndWrites) -> Result<[u8; 32], anyhow::Error>;

    /// Indicates if storage is empty or not.
    /// Useful during initialization.
    fn is_empty(&self) -> bool;
}

#[cfg(test)]
impl From<&'static str> for StorageKey {
    fn from(key: &'static str) -> Self {
        Self::from(key.as_bytes().to_vec())
    }
}

#[cfg(test)]
impl From<&'static str> for StorageValue {
    fn from(value: &'static str) -> Self {
        Self::from(value.as_bytes().to_vec())
    }
}
