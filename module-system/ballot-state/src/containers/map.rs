use std::marker::PhantomData;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::codec;
use crate::storage::StorageKey;
use crate::{Prefix, Storage, WorkingSet};

/// A container that maps keys to values. Each entry is stored under the
/// container prefix followed by the borsh encoding of its key.
#[derive(Debug, PartialEq, Clone)]
pub struct StateMap<K, V> {
    prefix: Prefix,
    _phantom: (PhantomData<K>, PhantomData<V>),
}

impl<K, V> StateMap<K, V>
where
    K: BorshSerialize,
    V: BorshSerialize + BorshDeserialize,
{
    /// Creates a [`StateMap`] whose entries live under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self {
            prefix,
            _phantom: (PhantomData, PhantomData),
        }
    }

    /// Returns the prefix used when this [`StateMap`] was created.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    fn storage_key(&self, key: &K) -> StorageKey {
        StorageKey::new(&self.prefix, &codec::encode(key))
    }

    /// Inserts a key-value pair into the map.
    pub fn set<S: Storage>(&self, key: &K, value: &V, working_set: &mut WorkingSet<S>) {
        working_set.write(self.storage_key(key), value);
    }

    /// Returns the value corresponding to the key or None if key is absent in the StateMap.
    pub fn get<S: Storage>(&self, key: &K, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.read(&self.storage_key(key))
    }

    /// Removes a key from the StateMap, returning the corresponding value (or None if the key is absent).
    pub fn remove<S: Storage>(&self, key: &K, working_set: &mut WorkingSet<S>) -> Option<V> {
        let storage_key = self.storage_key(key);
        let value = working_set.read(&storage_key)?;
        working_set.delete(storage_key);
        Some(value)
    }
}
