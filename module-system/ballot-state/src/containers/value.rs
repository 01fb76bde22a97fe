use std::marker::PhantomData;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::storage::StorageKey;
use crate::{Prefix, Storage, WorkingSet};

/// A single value stored directly under its prefix.
#[derive(Debug, PartialEq, Clone)]
pub struct StateValue<V> {
    prefix: Prefix,
    _phantom: PhantomData<V>,
}

impl<V: BorshSerialize + BorshDeserialize> StateValue<V> {
    /// Creates a [`StateValue`] stored under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self {
            prefix,
            _phantom: PhantomData,
        }
    }

    /// Returns the prefix used when this [`StateValue`] was created.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Overwrites the value.
    pub fn set<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) {
        working_set.write(StorageKey::singleton(&self.prefix), value);
    }

    /// Returns the value, or `None` if it was never set.
    pub fn get<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.read(&StorageKey::singleton(&self.prefix))
    }
}
