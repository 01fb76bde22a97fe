use std::collections::HashMap;
use std::fmt::Debug;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::codec;
use crate::event::Event;
use crate::internal_cache::{OrderedReadsAndWrites, StorageInternalCache};
use crate::storage::{StorageKey, StorageValue};
use crate::Storage;

/// Reads and writes accumulated on top of a [`Storage`] and not committed yet.
/// Obtained from a [`WorkingSet`] with either `checkpoint` or `revert`.
pub struct StateCheckpoint<S: Storage> {
    storage: S,
    cache: StorageInternalCache,
}

impl<S: Storage> StateCheckpoint<S> {
    /// Creates an empty checkpoint on top of the given storage.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            cache: Default::default(),
        }
    }

    /// Starts a new [`WorkingSet`] whose changes can be reverted back to this checkpoint.
    pub fn to_revertable(self) -> WorkingSet<S> {
        WorkingSet {
            checkpoint: self,
            pending: Default::default(),
            events: Default::default(),
        }
    }

    /// Extracts the accumulated reads and writes, leaving the checkpoint empty.
    pub fn freeze(&mut self) -> OrderedReadsAndWrites {
        std::mem::take(&mut self.cache).into()
    }

    /// Returns the storage this checkpoint was built on.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// The writes and events of the transaction being executed.
///
/// Writes stay pending until [`WorkingSet::checkpoint`] folds them into the
/// underlying [`StateCheckpoint`]; [`WorkingSet::revert`] drops them. Reads
/// that reach the storage are recorded in the checkpoint and survive a revert.
pub struct WorkingSet<S: Storage> {
    checkpoint: StateCheckpoint<S>,
    pending: HashMap<StorageKey, Option<StorageValue>>,
    events: Vec<Event>,
}

impl<S: Storage> Debug for WorkingSet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingSet")
            .field("pending_writes", &self.pending.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl<S: Storage> WorkingSet<S> {
    /// Creates a fresh working set on top of the given storage.
    pub fn new(storage: S) -> Self {
        StateCheckpoint::new(storage).to_revertable()
    }

    /// Keeps all the changes of this working set.
    pub fn checkpoint(self) -> StateCheckpoint<S> {
        let mut checkpoint = self.checkpoint;
        for (key, value) in self.pending {
            match value {
                Some(value) => checkpoint.cache.set(&key, value),
                None => checkpoint.cache.delete(&key),
            }
        }
        checkpoint
    }

    /// Discards all the changes made since the last checkpoint.
    pub fn revert(self) -> StateCheckpoint<S> {
        self.checkpoint
    }

    /// Records an event emitted during the current transaction.
    pub fn add_event(&mut self, key: &str, value: &str) {
        self.events.push(Event::new(key, value));
    }

    /// Removes and returns all the events recorded so far.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Returns the events recorded so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(crate) fn read<V: BorshDeserialize>(&mut self, key: &StorageKey) -> Option<V> {
        let value = match self.pending.get(key) {
            Some(pending) => pending.clone(),
            None => self
                .checkpoint
                .cache
                .get_or_fetch(key, &self.checkpoint.storage),
        }?;
        Some(codec::decode(value.value()))
    }

    pub(crate) fn write<V: BorshSerialize>(&mut self, key: StorageKey, value: &V) {
        self.pending
            .insert(key, Some(StorageValue::from(codec::encode(value))));
    }

    pub(crate) fn delete(&mut self, key: StorageKey) {
        self.pending.insert(key, None);
    }
}
