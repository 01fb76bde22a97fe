use borsh::{BorshDeserialize, BorshSerialize};

use crate::{Prefix, StateMap, StateValue, Storage, WorkingSet};

/// An append-only vector whose length and elements live in the state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVec<V> {
    prefix: Prefix,
    len: StateValue<u64>,
    elems: StateMap<u64, V>,
}

impl<V: BorshSerialize + BorshDeserialize> StateVec<V> {
    /// Creates a [`StateVec`] stored under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        // Distinct sub-prefixes keep the length out of the element key space.
        let len = StateValue::new(prefix.extended(b"l"));
        let elems = StateMap::new(prefix.extended(b"e"));
        Self { prefix, len, elems }
    }

    /// Returns the prefix used when this [`StateVec`] was created.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Returns the number of pushed elements.
    pub fn len<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> u64 {
        self.len.get(working_set).unwrap_or_default()
    }

    /// Returns the element at `index`, or `None` past the end.
    pub fn get<S: Storage>(&self, index: u64, working_set: &mut WorkingSet<S>) -> Option<V> {
        self.elems.get(&index, working_set)
    }

    /// Appends a value.
    pub fn push<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) {
        let len = self.len(working_set);
        self.elems.set(&len, value, working_set);
        self.len.set(&(len + 1), working_set);
    }

    /// Iterates over the elements in insertion order.
    pub fn iter<'a, S: Storage>(
        &'a self,
        working_set: &'a mut WorkingSet<S>,
    ) -> impl Iterator<Item = V> + 'a {
        let len = self.len(working_set);
        (0..len).map_while(move |index| self.get(index, working_set))
    }
}
