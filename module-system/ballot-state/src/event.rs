use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// An event is a key/value pair recorded by a module while it processes a
/// transaction. Events of a reverted transaction are discarded together with
/// its writes.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Event {
    key: EventKey,
    value: EventValue,
}

impl Event {
    /// Creates a new event out of its textual key and value.
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: EventKey(key.as_bytes().to_vec()),
            value: EventValue(value.as_bytes().to_vec()),
        }
    }

    /// The key of the event, for example `"Election: vote"`.
    pub fn key(&self) -> &EventKey {
        &self.key
    }

    /// The value of the event.
    pub fn value(&self) -> &EventValue {
        &self.value
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            String::from_utf8_lossy(self.key.inner()),
            String::from_utf8_lossy(self.value.inner())
        )
    }
}

/// Raw bytes of an event key.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct EventKey(Vec<u8>);

impl EventKey {
    /// Returns the raw bytes.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }
}

/// Raw bytes of an event value.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct EventValue(Vec<u8>);

impl EventValue {
    /// Returns the raw bytes.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }
}
