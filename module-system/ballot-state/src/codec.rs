//! Borsh encoding of the keys and values kept in state containers.

use borsh::{BorshDeserialize, BorshSerialize};

/// Encodes a container key or value.
///
/// Equal items always encode to the same bytes, which is what makes the
/// encoding usable as a storage key.
pub(crate) fn encode<T: BorshSerialize>(item: &T) -> Vec<u8> {
    item.try_to_vec()
        .expect("Serializing state items into a vector cannot fail")
}

/// Decodes a value previously written with [`encode`].
///
/// # Panics
/// Panics if the bytes are not a valid encoding of `T`. Values are only ever
/// written by the containers, so this means the storage is corrupted.
pub(crate) fn decode<T: BorshDeserialize>(bytes: &[u8]) -> T {
    T::try_from_slice(bytes).unwrap_or_else(|err| {
        panic!(
            "Failed to decode state value 0x{}: {err}",
            hex::encode(bytes)
        )
    })
}
