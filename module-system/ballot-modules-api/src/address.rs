use core::fmt::{self, Debug, Display};
use core::hash::Hash;
use core::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::bech32::{AddressBech32, Bech32ParseError};

/// What modules need from the address type of a [`crate::Spec`]: raw 32 byte
/// conversions, a bech32m text form for logs and events, and both serde and
/// borsh encodings.
pub trait AddressTrait:
    Debug
    + Display
    + Clone
    + Eq
    + Hash
    + AsRef<[u8]>
    + From<[u8; 32]>
    + for<'a> TryFrom<&'a [u8], Error = anyhow::Error>
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
{
}

/// A 32 byte account identifier, written as `vote1...` in bech32m.
#[derive(
    PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, borsh::BorshSerialize, borsh::BorshDeserialize,
)]
pub struct Address {
    pub(crate) bytes: [u8; 32],
}

impl AddressTrait for Address {}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }
}

impl<'a> TryFrom<&'a [u8]> for Address {
    type Error = anyhow::Error;

    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| anyhow::anyhow!("Address must be 32 bytes long, got {}", bytes.len()))?;
        Ok(Self { bytes })
    }
}

impl From<AddressBech32> for Address {
    fn from(addr: AddressBech32) -> Self {
        Self {
            bytes: addr.to_byte_array(),
        }
    }
}

impl FromStr for Address {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddressBech32::from_str(s).map(Address::from)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&AddressBech32::from(self), f)
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", AddressBech32::from(self).to_string())
    }
}

// Text formats carry the bech32m form, binary formats the raw bytes.
impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serde::Serialize::serialize(&AddressBech32::from(self), serializer)
        } else {
            serde::Serialize::serialize(&self.bytes, serializer)
        }
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let address: AddressBech32 = serde::Deserialize::deserialize(deserializer)?;
            Ok(Address::from(address))
        } else {
            let bytes = <[u8; 32] as serde::Deserialize>::deserialize(deserializer)?;
            Ok(Address { bytes })
        }
    }
}
