use core::fmt;
use core::str::FromStr;

use bech32::{FromBase32, ToBase32};

use crate::Address;

/// Human readable part of every address.
pub const HRP: &str = "vote";

pub fn vec_to_bech32m(vec: &[u8], hrp: &str) -> Result<String, bech32::Error> {
    let data = vec.to_base32();
    let bech32_addr = bech32::encode(hrp, data, bech32::Variant::Bech32m)?;
    Ok(bech32_addr)
}

pub fn bech32m_to_decoded_vec(bech32_addr: &str) -> Result<(String, Vec<u8>), bech32::Error> {
    let (hrp, data, _) = bech32::decode(bech32_addr)?;
    let vec = Vec::<u8>::from_base32(&data)?;
    Ok((hrp, vec))
}

/// The validated text form of an [`Address`].
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Clone, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct AddressBech32 {
    value: String,
    bytes: [u8; 32],
}

impl AddressBech32 {
    pub(crate) fn to_byte_array(&self) -> [u8; 32] {
        self.bytes
    }
}

impl fmt::Display for AddressBech32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<AddressBech32> for String {
    fn from(addr: AddressBech32) -> Self {
        addr.value
    }
}

impl TryFrom<&[u8]> for AddressBech32 {
    type Error = bech32::Error;

    fn try_from(addr: &[u8]) -> Result<Self, bech32::Error> {
        let bytes: [u8; 32] = addr.try_into().map_err(|_| bech32::Error::InvalidLength)?;
        let value = vec_to_bech32m(&bytes, HRP)?;
        Ok(AddressBech32 { value, bytes })
    }
}

impl From<&Address> for AddressBech32 {
    fn from(addr: &Address) -> Self {
        // 32 bytes with a fixed lowercase HRP always encode.
        let value = vec_to_bech32m(&addr.bytes, HRP).expect("address is always bech32m encodable");
        AddressBech32 {
            value,
            bytes: addr.bytes,
        }
    }
}

impl From<Address> for AddressBech32 {
    fn from(addr: Address) -> Self {
        AddressBech32::from(&addr)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Bech32ParseError {
    #[error("Bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
    #[error("Wrong HRP: {0}")]
    WrongHRP(String),
    #[error("Invalid address length {0}, should be 32")]
    WrongLength(usize),
}

impl TryFrom<String> for AddressBech32 {
    type Error = Bech32ParseError;

    fn try_from(addr: String) -> Result<Self, Bech32ParseError> {
        AddressBech32::from_str(&addr)
    }
}

impl FromStr for AddressBech32 {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Bech32ParseError> {
        let (hrp, data) = bech32m_to_decoded_vec(s)?;

        if HRP != hrp {
            return Err(Bech32ParseError::WrongHRP(hrp));
        }

        let bytes: [u8; 32] = data
            .as_slice()
            .try_into()
            .map_err(|_| Bech32ParseError::WrongLength(data.len()))?;

        Ok(AddressBech32 {
            value: s.to_string(),
            bytes,
        })
    }
}
