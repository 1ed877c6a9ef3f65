//! Base58Check address decoding.
//!
//! An address is a version byte followed by a payload (for P2PKH, the
//! 20-byte Hash160 of the signer's public key), Base58Check-encoded.

use std::fmt;
use std::str::FromStr;

use doge_primitives::base58;

use crate::MessageError;

/// Dogecoin mainnet P2PKH version byte (addresses start with 'D').
pub const DOGECOIN_P2PKH: u8 = 0x1e;
/// Bitcoin mainnet P2PKH version byte (addresses start with '1').
pub const BITCOIN_P2PKH: u8 = 0x00;

/// A decoded Base58Check address.
///
/// The payload length is not enforced: a payload that is not 20 bytes
/// simply never matches a public key hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    version: u8,
    payload: Vec<u8>,
}

impl Address {
    /// Decode a Base58Check address string.
    ///
    /// # Errors
    /// `InvalidAddress` for characters outside the Base58 alphabet, a bad
    /// checksum, or input too short to hold a version byte.
    pub fn from_string(addr: &str) -> Result<Self, MessageError> {
        let mut decoded = base58::check_decode(addr)
            .map_err(|e| MessageError::InvalidAddress(format!("{addr}: {e}")))?;

        if decoded.is_empty() {
            return Err(MessageError::InvalidAddress(format!(
                "{addr}: missing version byte"
            )));
        }

        let version = decoded.remove(0);
        Ok(Address {
            version,
            payload: decoded,
        })
    }

    /// Build an address from a version byte and a 20-byte public key hash.
    pub fn from_public_key_hash(version: u8, hash: &[u8; 20]) -> Self {
        Address {
            version,
            payload: hash.to_vec(),
        }
    }

    /// The version byte.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The payload following the version byte.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether the payload equals `hash` byte for byte.
    pub fn matches_hash(&self, hash: &[u8; 20]) -> bool {
        self.payload.as_slice() == hash.as_slice()
    }
}

impl FromStr for Address {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut data = Vec::with_capacity(1 + self.payload.len());
        data.push(self.version);
        data.extend_from_slice(&self.payload);
        write!(f, "{}", base58::check_encode(&data))
    }
}
