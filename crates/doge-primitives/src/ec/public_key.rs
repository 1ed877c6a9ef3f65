//! secp256k1 public key with a fixed serialization form.
//!
//! A key recovered from a compact signature remembers whether the signer
//! used the compressed (33-byte) or uncompressed (65-byte) SEC1 encoding,
//! since the address hash commits to exactly one of them.

use k256::ecdsa::VerifyingKey;
use std::fmt;

use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key together with its serialization form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
    /// Serialize as 33 bytes when set, 65 bytes otherwise.
    compressed: bool,
}

impl PublicKey {
    /// Wrap a k256 key with an explicit serialization form.
    pub fn new(inner: VerifyingKey, compressed: bool) -> Self {
        PublicKey { inner, compressed }
    }

    /// Parse SEC1 bytes; the form is taken from the encoding length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let inner = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey {
            inner,
            compressed: bytes.len() == COMPRESSED_LEN,
        })
    }

    /// Parse a hex-encoded SEC1 key.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        Self::from_bytes(&hex::decode(hex_str)?)
    }

    /// Whether [`serialize`](Self::serialize) emits the compressed form.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The underlying k256 verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }

    /// Serialize in the key's own form (33 or 65 bytes).
    pub fn serialize(&self) -> Vec<u8> {
        self.inner
            .to_encoded_point(self.compressed)
            .as_bytes()
            .to_vec()
    }

    /// Compressed SEC1 encoding regardless of the key's form.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Uncompressed SEC1 encoding regardless of the key's form.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Hash160 of [`serialize`](Self::serialize): the P2PKH address payload.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.serialize())
    }

    /// Lowercase hex of [`serialize`](Self::serialize).
    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
