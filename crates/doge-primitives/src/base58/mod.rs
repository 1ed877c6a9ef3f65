//! Base58 encoding and decoding with optional checksum support.
//!
//! Raw Base58 over the Bitcoin alphabet, and Base58Check (payload followed
//! by the first four bytes of its double SHA-256) as used by Dogecoin and
//! Bitcoin addresses.

use crate::hash::hash256;
use crate::PrimitivesError;

/// Length of the Base58Check checksum suffix.
pub const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice to a Base58 string.
///
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// Leading '1' characters decode to leading zero bytes.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode `data` with a 4-byte double-SHA-256 checksum appended (Base58Check).
pub fn check_encode(data: &[u8]) -> String {
    let checksum = hash256(data);
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying and stripping the checksum.
///
/// # Returns
/// The payload without its checksum, `InvalidBase58` for bad characters or
/// input too short to carry a checksum, or `ChecksumMismatch`.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let mut decoded = decode(s)?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let split = decoded.len() - CHECKSUM_LEN;
    let expected = hash256(&decoded[..split]);
    if decoded[split..] != expected[..CHECKSUM_LEN] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    decoded.truncate(split);
    Ok(decoded)
}
