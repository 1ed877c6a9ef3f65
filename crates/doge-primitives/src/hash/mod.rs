//! Digest primitives for message and address hashing.
//!
//! SHA-256, double SHA-256 (`hash256`), RIPEMD-160 and `hash160`
//! (RIPEMD-160 over SHA-256). All functions are pure and infallible.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute double SHA-256: `SHA-256(SHA-256(data))`.
///
/// Used for message magic hashes and Base58Check checksums.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute the RIPEMD-160 digest of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Compute Hash160: `RIPEMD-160(SHA-256(data))`.
///
/// This is the 20-byte public key hash embedded in P2PKH addresses.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}
