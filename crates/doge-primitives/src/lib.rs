//! Dogecoin SDK - cryptographic primitives for signed-message verification.
//!
//! This crate provides the building blocks used by `doge-message`:
//! - Hash functions (SHA-256, double SHA-256, RIPEMD-160, Hash160)
//! - Compact-size variable-length integer encoding
//! - Base58 and Base58Check encoding/decoding
//! - Compact recoverable signatures and secp256k1 public-key recovery

pub mod base58;
pub mod ec;
pub mod hash;
pub mod util;

mod error;
pub use error::PrimitivesError;
