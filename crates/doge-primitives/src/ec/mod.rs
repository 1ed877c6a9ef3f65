//! Elliptic curve operations on secp256k1.
//!
//! Curve parameters live in `k256` as compile-time constants, so there is
//! no runtime context to construct: every operation here is a pure
//! function and may run concurrently from any thread.

pub mod public_key;
pub mod signature;

pub use public_key::PublicKey;
pub use signature::{CompactSignature, COMPACT_SIGNATURE_LEN};
