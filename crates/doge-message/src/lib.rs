#![deny(missing_docs)]

//! Dogecoin signed-message verification.
//!
//! Given a message, a P2PKH address and a 65-byte compact signature, checks
//! that the address's owner signed the message. Bitcoin and custom prefixes
//! are supported through [`MessagePrefix`].

mod error;
pub mod address;
pub mod magic;
pub mod signed;

pub use address::Address;
pub use error::{ErrorKind, MessageError};
pub use magic::{magic_hash, MessagePrefix, BITCOIN_PREFIX, DOGECOIN_PREFIX};
pub use signed::{decode_signature_text, verify, verify_dogecoin_message, MessageVerifier};
