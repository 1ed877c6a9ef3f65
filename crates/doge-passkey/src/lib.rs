#![deny(missing_docs)]

//! # doge-passkey
//!
//! Async client for the delegated passkey (WebAuthn) verification service.
//! The service holds the passkey public keys; this crate only asks it
//! whether a signature is valid for an address or any of its backups.
//!
//! # Example
//!
//! ```no_run
//! use doge_passkey::{PasskeyClient, PasskeyConfig};
//!
//! # async fn run() -> Result<(), doge_passkey::PasskeyError> {
//! let client = PasskeyClient::new(PasskeyConfig::default());
//! let valid = client
//!     .verify_passkey_message("ckb1qyq...", "hello", "0x3045...")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::PasskeyClient;
pub use error::PasskeyError;
pub use types::{ApiResult, PasskeyConfig};
