#![deny(missing_docs)]

//! Doge SDK - signed-message verification.
//!
//! Re-exports the component crates and adds [`verify_message`], which
//! dispatches to either the local ECDSA check or the delegated passkey
//! service.
//!
//! ```
//! use doge_sdk::Scheme;
//!
//! # async fn run() -> Result<(), doge_sdk::SdkError> {
//! let valid = doge_sdk::verify_message(
//!     Scheme::Dogecoin,
//!     "DNFsAw2VtpskpEZ9NY2i4FfuzobeBaxqMm",
//!     "hello dogecoin",
//!     "ICRlPqxDRIgALMBrv7fxD+GJkeNfn+QwLb6m0jU9wKscR33/TNlQa90Ou97gE6piCQ4B8vHgBCAI/Dkduc3MLlc=",
//! )
//! .await?;
//! assert!(valid);
//! # Ok(())
//! # }
//! ```

pub use doge_message as message;
pub use doge_passkey as passkey;
pub use doge_primitives as primitives;

use doge_message::{MessageError, MessageVerifier};
use doge_passkey::{PasskeyClient, PasskeyConfig, PasskeyError};

/// How a signature should be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Compact ECDSA signature over the Dogecoin message magic hash,
    /// checked locally.
    Dogecoin,
    /// Passkey signature, checked by the remote WebAuthn service.
    Passkey,
}

/// Errors from either verification scheme.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Local signed-message verification failed.
    #[error(transparent)]
    Message(#[from] MessageError),
    /// The passkey service could not be queried.
    #[error(transparent)]
    Passkey(#[from] PasskeyError),
}

/// Verifies messages under either scheme with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    message: MessageVerifier,
    passkey: PasskeyClient,
}

impl Verifier {
    /// A verifier with the given local verifier and passkey settings.
    pub fn new(message: MessageVerifier, passkey: PasskeyConfig) -> Self {
        Verifier {
            message,
            passkey: PasskeyClient::new(passkey),
        }
    }

    /// Verify `signature` over `message` for `address` under `scheme`.
    ///
    /// For [`Scheme::Dogecoin`] the signature is base64 or hex text of the
    /// 65-byte compact form. For [`Scheme::Passkey`] it is the hex string
    /// the service expects, with or without `0x`.
    pub async fn verify(
        &self,
        scheme: Scheme,
        address: &str,
        message: &str,
        signature: &str,
    ) -> Result<bool, SdkError> {
        match scheme {
            Scheme::Dogecoin => Ok(self.message.verify_encoded(address, message, signature)?),
            Scheme::Passkey => Ok(self
                .passkey
                .verify_passkey_message(address, message, signature)
                .await?),
        }
    }
}

/// Verify a signed message with the default configuration.
pub async fn verify_message(
    scheme: Scheme,
    address: &str,
    message: &str,
    signature: &str,
) -> Result<bool, SdkError> {
    Verifier::default()
        .verify(scheme, address, message, signature)
        .await
}
