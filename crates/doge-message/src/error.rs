use doge_primitives::PrimitivesError;

/// Error types for message operations.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The address failed Base58Check decoding.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// The signature text was neither base64 nor hex.
    #[error("invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),
    /// Lower-level failure: varint range, signature shape, or key recovery.
    #[error("{0}")]
    Primitives(#[from] PrimitivesError),
}

/// Flat classification of [`MessageError`], independent of which layer
/// raised the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Signature is not exactly 65 bytes.
    InvalidSignatureLength,
    /// Signature header byte outside `27..=42`.
    InvalidHeaderFlag,
    /// Address failed Base58Check decoding.
    InvalidAddress,
    /// Message length exceeds the compact-integer range.
    IntegerOutOfRange,
    /// No public key could be recovered from the signature.
    RecoveryError,
    /// Signature text was neither base64 nor hex.
    InvalidSignatureEncoding,
    /// Anything else.
    Other,
}

impl MessageError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MessageError::InvalidAddress(_) => ErrorKind::InvalidAddress,
            MessageError::InvalidSignatureEncoding(_) => ErrorKind::InvalidSignatureEncoding,
            MessageError::Primitives(e) => match e {
                PrimitivesError::InvalidSignatureLength(_) => ErrorKind::InvalidSignatureLength,
                PrimitivesError::InvalidHeaderFlag(_) => ErrorKind::InvalidHeaderFlag,
                PrimitivesError::IntegerOutOfRange(_) => ErrorKind::IntegerOutOfRange,
                PrimitivesError::RecoveryError(_) => ErrorKind::RecoveryError,
                _ => ErrorKind::Other,
            },
        }
    }
}
