/// Unified error type for all primitives operations.
///
/// Covers compact-integer encoding, Base58 decoding, compact signature
/// parsing, and public-key recovery.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("value out of range: {0} exceeds the maximum safe integer")]
    IntegerOutOfRange(u64),

    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("invalid signature length: expected 65 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("invalid signature header flag: {0}")]
    InvalidHeaderFlag(u8),

    #[error("public key recovery failed: {0}")]
    RecoveryError(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
