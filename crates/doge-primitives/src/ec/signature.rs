//! Compact (recoverable) ECDSA signatures as used by signed messages.
//!
//! Layout: `<header> <32-byte R> <32-byte S>`. The header byte is
//! `27 + flag`, where the low two bits of `flag` carry the recovery id and
//! bits 2-3 mark the signer's key as compressed.

use k256::ecdsa::{self, RecoveryId, VerifyingKey};

use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Size of a compact signature: header byte plus R and S.
pub const COMPACT_SIGNATURE_LEN: usize = 65;

/// Offset subtracted from the header byte to obtain the flag.
const HEADER_BASE: u8 = 27;

/// Largest flag value accepted in the header (header byte 42).
const MAX_FLAG: u8 = 15;

/// A parsed 65-byte compact signature.
///
/// Parsing only validates the length and the header range; whether R and S
/// describe a point on the curve is discovered during recovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactSignature {
    /// Original header byte, kept so the signature re-serializes unchanged.
    header: u8,
    /// Recovery id in `0..=3`.
    recovery: u8,
    /// Whether the signer's key serializes in compressed form.
    compressed: bool,
    /// Raw big-endian R || S.
    signature: [u8; 64],
}

impl CompactSignature {
    /// Parse a 65-byte compact signature.
    ///
    /// # Errors
    /// `InvalidSignatureLength` unless `bytes` is exactly 65 bytes long,
    /// `InvalidHeaderFlag` if the header byte is outside `27..=42`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != COMPACT_SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignatureLength(bytes.len()));
        }

        let header = bytes[0];
        let flag = header
            .checked_sub(HEADER_BASE)
            .filter(|flag| *flag <= MAX_FLAG)
            .ok_or(PrimitivesError::InvalidHeaderFlag(header))?;

        let mut signature = [0u8; 64];
        signature.copy_from_slice(&bytes[1..]);

        Ok(CompactSignature {
            header,
            recovery: flag & 3,
            compressed: flag & 12 != 0,
            signature,
        })
    }

    /// The recovery id (0-3) selecting which candidate point R was.
    pub fn recovery(&self) -> u8 {
        self.recovery
    }

    /// Whether the signer used a compressed public key.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The header byte as it appeared on the wire.
    pub fn header(&self) -> u8 {
        self.header
    }

    /// The raw 64-byte R || S pair.
    pub fn signature(&self) -> &[u8; 64] {
        &self.signature
    }

    /// Serialize back to the 65-byte wire form.
    pub fn to_bytes(&self) -> [u8; COMPACT_SIGNATURE_LEN] {
        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out[0] = self.header;
        out[1..].copy_from_slice(&self.signature);
        out
    }

    /// Recover the signer's public key from a 32-byte message digest.
    ///
    /// The returned key serializes compressed or uncompressed according to
    /// the header, which is what address hashing must use. Both low-S and
    /// high-S forms of S are accepted.
    ///
    /// # Errors
    /// `RecoveryError` if R or S is zero or not below the curve order, if R
    /// does not lift to a curve point for this recovery id, or if the
    /// recovered key is the point at infinity.
    pub fn recover_public_key(&self, hash: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
        let signature = ecdsa::Signature::from_slice(&self.signature)
            .map_err(|e| PrimitivesError::RecoveryError(e.to_string()))?;

        let mut recovery_id = RecoveryId::from_byte(self.recovery).ok_or_else(|| {
            PrimitivesError::RecoveryError(format!("invalid recovery id {}", self.recovery))
        })?;

        // k256 only verifies low-S. (r, -s) with R negated recovers the same key.
        let signature = match signature.normalize_s() {
            Some(low) => {
                recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
                low
            }
            None => signature,
        };

        let key = VerifyingKey::recover_from_prehash(hash, &signature, recovery_id)
            .map_err(|e| PrimitivesError::RecoveryError(e.to_string()))?;

        Ok(PublicKey::new(key, self.compressed))
    }
}

impl TryFrom<&[u8]> for CompactSignature {
    type Error = PrimitivesError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        CompactSignature::from_bytes(bytes)
    }
}
