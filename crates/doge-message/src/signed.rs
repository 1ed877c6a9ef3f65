//! Signed-message verification against a P2PKH address.
//!
//! Pipeline: decode the 65-byte compact signature, hash the message under
//! the protocol prefix, recover the signer's public key, Hash160 it in the
//! form the header declares, and compare with the address payload.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use tracing::{debug, trace};

use doge_primitives::ec::CompactSignature;

use crate::address::Address;
use crate::magic::{magic_hash, MessagePrefix};
use crate::MessageError;

/// Standard-alphabet base64 that accepts signatures with or without `=` padding.
const SIGNATURE_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Verifies signed messages for one protocol prefix.
///
/// Holds no mutable state; one instance can be shared across threads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageVerifier {
    prefix: MessagePrefix,
}

impl MessageVerifier {
    /// A verifier for an arbitrary prefix.
    pub fn new(prefix: MessagePrefix) -> Self {
        MessageVerifier { prefix }
    }

    /// A verifier for Dogecoin signed messages.
    pub fn dogecoin() -> Self {
        Self::new(MessagePrefix::Dogecoin)
    }

    /// A verifier for Bitcoin signed messages.
    pub fn bitcoin() -> Self {
        Self::new(MessagePrefix::Bitcoin)
    }

    /// The prefix this verifier hashes messages under.
    pub fn prefix(&self) -> &MessagePrefix {
        &self.prefix
    }

    /// Verify a raw 65-byte compact signature.
    ///
    /// # Returns
    /// `Ok(true)` if the recovered key hashes to the address payload,
    /// `Ok(false)` on a mismatch. Structurally invalid input is an error,
    /// never `Ok(true)`.
    pub fn verify(
        &self,
        address: &str,
        message: impl AsRef<[u8]>,
        signature: &[u8],
    ) -> Result<bool, MessageError> {
        let parsed = CompactSignature::from_bytes(signature)?;
        let hash = magic_hash(message, &self.prefix)?;
        trace!(hash = %hex::encode(hash), "computed message magic hash");

        let public_key = parsed.recover_public_key(&hash)?;
        let actual = public_key.hash160();

        let expected = Address::from_string(address)?;
        let matched = expected.matches_hash(&actual);
        if !matched {
            debug!(
                address,
                recovered = %hex::encode(actual),
                compressed = parsed.is_compressed(),
                "recovered key does not match address"
            );
        }
        Ok(matched)
    }

    /// Verify a signature given as base64 or hex text.
    ///
    /// See [`decode_signature_text`] for the accepted forms.
    pub fn verify_encoded(
        &self,
        address: &str,
        message: impl AsRef<[u8]>,
        signature: &str,
    ) -> Result<bool, MessageError> {
        let bytes = decode_signature_text(signature)?;
        self.verify(address, message, &bytes)
    }
}

/// Decode signature text into raw bytes.
///
/// 130 hex digits (optionally `0x`-prefixed) are read as hex; anything else
/// is read as standard base64, padded or not. A 65-byte signature is 87 or
/// 88 base64 characters, so the two forms cannot be confused.
pub fn decode_signature_text(signature: &str) -> Result<Vec<u8>, MessageError> {
    let trimmed = signature.trim();
    let hex_body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if hex_body.len() == 130 && hex_body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return hex::decode(hex_body)
            .map_err(|e| MessageError::InvalidSignatureEncoding(e.to_string()));
    }

    SIGNATURE_BASE64
        .decode(trimmed)
        .map_err(|e| MessageError::InvalidSignatureEncoding(e.to_string()))
}

/// Verify `message` against `address` under an explicit prefix.
///
/// `signature` is the raw 65-byte compact signature.
pub fn verify(
    message: impl AsRef<[u8]>,
    address: &str,
    signature: &[u8],
    prefix: MessagePrefix,
) -> Result<bool, MessageError> {
    MessageVerifier::new(prefix).verify(address, message, signature)
}

/// Verify a Dogecoin signed message with a base64 (or hex) signature.
///
/// # Example
///
/// ```
/// let ok = doge_message::verify_dogecoin_message(
///     "DNFsAw2VtpskpEZ9NY2i4FfuzobeBaxqMm",
///     "hello dogecoin",
///     "ICRlPqxDRIgALMBrv7fxD+GJkeNfn+QwLb6m0jU9wKscR33/TNlQa90Ou97gE6piCQ4B8vHgBCAI/Dkduc3MLlc=",
/// )
/// .unwrap();
/// assert!(ok);
/// ```
pub fn verify_dogecoin_message(
    address: &str,
    message: &str,
    signature: &str,
) -> Result<bool, MessageError> {
    MessageVerifier::dogecoin().verify_encoded(address, message, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{Address, BITCOIN_P2PKH, DOGECOIN_P2PKH};
    use crate::ErrorKind;
    use doge_primitives::hash::hash160;
    use k256::ecdsa::SigningKey;

    const MESSAGE: &str = "hello dogecoin";
    const ADDRESS_COMPRESSED: &str = "DNFsAw2VtpskpEZ9NY2i4FfuzobeBaxqMm";
    const ADDRESS_UNCOMPRESSED: &str = "D8A9jHBhtc3bFdZLU3U7kMeZoEAsNRsUeg";
    const OTHER_ADDRESS: &str = "DTtq2hyJ8XmcwamDoTZc9dkYWRN75eXxs7";
    const SIG_COMPRESSED: &str =
        "ICRlPqxDRIgALMBrv7fxD+GJkeNfn+QwLb6m0jU9wKscR33/TNlQa90Ou97gE6piCQ4B8vHgBCAI/Dkduc3MLlc=";
    const SIG_UNCOMPRESSED: &str =
        "HCRlPqxDRIgALMBrv7fxD+GJkeNfn+QwLb6m0jU9wKscR33/TNlQa90Ou97gE6piCQ4B8vHgBCAI/Dkduc3MLlc=";

    fn sig_bytes(b64: &str) -> Vec<u8> {
        base64::engine::general_purpose::STANDARD.decode(b64).unwrap()
    }

    #[test]
    fn test_known_vector_compressed() {
        assert!(verify_dogecoin_message(ADDRESS_COMPRESSED, MESSAGE, SIG_COMPRESSED).unwrap());
    }

    #[test]
    fn test_known_vector_uncompressed() {
        assert!(verify_dogecoin_message(ADDRESS_UNCOMPRESSED, MESSAGE, SIG_UNCOMPRESSED).unwrap());
    }

    #[test]
    fn test_compression_flag_selects_address() {
        // Same R/S, only the header differs: each form matches only its own address.
        assert!(!verify_dogecoin_message(ADDRESS_UNCOMPRESSED, MESSAGE, SIG_COMPRESSED).unwrap());
        assert!(!verify_dogecoin_message(ADDRESS_COMPRESSED, MESSAGE, SIG_UNCOMPRESSED).unwrap());
    }

    #[test]
    fn test_long_and_unicode_messages() {
        let long = "a".repeat(300);
        let sig = "H7tQ4tiaTtcGY9CAZZ/grUubw+BsF6InQzlmy1nO7gINCh53cpt/z5i7KBnfYySs4DYFtYlvUH2VewwwnAOLmDc=";
        assert!(verify_dogecoin_message(ADDRESS_COMPRESSED, &long, sig).unwrap());

        let sig = "HEmOJ1k8icgXqUGYSjBaKQczp/TrmWVfdzTwbkaZoK5hEJ3UMRht3YzwVV9lyZZUmOAQgtGm5CMHMNQIidckZV4=";
        assert!(verify_dogecoin_message(ADDRESS_UNCOMPRESSED, "wow such ünïcode 🐕", sig).unwrap());
    }

    #[test]
    fn test_wrong_message() {
        assert!(!verify_dogecoin_message(ADDRESS_COMPRESSED, "hello dogecoin!", SIG_COMPRESSED).unwrap());
    }

    #[test]
    fn test_other_address() {
        assert!(!verify_dogecoin_message(OTHER_ADDRESS, MESSAGE, SIG_COMPRESSED).unwrap());
    }

    #[test]
    fn test_bit_flips_never_verify() {
        let original = sig_bytes(SIG_COMPRESSED);
        let verifier = MessageVerifier::dogecoin();
        for bit in (8..65 * 8).step_by(5) {
            let mut tampered = original.clone();
            tampered[bit / 8] ^= 1 << (bit % 8);
            match verifier.verify(ADDRESS_COMPRESSED, MESSAGE, &tampered) {
                Ok(matched) => assert!(!matched, "bit {bit} still verified"),
                Err(e) => assert_eq!(e.kind(), ErrorKind::RecoveryError, "bit {bit}: {e}"),
            }
        }
    }

    #[test]
    fn test_hex_signature_text() {
        let hex_sig = hex::encode(sig_bytes(SIG_COMPRESSED));
        let verifier = MessageVerifier::dogecoin();
        assert!(verifier.verify_encoded(ADDRESS_COMPRESSED, MESSAGE, &hex_sig).unwrap());
        assert!(verifier
            .verify_encoded(ADDRESS_COMPRESSED, MESSAGE, &format!("0x{hex_sig}"))
            .unwrap());
    }

    #[test]
    fn test_unpadded_base64_signature() {
        let unpadded = SIG_COMPRESSED.trim_end_matches('=');
        assert_eq!(unpadded.len(), 87);
        assert!(verify_dogecoin_message(ADDRESS_COMPRESSED, MESSAGE, unpadded).unwrap());
    }

    #[test]
    fn test_high_s_signature_verifies() {
        // SIG_COMPRESSED with s replaced by n - s and the recovery id's
        // y parity flipped (header 32 -> 31).
        let high_s = "HyRlPqxDRIgALMBrv7fxD+GJkeNfn+QwLb6m0jU9wKscuIIAsyavlCLxRCEf7FWd9ays6fTPRIAyw5lA0wJqEuo=";
        let low = sig_bytes(SIG_COMPRESSED);
        let high = sig_bytes(high_s);
        assert_eq!(low[1..33], high[1..33]);
        assert_ne!(low[33..], high[33..]);

        assert!(verify_dogecoin_message(ADDRESS_COMPRESSED, MESSAGE, high_s).unwrap());
        assert!(!verify_dogecoin_message(ADDRESS_COMPRESSED, "hello dogecoin!", high_s).unwrap());
    }

    #[test]
    fn test_invalid_signature_text() {
        let err = verify_dogecoin_message(ADDRESS_COMPRESSED, MESSAGE, "not base64!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSignatureEncoding);
    }

    #[test]
    fn test_invalid_signature_length() {
        let engine = base64::engine::general_purpose::STANDARD;
        for len in [64usize, 66] {
            let sig = engine.encode(vec![32u8; len]);
            let err = verify_dogecoin_message(ADDRESS_COMPRESSED, MESSAGE, &sig).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidSignatureLength, "len {len}");
        }
    }

    #[test]
    fn test_invalid_header_flag() {
        let mut bytes = sig_bytes(SIG_COMPRESSED);
        for header in [26u8, 43] {
            bytes[0] = header;
            let err = MessageVerifier::dogecoin()
                .verify(ADDRESS_COMPRESSED, MESSAGE, &bytes)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidHeaderFlag);
        }
    }

    #[test]
    fn test_corrupted_address_checksum() {
        let corrupted = "DNFsAw2VtpskpEZ9NY2i4FfuzobeBaxqMn";
        let err = verify_dogecoin_message(corrupted, MESSAGE, SIG_COMPRESSED).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
    }

    #[test]
    fn test_short_payload_address_is_mismatch() {
        let matched =
            verify_dogecoin_message("3jdH2ejChVzGNk6vefuLHord26KKvjdBB", MESSAGE, SIG_COMPRESSED);
        assert!(!matched.unwrap());
    }

    #[test]
    fn test_bitcoin_prefix() {
        let sig = sig_bytes(
            "HyRlPqxDRIgALMBrv7fxD+GJkeNfn+QwLb6m0jU9wKscfwmMDN/HpwLrGVfQ/T8WNNwXX7+0h+T7m0VegJTgf8U=",
        );
        let btc_address = "1J7mdg5rbQyUHENYdx39WVWK7fsLpEoXZy";
        assert!(verify(MESSAGE, btc_address, &sig, MessagePrefix::Bitcoin).unwrap());
        assert!(MessageVerifier::bitcoin().verify(btc_address, MESSAGE, &sig).unwrap());

        // The version byte is ignored, so only the prefix decides here.
        assert!(!verify(MESSAGE, ADDRESS_COMPRESSED, &sig, MessagePrefix::Dogecoin).unwrap());
        assert!(verify(MESSAGE, ADDRESS_COMPRESSED, &sig, MessagePrefix::Bitcoin).unwrap());
    }

    #[test]
    fn test_sign_and_verify_with_fresh_key() {
        let key = SigningKey::from_slice(&[0x42u8; 32]).unwrap();
        let prefix = MessagePrefix::custom("\x0cTest Signed:\n");
        let hash = magic_hash("custom domain", &prefix).unwrap();
        let (sig, recid) = key.sign_prehash_recoverable(&hash).unwrap();

        let mut bytes = vec![31 + recid.to_byte()];
        bytes.extend_from_slice(&sig.to_bytes());

        let encoded = key.verifying_key().to_encoded_point(true);
        let pkh = hash160(encoded.as_bytes());
        let doge = Address::from_public_key_hash(DOGECOIN_P2PKH, &pkh).to_string();
        let btc = Address::from_public_key_hash(BITCOIN_P2PKH, &pkh).to_string();

        let verifier = MessageVerifier::new(prefix);
        assert!(verifier.verify(&doge, "custom domain", &bytes).unwrap());
        assert!(verifier.verify(&btc, "custom domain", &bytes).unwrap());
        assert!(!MessageVerifier::dogecoin().verify(&doge, "custom domain", &bytes).unwrap());
    }
}
