//! Protocol prefixes and the message "magic hash".
//!
//! The digest a signer actually signs is
//! `hash256(prefix || varint(len(message)) || message)`. The prefix binds
//! the signature to one protocol's message-signing domain.

use doge_primitives::hash::hash256;
use doge_primitives::util::VarInt;
use doge_primitives::PrimitivesError;

/// Dogecoin signed-message prefix (length byte 0x19 included).
pub const DOGECOIN_PREFIX: &[u8] = b"\x19Dogecoin Signed Message:\n";

/// Bitcoin signed-message prefix (length byte 0x18 included).
pub const BITCOIN_PREFIX: &[u8] = b"\x18Bitcoin Signed Message:\n";

/// The domain-separation prefix prepended to a message before hashing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MessagePrefix {
    /// `"\x19Dogecoin Signed Message:\n"`.
    #[default]
    Dogecoin,
    /// `"\x18Bitcoin Signed Message:\n"`.
    Bitcoin,
    /// Any other prefix, stored as the exact bytes fed to the hash.
    Custom(Vec<u8>),
}

impl MessagePrefix {
    /// Build a custom prefix from text or bytes.
    ///
    /// Text is taken as its UTF-8 encoding. No length byte is added; include
    /// it in `prefix` if the protocol expects one.
    pub fn custom(prefix: impl Into<Vec<u8>>) -> Self {
        MessagePrefix::Custom(prefix.into())
    }

    /// The prefix bytes as hashed.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            MessagePrefix::Dogecoin => DOGECOIN_PREFIX,
            MessagePrefix::Bitcoin => BITCOIN_PREFIX,
            MessagePrefix::Custom(bytes) => bytes.as_slice(),
        }
    }
}

impl AsRef<[u8]> for MessagePrefix {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Compute the magic hash of `message` under `prefix`.
///
/// Both arguments accept text (`&str`, `String`) or raw bytes; text is used
/// as its UTF-8 encoding.
///
/// # Errors
/// `IntegerOutOfRange` if the message length exceeds the compact-integer
/// range (`2^53 - 1` bytes).
pub fn magic_hash(
    message: impl AsRef<[u8]>,
    prefix: impl AsRef<[u8]>,
) -> Result<[u8; 32], PrimitivesError> {
    let message = message.as_ref();
    let prefix = prefix.as_ref();

    let length = VarInt::try_from(message.len())?;
    let mut buf = vec![0u8; prefix.len() + length.length() + message.len()];

    buf[..prefix.len()].copy_from_slice(prefix);
    let written = length.put_bytes(&mut buf, prefix.len())?;
    buf[prefix.len() + written..].copy_from_slice(message);

    Ok(hash256(&buf))
}
