use std::fmt;

/// Errors produced by the crypto engine.
///
/// Decryption failures never carry the underlying `age` error text — only
/// the fixed strings below — so a caller cannot distinguish "wrong key" from
/// "corrupt ciphertext" by message content, only by variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// `encrypt` was called with an empty recipient set.
    NoRecipients,
    /// The identity is not among the ciphertext's recipient stanzas.
    NotARecipient,
    /// The ciphertext is malformed or its AEAD tag does not verify.
    Corrupt,
    /// A recipient or identity string failed to parse.
    InvalidKey(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::NoRecipients => write!(f, "no recipients supplied to encrypt"),
            CryptoError::NotARecipient => write!(f, "identity is not a recipient of this ciphertext"),
            CryptoError::Corrupt => write!(f, "ciphertext is corrupt or malformed"),
            CryptoError::InvalidKey(detail) => write!(f, "invalid key: {detail}"),
        }
    }
}

impl std::error::Error for CryptoError {}
