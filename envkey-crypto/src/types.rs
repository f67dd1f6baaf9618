use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};

use crate::error::CryptoError;

/// An age X25519 recipient (public key), bech32-encoded `age1…`.
///
/// Equality, ordering, and hashing are all defined over the bech32 string
/// form rather than derived on the wrapped `age` type, since `age::x25519::
/// Recipient` makes no guarantee about implementing those traits itself.
#[derive(Clone, Debug)]
pub struct Recipient(age::x25519::Recipient);

impl Recipient {
    pub fn parse(s: &str) -> Result<Self, CryptoError> {
        s.parse::<age::x25519::Recipient>()
            .map(Recipient)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))
    }

    pub(crate) fn inner(&self) -> &age::x25519::Recipient {
        &self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Recipient {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Recipient {}

impl PartialOrd for Recipient {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Recipient {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl std::hash::Hash for Recipient {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.to_string().hash(state)
    }
}

impl FromStr for Recipient {
    type Err = CryptoError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Recipient::parse(s)
    }
}

/// An age X25519 identity (secret key).
pub struct Identity(age::x25519::Identity);

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identity").field(&"<redacted>").finish()
    }
}

impl Identity {
    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Identity(age::x25519::Identity::generate())
    }

    /// Parse an identity from its `AGE-SECRET-KEY-…` text encoding.
    pub fn parse(raw: &SecretString) -> Result<Self, CryptoError> {
        raw.expose_secret()
            .trim()
            .parse::<age::x25519::Identity>()
            .map(Identity)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))
    }

    /// The public recipient corresponding to this identity.
    pub fn to_recipient(&self) -> Recipient {
        Recipient(self.0.to_public())
    }

    /// Re-encode this identity as its `AGE-SECRET-KEY-…` text line.
    pub fn to_secret_string(&self) -> SecretString {
        SecretString::from(self.0.to_string().expose_secret().to_string())
    }

    pub(crate) fn inner(&self) -> &age::x25519::Identity {
        &self.0
    }
}
