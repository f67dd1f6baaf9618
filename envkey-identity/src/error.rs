use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IdentityError {
    /// No identity could be located at the given path, env var, or default location.
    Missing(String),
    /// The identity file contents did not parse as an age secret key.
    Malformed(String),
    /// The identity file is readable by users other than its owner.
    ///
    /// Warning-level by default; promoted to a hard failure under strict mode.
    PermissionsTooOpen { path: PathBuf, mode: u32 },
    /// The identity file already exists and `force` was not set.
    AlreadyExists(PathBuf),
    Io(String),
    Crypto(envkey_crypto::CryptoError),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::Missing(detail) => write!(f, "identity not found: {detail}"),
            IdentityError::Malformed(detail) => write!(f, "identity file is malformed: {detail}"),
            IdentityError::PermissionsTooOpen { path, mode } => write!(
                f,
                "identity file {} has mode {:o}, expected owner-only (0600)",
                path.display(),
                mode
            ),
            IdentityError::AlreadyExists(path) => {
                write!(f, "identity file already exists at {} (use force to overwrite)", path.display())
            }
            IdentityError::Io(detail) => write!(f, "identity I/O error: {detail}"),
            IdentityError::Crypto(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IdentityError {}

impl From<envkey_crypto::CryptoError> for IdentityError {
    fn from(e: envkey_crypto::CryptoError) -> Self {
        IdentityError::Crypto(e)
    }
}
