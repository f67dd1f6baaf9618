use std::fmt;

/// The set of caller-distinguishable error kinds the core can produce.
///
/// Each variant maps to exactly one process exit code via [`EnvkeyError::exit_code`],
/// so a CLI collaborator needs no separate mapping table.
#[derive(Debug)]
pub enum EnvkeyError {
    IdentityMissing(String),
    IdentityMalformed(String),
    IdentityPermissionsTooOpen(String),
    DocumentParse(String),
    DocumentInvariant(String),
    PolicyDenied(String),
    NotFound { env: String, key: String },
    NoRecipients(String),
    NotARecipient,
    Corrupt,
    RecipientDrift { env: String, key: String },
    NameInUse(String),
    LastAdmin,
    IoAtomicWrite(String),
    ChildSpawn(String),
}

impl EnvkeyError {
    /// Exit code per the §6 command-surface contract.
    pub fn exit_code(&self) -> i32 {
        match self {
            EnvkeyError::PolicyDenied(_)
            | EnvkeyError::NotFound { .. }
            | EnvkeyError::RecipientDrift { .. }
            | EnvkeyError::NameInUse(_)
            | EnvkeyError::LastAdmin => 1,
            EnvkeyError::NoRecipients(_) | EnvkeyError::NotARecipient | EnvkeyError::Corrupt => 2,
            EnvkeyError::DocumentParse(_) | EnvkeyError::DocumentInvariant(_) => 3,
            EnvkeyError::IdentityMissing(_)
            | EnvkeyError::IdentityMalformed(_)
            | EnvkeyError::IdentityPermissionsTooOpen(_) => 4,
            EnvkeyError::IoAtomicWrite(_) | EnvkeyError::ChildSpawn(_) => 1,
        }
    }
}

impl fmt::Display for EnvkeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvkeyError::IdentityMissing(d) => write!(f, "identity missing: {d}"),
            EnvkeyError::IdentityMalformed(d) => write!(f, "identity malformed: {d}"),
            EnvkeyError::IdentityPermissionsTooOpen(d) => write!(f, "identity permissions too open: {d}"),
            EnvkeyError::DocumentParse(d) => write!(f, "document parse error: {d}"),
            EnvkeyError::DocumentInvariant(which) => write!(f, "document invariant violated: {which}"),
            EnvkeyError::PolicyDenied(op) => write!(f, "operation denied: {op}"),
            EnvkeyError::NotFound { env, key } => write!(f, "not found: {key} in {env}"),
            EnvkeyError::NoRecipients(env) => write!(f, "no recipients for environment {env}"),
            EnvkeyError::NotARecipient => write!(f, "identity is not a recipient of this ciphertext"),
            EnvkeyError::Corrupt => write!(f, "ciphertext is corrupt or malformed"),
            EnvkeyError::RecipientDrift { env, key } => write!(f, "recipient drift detected: {key} in {env}"),
            EnvkeyError::NameInUse(name) => write!(f, "name already in use: {name}"),
            EnvkeyError::LastAdmin => write!(f, "cannot remove the last admin"),
            EnvkeyError::IoAtomicWrite(d) => write!(f, "atomic write failed: {d}"),
            EnvkeyError::ChildSpawn(d) => write!(f, "failed to spawn child process: {d}"),
        }
    }
}

impl std::error::Error for EnvkeyError {}

impl From<envkey_crypto::CryptoError> for EnvkeyError {
    fn from(e: envkey_crypto::CryptoError) -> Self {
        match e {
            envkey_crypto::CryptoError::NoRecipients => EnvkeyError::NoRecipients(String::new()),
            envkey_crypto::CryptoError::NotARecipient => EnvkeyError::NotARecipient,
            envkey_crypto::CryptoError::Corrupt => EnvkeyError::Corrupt,
            envkey_crypto::CryptoError::InvalidKey(d) => EnvkeyError::DocumentInvariant(d),
        }
    }
}

impl From<envkey_identity::IdentityError> for EnvkeyError {
    fn from(e: envkey_identity::IdentityError) -> Self {
        match e {
            envkey_identity::IdentityError::Missing(d) => EnvkeyError::IdentityMissing(d),
            envkey_identity::IdentityError::Malformed(d) => EnvkeyError::IdentityMalformed(d),
            envkey_identity::IdentityError::PermissionsTooOpen { path, mode } => {
                EnvkeyError::IdentityPermissionsTooOpen(format!("{} ({:o})", path.display(), mode))
            }
            envkey_identity::IdentityError::AlreadyExists(path) => {
                EnvkeyError::IdentityMalformed(format!("{} already exists", path.display()))
            }
            envkey_identity::IdentityError::Io(d) => EnvkeyError::IdentityMissing(d),
            envkey_identity::IdentityError::Crypto(e) => EnvkeyError::from(e),
        }
    }
}
