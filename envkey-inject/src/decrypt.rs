use std::collections::BTreeMap;

use envkey_core::{get, Actor, DocumentFile, EnvkeyError, SecretKind};
use envkey_crypto::Zeroizing;

/// A single decrypted environment entry, kept zeroizing until consumed.
pub struct Decrypted {
    pub kind: SecretKind,
    pub plaintext: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for Decrypted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decrypted")
            .field("kind", &self.kind)
            .field("plaintext", &"<redacted>")
            .finish()
    }
}

/// Decrypt every entry of `env` with `actor`'s identity.
///
/// Mirrors §4.6's `run`/`export` precondition: both operations start from
/// this same fully-decrypted map, built through the core's `get` so access
/// policy is enforced per key exactly as it is for a standalone `get`.
pub fn decrypt_environment(
    file: &DocumentFile,
    env: &str,
    actor: &Actor,
) -> Result<BTreeMap<String, Decrypted>, EnvkeyError> {
    let entries = file
        .doc
        .environment(env)
        .ok_or_else(|| EnvkeyError::NotFound { env: env.to_string(), key: String::new() })?;

    let mut out = BTreeMap::new();
    for (key, entry) in entries {
        let plaintext = get(file, env, key, actor)?;
        out.insert(key.clone(), Decrypted { kind: entry.kind(), plaintext });
    }
    Ok(out)
}
