use crate::access;
use crate::document::{unwrap_base64, DocumentFile};
use crate::error::EnvkeyError;
use crate::model::Document;

/// A single drift finding from [`verify`] — a secret whose on-disk
/// recipient-stanza count does not match the environment's current
/// `recipient_set`, per §4.5.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drift {
    pub env: String,
    pub key: String,
    pub expected: usize,
    pub actual: usize,
}

/// The full report produced by [`verify`].
#[derive(Clone, Debug, Default)]
pub struct Report {
    pub drift: Vec<Drift>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.drift.is_empty()
    }
}

/// Read-only consistency check (§4.5): for every secret in every
/// environment, confirm the number of age recipient stanzas embedded in its
/// ciphertext matches `recipient_set(env).len()`.
///
/// This is a constructive proxy, not a full membership check — age's wire
/// format deliberately hides *which* recipient owns a stanza, so only the
/// stanza count is observable without decrypting. A document kept in sync
/// exclusively through this crate's own `set`/`rotate`/`member_*` operations
/// never drifts; this function exists to catch external tampering or
/// hand-edits to the YAML.
pub fn verify(doc: &Document) -> Result<Report, EnvkeyError> {
    let mut report = Report::default();

    for (env_name, env) in &doc.environments {
        let expected = access::recipient_set(doc, env_name)?.len();
        for (key, entry) in env {
            let raw = unwrap_base64(&entry.value);
            let ciphertext = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, raw.as_bytes())
                .map_err(|_| EnvkeyError::Corrupt)?;
            let actual = envkey_crypto::stanza_count(&ciphertext)?;
            if actual != expected {
                report.drift.push(Drift { env: env_name.clone(), key: key.clone(), expected, actual });
            }
        }
    }

    Ok(report)
}

/// Convenience wrapper taking a loaded [`DocumentFile`] directly.
pub fn verify_file(file: &DocumentFile) -> Result<Report, EnvkeyError> {
    verify(&file.doc)
}
