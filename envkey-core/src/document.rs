use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde_yaml::Value;

use crate::error::EnvkeyError;
use crate::model::{Document, Role, DOCUMENT_VERSION};

const LINE_WIDTH: usize = 76;

/// Wrap a base64 string at `LINE_WIDTH` columns, matching the §6 document
/// format's tolerance for (and production of) wrapped ciphertext scalars.
pub fn wrap_base64(encoded: &str) -> String {
    encoded
        .as_bytes()
        .chunks(LINE_WIDTH)
        .map(|c| std::str::from_utf8(c).expect("base64 is ASCII"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip whitespace introduced by wrapping before base64-decoding.
pub fn unwrap_base64(encoded: &str) -> String {
    encoded.chars().filter(|c| !c.is_whitespace()).collect()
}

/// A loaded document together with the leading comment block (if any) found
/// before the first YAML key, so it can be re-emitted verbatim on save.
///
/// Per-entry comment preservation is out of scope: `serde_yaml` does not
/// retain comments once parsed, and round-tripping them precisely would
/// require a CST-aware YAML layer this crate does not carry. The leading
/// document header is the one comment position callers reliably use (e.g.
/// "# managed by envkey — do not edit ciphertexts by hand") and preserving
/// just it keeps most real-world diffs clean without that dependency.
#[derive(Clone, Debug)]
pub struct DocumentFile {
    pub doc: Document,
    pub header_comment: Option<String>,
}

impl DocumentFile {
    pub fn new_empty() -> Self {
        DocumentFile { doc: Document::new_empty(), header_comment: None }
    }

    pub fn load(path: &Path) -> Result<Self, EnvkeyError> {
        let raw = fs::read_to_string(path).map_err(|e| EnvkeyError::DocumentParse(e.to_string()))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, EnvkeyError> {
        let header_comment = leading_comment_block(raw);
        let doc: Document = serde_yaml::from_str(raw).map_err(|e| EnvkeyError::DocumentParse(e.to_string()))?;
        validate(&doc)?;
        Ok(DocumentFile { doc, header_comment })
    }

    /// Serialize to the canonical on-disk YAML form: `default` environment
    /// first, then lexicographic; everything else in field declaration
    /// order (team in insertion order, secrets lexicographic via `BTreeMap`).
    pub fn to_yaml_string(&self) -> Result<String, EnvkeyError> {
        validate(&self.doc)?;

        let mut value = serde_yaml::to_value(&self.doc).map_err(|e| EnvkeyError::DocumentParse(e.to_string()))?;
        reorder_environments(&mut value)?;
        let body = serde_yaml::to_string(&value).map_err(|e| EnvkeyError::DocumentParse(e.to_string()))?;

        Ok(match &self.header_comment {
            Some(header) => format!("{header}\n{body}"),
            None => body,
        })
    }

    /// Write to `path` via write-to-temp + fsync + rename, per §4.4/§5.
    pub fn save(&self, path: &Path) -> Result<(), EnvkeyError> {
        let body = self.to_yaml_string()?;

        let tmp_path = sibling_temp_path(path);
        {
            let mut file = File::create(&tmp_path).map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))?;
            file.write_all(body.as_bytes()).map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))?;
            file.sync_all().map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))?;
        }
        fs::rename(&tmp_path, path).map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))?;
        Ok(())
    }
}

fn sibling_temp_path(path: &Path) -> std::path::PathBuf {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("envkey");
    path.with_file_name(format!(".{file_name}.tmp"))
}

fn leading_comment_block(raw: &str) -> Option<String> {
    let mut lines = Vec::new();
    for line in raw.lines() {
        if line.starts_with('#') {
            lines.push(line);
        } else if line.trim().is_empty() {
            continue;
        } else {
            break;
        }
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn reorder_environments(value: &mut Value) -> Result<(), EnvkeyError> {
    let Value::Mapping(root) = value else {
        return Err(EnvkeyError::DocumentParse("document root is not a mapping".into()));
    };
    let key = Value::String("environments".to_string());
    let Some(Value::Mapping(envs)) = root.get(&key) else {
        return Ok(());
    };

    let mut entries: Vec<(Value, Value)> = envs.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    entries.sort_by(|(a, _), (b, _)| {
        let a = a.as_str().unwrap_or("");
        let b = b.as_str().unwrap_or("");
        env_sort_key(a).cmp(&env_sort_key(b))
    });

    let mut ordered = serde_yaml::Mapping::new();
    for (k, v) in entries {
        ordered.insert(k, v);
    }
    root.insert(key, Value::Mapping(ordered));
    Ok(())
}

fn env_sort_key(name: &str) -> (u8, &str) {
    if name == crate::model::DEFAULT_ENV {
        (0, "")
    } else {
        (1, name)
    }
}

/// Validate invariants I1–I6 (§3). Called on load and before every save.
pub fn validate(doc: &Document) -> Result<(), EnvkeyError> {
    if doc.version != DOCUMENT_VERSION {
        return Err(EnvkeyError::DocumentInvariant(format!("I1: version must be {DOCUMENT_VERSION}")));
    }

    let mut seen_names = std::collections::HashSet::new();
    let mut seen_keys = std::collections::HashSet::new();
    for m in &doc.team {
        if !seen_names.insert(&m.name) {
            return Err(EnvkeyError::DocumentInvariant(format!("I2: duplicate member name {}", m.name)));
        }
        let recipient = envkey_crypto::Recipient::parse(&m.pubkey)
            .map_err(|e| EnvkeyError::DocumentInvariant(format!("I2: member {} has invalid pubkey: {e}", m.name)))?;
        if !seen_keys.insert(recipient.to_string()) {
            return Err(EnvkeyError::DocumentInvariant(format!("I2: duplicate pubkey for member {}", m.name)));
        }
    }

    for (env_name, env) in &doc.environments {
        if !is_valid_env_name(env_name) {
            return Err(EnvkeyError::DocumentInvariant(format!("invalid environment name {env_name}")));
        }
        for (secret_name, entry) in env {
            if !is_valid_secret_name(secret_name) {
                return Err(EnvkeyError::DocumentInvariant(format!("invalid secret name {secret_name}")));
            }
            let known = doc.team.iter().any(|m| m.name == entry.set_by);
            if !known {
                return Err(EnvkeyError::DocumentInvariant(format!(
                    "I4: set_by {} does not reference a known member",
                    entry.set_by
                )));
            }
        }
    }

    if !doc.team.is_empty() && doc.admin_count() == 0 {
        return Err(EnvkeyError::DocumentInvariant("I5: at least one admin is required".into()));
    }

    for m in &doc.team {
        if m.role == Role::Ci {
            let entitlement = m.entitlement();
            if entitlement.is_empty() {
                return Err(EnvkeyError::DocumentInvariant(format!(
                    "I6: ci member {} requires a non-empty environments set",
                    m.name
                )));
            }
            if m.environments.is_none() {
                return Err(EnvkeyError::DocumentInvariant(format!(
                    "I6: ci member {} must declare environments explicitly",
                    m.name
                )));
            }
        }
    }

    Ok(())
}

fn is_valid_env_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn is_valid_secret_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
