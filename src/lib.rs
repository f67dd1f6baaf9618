//! # envkey
//!
//! Zero-infrastructure, git-native secret management for software teams.
//! Secrets live encrypted in a single YAML document committed to version
//! control; decryption happens locally using each team member's age
//! identity. This crate is the library surface — argument parsing,
//! interactive prompts, and packaging are left to a CLI frontend.
//!
//! ## Quick start
//!
//! ```no_run
//! use envkey::{Config, Envkey};
//!
//! let config = Config::from_env();
//! let envkey = Envkey::new(config);
//!
//! let identity = envkey.load_identity().unwrap();
//! let mut document = envkey.load_document().unwrap();
//!
//! let actor = envkey.actor(&document, &identity).unwrap();
//! envkey.set(&mut document, "default", "API_KEY", b"super-secret", &actor).unwrap();
//! envkey.save(&document).unwrap();
//! ```
//!
//! ## Crate layout
//!
//! - [`envkey_crypto`] — the age v1 encryption contract (encrypt/decrypt,
//!   identity/recipient types, secret generation).
//! - [`envkey_identity`] — identity file load/create/permission hardening.
//! - [`envkey_core`] — the document model, access policy, secrets engine,
//!   and verify operation.
//! - [`envkey_inject`] — child-process injection and export formats.
//!
//! This crate (`envkey`) ties them together behind [`Envkey`], a thin
//! facade mirroring each module's operations with the document/identity
//! plumbing already wired up.

mod config;

pub use config::Config;
pub use envkey_core::{
    is_entitled, recipient_set, validate, verify, verify_file, Actor, Document, DocumentFile, Drift, EnvkeyError,
    Environment, Member, Metadata, Operation, Report, Role, SecretEntry, SecretKind, DEFAULT_ENV, DOCUMENT_VERSION,
};
pub use envkey_crypto::{Identity, Recipient};
pub use envkey_inject::{export, run, ExportFormat};
pub use envkey_identity::IdentitySource;

use std::path::Path;

/// A thin facade over the document lifecycle and every operation in
/// [`envkey_core`]/[`envkey_inject`], wired up to a single [`Config`].
///
/// Holding no mutable state of its own, `Envkey` is cheap to construct and
/// safe to use from multiple independent call sites within one process; the
/// document and identity it operates on are always passed in explicitly.
pub struct Envkey {
    config: Config,
}

impl Envkey {
    pub fn new(config: Config) -> Self {
        Envkey { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the secrets document from [`Config::document_path`]. If the
    /// file does not exist yet, returns a fresh empty document rather than
    /// an error — `init` semantics are a CLI concern, but an empty starting
    /// point is the library's.
    pub fn load_document(&self) -> Result<DocumentFile, EnvkeyError> {
        if self.config.document_path.exists() {
            DocumentFile::load(&self.config.document_path)
        } else {
            Ok(DocumentFile::new_empty())
        }
    }

    /// Persist `document` back to [`Config::document_path`].
    pub fn save(&self, document: &DocumentFile) -> Result<(), EnvkeyError> {
        document.save(&self.config.document_path)
    }

    /// Load the caller's identity from [`Config::identity_source`].
    pub fn load_identity(&self) -> Result<Identity, EnvkeyError> {
        Ok(envkey_identity::load(&self.config.identity_source, self.config.strict_permissions)?)
    }

    /// Create a fresh identity at `path`, refusing to overwrite an existing
    /// file unless `force` is set.
    pub fn create_identity(&self, path: &Path, force: bool) -> Result<Identity, EnvkeyError> {
        Ok(envkey_identity::create(path, force)?)
    }

    /// Resolve the [`Actor`] corresponding to `identity`: the team member
    /// whose recipient public key matches it. Fails with a policy-denied
    /// error if the identity is not a recognized team member — an unknown
    /// identity has no role to evaluate operations against.
    pub fn actor<'a>(&self, document: &DocumentFile, identity: &'a Identity) -> Result<Actor<'a>, EnvkeyError> {
        let recipient = identity.to_recipient().to_string();
        let member = document
            .doc
            .team
            .iter()
            .find(|m| m.pubkey == recipient)
            .cloned()
            .ok_or_else(|| EnvkeyError::PolicyDenied("identity is not a registered team member".to_string()))?;
        Ok(Actor { member, identity })
    }

    /// The environment to operate on when the caller doesn't specify one.
    pub fn default_env(&self) -> &str {
        &self.config.default_env
    }

    pub fn set(&self, document: &mut DocumentFile, env: &str, key: &str, plaintext: &[u8], actor: &Actor) -> Result<(), EnvkeyError> {
        envkey_core::set(document, env, key, plaintext, actor)
    }

    pub fn set_file(&self, document: &mut DocumentFile, env: &str, key: &str, plaintext: &[u8], actor: &Actor) -> Result<(), EnvkeyError> {
        envkey_core::set_file(document, env, key, plaintext, actor)
    }

    pub fn get(&self, document: &DocumentFile, env: &str, key: &str, actor: &Actor) -> Result<envkey_crypto::Zeroizing<Vec<u8>>, EnvkeyError> {
        envkey_core::get(document, env, key, actor)
    }

    pub fn rm(&self, document: &mut DocumentFile, env: &str, key: &str, actor: &Actor) -> Result<(), EnvkeyError> {
        envkey_core::rm(document, env, key, actor)
    }

    pub fn rotate_value(&self, document: &mut DocumentFile, env: &str, key: &str, new_plaintext: &[u8], actor: &Actor) -> Result<(), EnvkeyError> {
        envkey_core::rotate_value(document, env, key, new_plaintext, actor)
    }

    pub fn rotate_generate(&self, document: &mut DocumentFile, env: &str, key: &str, n: usize, actor: &Actor) -> Result<(), EnvkeyError> {
        envkey_core::rotate_generate(document, env, key, n, actor)
    }

    pub fn rotate_all(&self, document: &mut DocumentFile, actor: &Actor) -> Result<(), EnvkeyError> {
        envkey_core::rotate_all(document, actor)
    }

    pub fn member_add(
        &self,
        document: &mut DocumentFile,
        name: &str,
        pubkey: &str,
        role: Role,
        environments: Option<Vec<String>>,
        actor: &Actor,
    ) -> Result<(), EnvkeyError> {
        envkey_core::member_add(document, name, pubkey, role, environments, actor)
    }

    pub fn member_rm(&self, document: &mut DocumentFile, name: &str, actor: &Actor) -> Result<(), EnvkeyError> {
        envkey_core::member_rm(document, name, actor)
    }

    pub fn member_grant(&self, document: &mut DocumentFile, name: &str, env: &str, actor: &Actor) -> Result<(), EnvkeyError> {
        envkey_core::member_grant(document, name, env, actor)
    }

    pub fn member_revoke(&self, document: &mut DocumentFile, name: &str, env: &str, actor: &Actor) -> Result<(), EnvkeyError> {
        envkey_core::member_revoke(document, name, env, actor)
    }

    pub fn member_update(&self, document: &mut DocumentFile, name: &str, new_pubkey: &str, actor: &Actor) -> Result<(), EnvkeyError> {
        envkey_core::member_update(document, name, new_pubkey, actor)
    }

    pub fn verify(&self, document: &DocumentFile) -> Result<Report, EnvkeyError> {
        verify_file(document)
    }

    /// Decrypt `env` and replace the current process image with `argv`
    /// carrying the decrypted secrets as environment variables.
    pub fn run(&self, document: &DocumentFile, env: &str, argv: &[String], actor: &Actor) -> Result<i32, EnvkeyError> {
        envkey_inject::run(document, env, argv, actor, None)
    }

    pub fn export(&self, document: &DocumentFile, env: &str, format: ExportFormat, actor: &Actor) -> Result<String, EnvkeyError> {
        envkey_inject::export(document, env, format, actor)
    }
}
