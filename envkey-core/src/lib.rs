//! Document model, access policy, secrets engine, and verification for
//! `envkey` — the non-cryptographic, non-identity-handling core of the
//! project. Crypto primitives live in `envkey-crypto`; identity file
//! handling lives in `envkey-identity`.

mod access;
mod document;
mod engine;
mod error;
mod model;
mod verify;

pub use access::{can_perform, is_entitled, recipient_set, Operation};
pub use document::{unwrap_base64, validate, wrap_base64, DocumentFile};
pub use engine::{
    get, member_add, member_grant, member_revoke, member_rm, member_update, rm, rotate_all, rotate_generate,
    rotate_value, set, set_file, Actor,
};
pub use error::EnvkeyError;
pub use model::{Document, Environment, Member, Metadata, Role, SecretEntry, SecretKind, DEFAULT_ENV, DOCUMENT_VERSION};
pub use verify::{verify, verify_file, Drift, Report};
