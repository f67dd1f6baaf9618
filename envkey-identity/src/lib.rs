//! The Identity Store: loads and persists a team member's long-lived age
//! identity, and enforces restrictive file permissions on it.

mod error;
mod source;
mod store;

pub use error::IdentityError;
pub use source::{default_path, source_from_env_value, IdentitySource};
pub use store::{create, load};

pub use envkey_crypto::Identity;
