//! The crypto engine: a thin, opinionated contract over the age v1
//! multi-recipient encryption scheme.
//!
//! `encrypt` seals a plaintext to every recipient in a set with a fresh
//! random file key; `decrypt` opens a ciphertext with a single identity.
//! Every returned plaintext is wrapped in a zeroize-on-drop container and
//! every error path is zeroize-safe — no partially-read plaintext is ever
//! left on the heap after a failed decrypt.

mod engine;
mod error;
mod generate;
mod types;
mod wire;

pub use engine::{decrypt, encrypt};
pub use error::CryptoError;
pub use generate::generate_secret;
pub use types::{Identity, Recipient};
pub use wire::stanza_count;

pub use zeroize::Zeroizing;
