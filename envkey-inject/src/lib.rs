//! Child-process secret injection and export formats for `envkey` — the
//! handoff from a decrypted environment to the outside world, either by
//! process replacement or by rendering a text export format.

mod decrypt;
mod export;
mod files;
mod run;

pub use decrypt::{decrypt_environment, Decrypted};
pub use export::{export, ExportFormat};
pub use files::FileSecretDir;
pub use run::run;
