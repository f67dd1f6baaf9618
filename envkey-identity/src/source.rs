use std::path::PathBuf;

use secrecy::SecretString;

/// Where to look for a team member's identity.
#[derive(Clone, Debug)]
pub enum IdentitySource {
    /// An explicit path to an identity file.
    Path(PathBuf),
    /// The raw `AGE-SECRET-KEY-…` text, e.g. from an environment variable in CI.
    Raw(SecretString),
    /// The platform default configuration directory.
    Default,
}

/// Default identity file location: `<config dir>/envkey/identity.age`.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("envkey")
        .join("identity.age")
}

/// Parse the `ENVKEY_IDENTITY` environment variable's value.
///
/// A value that looks like an `AGE-SECRET-KEY-…` line is treated as raw key
/// material; anything else is treated as a path.
pub fn source_from_env_value(value: String) -> IdentitySource {
    if value.trim_start().starts_with("AGE-SECRET-KEY-") {
        IdentitySource::Raw(SecretString::from(value))
    } else {
        IdentitySource::Path(PathBuf::from(value))
    }
}
