use std::path::PathBuf;

use envkey_identity::{default_path, source_from_env_value, IdentitySource};

/// Where the secret document lives.
const DOCUMENT_PATH_VAR: &str = "ENVKEY_FILE";
/// Path to an identity file, or raw `AGE-SECRET-KEY-...` key material.
const IDENTITY_VAR: &str = "ENVKEY_IDENTITY";
/// Which environment a command targets when `-e`/`--env` is not given.
const ENV_VAR: &str = "ENVKEY_ENV";
/// Promotes `IdentityPermissionsTooOpen` from a warning to a fatal error.
const STRICT_PERMISSIONS_VAR: &str = "ENVKEY_STRICT_PERMISSIONS";

const DEFAULT_DOCUMENT_FILE: &str = ".envkey.yaml";

/// Runtime configuration for an `envkey` invocation.
///
/// There is no global/ambient configuration anywhere in this crate — every
/// operation takes a `Config` (or the pieces of it it needs) explicitly.
/// [`Config::from_env`] is the single place environment variables are read;
/// CLI collaborators may instead construct this directly from parsed flags.
#[derive(Clone, Debug)]
pub struct Config {
    pub document_path: PathBuf,
    pub identity_source: IdentitySource,
    pub default_env: String,
    pub strict_permissions: bool,
}

impl Config {
    /// Read configuration from the environment:
    ///
    ///   ENVKEY_FILE      - path to the secrets document (default: .envkey.yaml)
    ///   ENVKEY_IDENTITY  - path to an identity file, or raw AGE-SECRET-KEY-... text
    ///                      (default: the platform config directory)
    ///   ENVKEY_ENV       - default environment name (default: "default")
    ///   ENVKEY_STRICT_PERMISSIONS - "1"/"true" to make loose identity file
    ///                      permissions fatal instead of a warning (default: off)
    pub fn from_env() -> Self {
        let document_path = std::env::var(DOCUMENT_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DOCUMENT_FILE));

        let identity_source = match std::env::var(IDENTITY_VAR) {
            Ok(value) => source_from_env_value(value),
            Err(_) => IdentitySource::Path(default_path()),
        };

        let default_env = std::env::var(ENV_VAR).unwrap_or_else(|_| envkey_core::DEFAULT_ENV.to_string());

        let strict_permissions = matches!(
            std::env::var(STRICT_PERMISSIONS_VAR).as_deref(),
            Ok("1") | Ok("true")
        );

        Config { document_path, identity_source, default_env, strict_permissions }
    }

    /// A configuration rooted at an explicit document path, with the
    /// platform default identity location and non-strict permission
    /// checking. Useful for tests and for embedding callers that don't
    /// want `from_env`'s environment-variable coupling.
    pub fn at(document_path: PathBuf) -> Self {
        Config {
            document_path,
            identity_source: IdentitySource::Default,
            default_env: envkey_core::DEFAULT_ENV.to_string(),
            strict_permissions: false,
        }
    }
}
