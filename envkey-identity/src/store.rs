use std::fs;
use std::path::Path;

use secrecy::SecretString;

use envkey_crypto::Identity;

use crate::error::IdentityError;
use crate::source::{default_path, IdentitySource};

/// Load an identity from `source`.
///
/// When the source resolves to a file and `strict` is set, a
/// permissions-too-open condition is a hard failure instead of a warning
/// returned to the caller for display.
pub fn load(source: &IdentitySource, strict: bool) -> Result<Identity, IdentityError> {
    match source {
        IdentitySource::Raw(raw) => Ok(Identity::parse(raw)?),
        IdentitySource::Path(path) => load_from_file(path, strict),
        IdentitySource::Default => load_from_file(&default_path(), strict),
    }
}

fn load_from_file(path: &Path, strict: bool) -> Result<Identity, IdentityError> {
    if !path.is_file() {
        return Err(IdentityError::Missing(path.display().to_string()));
    }

    if let Some(mode) = check_permissions(path)? {
        if strict {
            return Err(IdentityError::PermissionsTooOpen { path: path.to_path_buf(), mode });
        }
    }

    let contents = fs::read_to_string(path).map_err(|e| IdentityError::Io(e.to_string()))?;
    let line = contents
        .lines()
        .find(|l| l.trim_start().starts_with("AGE-SECRET-KEY-"))
        .ok_or_else(|| IdentityError::Malformed(format!("no AGE-SECRET-KEY- line in {}", path.display())))?;

    Identity::parse(&SecretString::from(line.trim().to_string())).map_err(IdentityError::from)
}

/// Create a fresh identity, writing it to `path` with owner-only permissions.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn create(path: &Path, force: bool) -> Result<Identity, IdentityError> {
    if path.exists() && !force {
        return Err(IdentityError::AlreadyExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| IdentityError::Io(e.to_string()))?;
    }

    let identity = Identity::generate();
    let public_key = identity.to_recipient();

    use secrecy::ExposeSecret;
    let secret_line = identity.to_secret_string();
    let contents = format!(
        "# created by envkey\n# public key: {public_key}\n{}\n",
        secret_line.expose_secret()
    );

    fs::write(path, contents).map_err(|e| IdentityError::Io(e.to_string()))?;
    harden_permissions(path)?;

    Ok(identity)
}

/// Returns `Some(mode)` when the file's permission bits allow group/other
/// access; `None` on platforms without POSIX permission bits or when the
/// file is already owner-only.
#[cfg(unix)]
fn check_permissions(path: &Path) -> Result<Option<u32>, IdentityError> {
    use std::os::unix::fs::PermissionsExt;
    let meta = fs::metadata(path).map_err(|e| IdentityError::Io(e.to_string()))?;
    let mode = meta.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        Ok(Some(mode))
    } else {
        Ok(None)
    }
}

#[cfg(not(unix))]
fn check_permissions(_path: &Path) -> Result<Option<u32>, IdentityError> {
    Ok(None)
}

#[cfg(unix)]
fn harden_permissions(path: &Path) -> Result<(), IdentityError> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).map_err(|e| IdentityError::Io(e.to_string()))?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms).map_err(|e| IdentityError::Io(e.to_string()))
}

#[cfg(not(unix))]
fn harden_permissions(_path: &Path) -> Result<(), IdentityError> {
    Ok(())
}
