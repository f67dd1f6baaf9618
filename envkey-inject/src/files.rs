use std::fs;
use std::path::{Path, PathBuf};

use envkey_core::EnvkeyError;

/// A per-run directory holding file-valued secret plaintexts, created with
/// 0700 permissions on unix. Removed on drop unless [`FileSecretDir::keep`]
/// is called (process-replacement callers must keep it — they exit before
/// `Drop` would run, and the replaced process still needs the files).
pub struct FileSecretDir {
    path: PathBuf,
    _handle: Option<tempfile::TempDir>,
}

impl FileSecretDir {
    /// Use a caller-supplied directory, created if missing.
    pub fn at(path: PathBuf) -> Result<Self, EnvkeyError> {
        fs::create_dir_all(&path).map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))?;
        harden(&path)?;
        Ok(FileSecretDir { path, _handle: None })
    }

    /// Allocate a secure temporary directory with 0700 mode.
    pub fn temporary() -> Result<Self, EnvkeyError> {
        let dir = tempfile::Builder::new()
            .prefix(".envkey-run-")
            .tempdir()
            .map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))?;
        harden(dir.path())?;
        let path = dir.path().to_path_buf();
        Ok(FileSecretDir { path, _handle: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `plaintext` to `key` inside this directory with 0600 mode,
    /// returning the path to inject as the secret's environment variable
    /// value.
    pub fn write_secret(&self, key: &str, plaintext: &[u8]) -> Result<PathBuf, EnvkeyError> {
        let file_path = self.path.join(key);
        fs::write(&file_path, plaintext).map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&file_path).map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&file_path, perms).map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))?;
        }
        Ok(file_path)
    }

    /// Detach the underlying `TempDir` handle so it outlives this value,
    /// for callers about to replace the process image.
    pub fn keep(mut self) -> PathBuf {
        if let Some(handle) = self._handle.take() {
            let _ = handle.keep();
        }
        self.path.clone()
    }
}

#[cfg(unix)]
fn harden(path: &Path) -> Result<(), EnvkeyError> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))?.permissions();
    perms.set_mode(0o700);
    fs::set_permissions(path, perms).map_err(|e| EnvkeyError::IoAtomicWrite(e.to_string()))
}

#[cfg(not(unix))]
fn harden(_path: &Path) -> Result<(), EnvkeyError> {
    Ok(())
}
