use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use envkey_core::{Actor, DocumentFile, EnvkeyError, SecretKind};

use crate::decrypt::{decrypt_environment, Decrypted};
use crate::files::FileSecretDir;

/// Build the child-process environment: the parent's environment augmented
/// by the decrypted map, with file-valued secrets materialized under
/// `file_dir_handle` and replaced by their path.
///
/// Split out from [`run`] so the variable-construction logic is testable
/// without invoking `exec`, which replaces the calling process on success.
fn build_child_env(
    decrypted: &HashMap<String, Decrypted>,
    file_dir_handle: Option<&FileSecretDir>,
) -> Result<HashMap<String, String>, EnvkeyError> {
    let mut vars: HashMap<String, String> = std::env::vars().collect();
    for (key, value) in decrypted {
        let rendered = match value.kind {
            SecretKind::String => String::from_utf8_lossy(&value.plaintext).into_owned(),
            SecretKind::File => {
                let dir = file_dir_handle.expect("file secret without a directory");
                dir.write_secret(key, &value.plaintext)?.display().to_string()
            }
        };
        vars.insert(key.clone(), rendered);
    }
    Ok(vars)
}

/// `run(env, argv)` — §4.6. `file_dir` is the caller-supplied directory for
/// file-valued secrets; `None` allocates a secure temporary one.
///
/// On unix this replaces the current process image via `exec` and never
/// returns on success. On platforms without process replacement (or if
/// `exec` itself fails) it falls back to spawn-and-wait, propagating the
/// child's exit status and zeroizing plaintexts before returning.
pub fn run(file: &DocumentFile, env: &str, argv: &[String], actor: &Actor, file_dir: Option<PathBuf>) -> Result<i32, EnvkeyError> {
    let (program, args) = argv.split_first().ok_or_else(|| EnvkeyError::ChildSpawn("empty argv".into()))?;

    let decrypted: HashMap<String, Decrypted> = decrypt_environment(file, env, actor)?.into_iter().collect();
    let has_file_secrets = decrypted.values().any(|d| d.kind == SecretKind::File);

    let file_dir_handle = if has_file_secrets {
        Some(match file_dir {
            Some(path) => FileSecretDir::at(path)?,
            None => FileSecretDir::temporary()?,
        })
    } else {
        None
    };

    let vars = build_child_env(&decrypted, file_dir_handle.as_ref())?;

    tracing::info!(env, program = program.as_str(), "injecting secrets into child process");

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // process replacement uses the file-secret directory beyond this
        // function's return, so it must outlive us.
        if let Some(dir) = file_dir_handle {
            dir.keep();
        }
        let err = Command::new(program).args(args).envs(&vars).exec();
        // `exec` only returns on failure; `vars` (and `decrypted`) are
        // dropped/zeroized here since the process image was never replaced.
        return Err(EnvkeyError::ChildSpawn(err.to_string()));
    }

    #[cfg(not(unix))]
    {
        let status = Command::new(program)
            .args(args)
            .envs(&vars)
            .status()
            .map_err(|e| EnvkeyError::ChildSpawn(e.to_string()))?;
        drop(file_dir_handle);
        Ok(status.code().unwrap_or(1))
    }
}
