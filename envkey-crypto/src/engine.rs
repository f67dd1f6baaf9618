use std::io::{Read, Write};

use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::types::{Identity, Recipient};

/// Encrypt `plaintext` to every recipient in `recipients`, using a fresh
/// random age file key. The output is the raw (non-armored) age v1 binary
/// encoding — callers that need to store it in text (e.g. a YAML document)
/// are responsible for their own base64 framing.
pub fn encrypt(plaintext: &[u8], recipients: &[Recipient]) -> Result<Vec<u8>, CryptoError> {
    if recipients.is_empty() {
        return Err(CryptoError::NoRecipients);
    }

    let age_recipients: Vec<&dyn age::Recipient> =
        recipients.iter().map(|r| r.inner() as &dyn age::Recipient).collect();

    let encryptor = age::Encryptor::with_recipients(age_recipients.into_iter())
        .map_err(|_| CryptoError::NoRecipients)?;

    let mut ciphertext = Vec::new();
    let mut writer = encryptor
        .wrap_output(&mut ciphertext)
        .map_err(|_| CryptoError::Corrupt)?;
    writer.write_all(plaintext).map_err(|_| CryptoError::Corrupt)?;
    writer.finish().map_err(|_| CryptoError::Corrupt)?;

    Ok(ciphertext)
}

/// Decrypt `ciphertext` with `identity`. The returned plaintext is held in a
/// zeroizing buffer that the caller must not let outlive its immediate use.
pub fn decrypt(ciphertext: &[u8], identity: &Identity) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let decryptor = age::Decryptor::new(ciphertext).map_err(|_| CryptoError::Corrupt)?;

    let identities: Vec<&dyn age::Identity> = vec![identity.inner() as &dyn age::Identity];
    let mut reader = decryptor
        .decrypt(identities.into_iter())
        .map_err(classify_decrypt_error)?;

    let mut plaintext = Zeroizing::new(Vec::new());
    reader
        .read_to_end(&mut plaintext)
        .map_err(|_| CryptoError::Corrupt)?;

    Ok(plaintext)
}

fn classify_decrypt_error(err: age::DecryptError) -> CryptoError {
    match err {
        age::DecryptError::NoMatchingKeys => CryptoError::NotARecipient,
        _ => CryptoError::Corrupt,
    }
}
