//! Minimal, read-only parsing of the age v1 header.
//!
//! The age wire format opens with a plaintext-ASCII header: a version line,
//! one `-> X25519 <b64>` stanza line (plus a continuation line) per
//! recipient, and a closing `--- <b64 mac>` line, after which the binary
//! ChaCha20-Poly1305 payload begins. Which recipient owns which stanza is
//! deliberately unrecoverable without decrypting — that's an anonymity
//! property of the format — but the stanza *count* is plain to read, and is
//! exactly what `verify` (see envkey-core) needs to detect recipient drift
//! without decrypting every entry for every member.

/// Count the recipient stanzas in a raw (non-armored) age v1 ciphertext.
///
/// Returns `Corrupt` if the header is truncated before the `---` MAC line.
pub fn stanza_count(ciphertext: &[u8]) -> Result<usize, crate::error::CryptoError> {
    let mut count = 0usize;
    let mut offset = 0usize;

    while offset < ciphertext.len() {
        let rest = &ciphertext[offset..];
        let newline = rest.iter().position(|&b| b == b'\n');
        let Some(nl) = newline else {
            return Err(crate::error::CryptoError::Corrupt);
        };
        let line = &rest[..nl];
        offset += nl + 1;

        if line.starts_with(b"---") {
            return Ok(count);
        }
        if line.starts_with(b"-> ") {
            count += 1;
        }
    }

    Err(crate::error::CryptoError::Corrupt)
}
