use base64::Engine as _;
use rand::RngCore;
use zeroize::Zeroizing;

/// Sample `n` bytes from a cryptographically secure RNG and encode them as
/// unpadded base64 — the "rotate --generate" value generator.
pub fn generate_secret(n: usize) -> Zeroizing<String> {
    let mut buf = Zeroizing::new(vec![0u8; n]);
    rand::rng().fill_bytes(&mut buf);
    Zeroizing::new(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&*buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_entropy_length() {
        let secret = generate_secret(32);
        // 32 bytes of unpadded URL-safe base64 is ceil(32*8/6) = 43 chars.
        assert_eq!(secret.len(), 43);
    }

    #[test]
    fn two_generations_differ() {
        let a = generate_secret(16);
        let b = generate_secret(16);
        assert_ne!(*a, *b);
    }
}
