use rand_core::{OsRng, RngCore};

/// Fills `dest` from the OS's random number generator.
///
/// Used for generating keys and nonces. Panics if the OS generator is
/// unavailable; there is no safe fallback for key material.
pub fn copy_randombytes(dest: &mut [u8]) {
    OsRng
        .try_fill_bytes(dest)
        .expect("failed to fill random bytes");
}

/// Returns `len` bytes from the OS's random number generator.
pub fn randombytes_buf(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    copy_randombytes(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randombytes() {
        let a = randombytes_buf(32);
        let b = randombytes_buf(32);
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);

        let mut empty = [0u8; 0];
        copy_randombytes(&mut empty);
    }
}
