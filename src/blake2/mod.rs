//! # BLAKE2 compression backends
//!
//! Scalar BLAKE2s and BLAKE2b cores implementing
//! [`CompressionBackend`](crate::streaming::CompressionBackend), and the
//! [`Params`] value both are initialized from. Most users want the
//! [`blake2s`](crate::blake2s) or [`blake2b`](crate::blake2b) modules instead.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Error;

mod blake2b_soft;
mod blake2s_soft;
mod hasher;

pub use blake2b_soft::Blake2bCore;
pub use blake2s_soft::Blake2sCore;
pub use hasher::Blake2Hasher;

/// BLAKE2 initialization parameters: digest length, optional key, salt and
/// personalization.
///
/// Salt and personalization are either empty (all zero) or exactly 8 bytes
/// for BLAKE2s and 16 bytes for BLAKE2b. Limits are checked when a core is
/// created from the parameters.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Params {
    digest_len: usize,
    key: Vec<u8>,
    salt: Vec<u8>,
    personal: Vec<u8>,
}

impl Params {
    /// Returns parameters for an unkeyed hash of `digest_len` bytes.
    pub fn new(digest_len: usize) -> Self {
        Self {
            digest_len,
            key: Vec::new(),
            salt: Vec::new(),
            personal: Vec::new(),
        }
    }

    /// Sets the key. An empty key means unkeyed.
    pub fn with_key(mut self, key: &[u8]) -> Self {
        self.key.zeroize();
        self.key.extend_from_slice(key);
        self
    }

    /// Sets the salt.
    pub fn with_salt(mut self, salt: &[u8]) -> Self {
        self.salt = salt.to_vec();
        self
    }

    /// Sets the personalization string.
    pub fn with_personal(mut self, personal: &[u8]) -> Self {
        self.personal = personal.to_vec();
        self
    }

    /// Digest length in bytes.
    pub fn digest_len(&self) -> usize {
        self.digest_len
    }

    /// Key bytes, empty when unkeyed.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Validates the parameters against a variant whose parameter block is
    /// `N` bytes and serializes them into that block. `N` is also the
    /// maximum digest and key length, and a quarter of it the salt and
    /// personalization length.
    pub(crate) fn param_block<const N: usize>(&self, name: &str) -> Result<[u8; N], Error> {
        let field_len = N / 4;

        if self.digest_len == 0 || self.digest_len > N {
            return Err(chunkwise_error!(format!(
                "invalid {} digest length: {}, should be between 1 and {}",
                name, self.digest_len, N
            )));
        }
        if self.key.len() > N {
            return Err(chunkwise_error!(format!(
                "invalid {} key length: {} max: {}",
                name,
                self.key.len(),
                N
            )));
        }
        if !self.salt.is_empty() && self.salt.len() != field_len {
            return Err(chunkwise_error!(format!(
                "invalid {} salt length: {}, expected {}",
                name,
                self.salt.len(),
                field_len
            )));
        }
        if !self.personal.is_empty() && self.personal.len() != field_len {
            return Err(chunkwise_error!(format!(
                "invalid {} personalization length: {}, expected {}",
                name,
                self.personal.len(),
                field_len
            )));
        }

        let mut block = [0u8; N];
        block[0] = self.digest_len as u8;
        block[1] = self.key.len() as u8;
        // fanout and depth, sequential mode
        block[2] = 1;
        block[3] = 1;
        block[N / 2..N / 2 + self.salt.len()].copy_from_slice(&self.salt);
        block[3 * N / 4..3 * N / 4 + self.personal.len()].copy_from_slice(&self.personal);

        Ok(block)
    }

    /// Returns the key zero-padded to a full compression block, or `None`
    /// when unkeyed.
    pub(crate) fn key_block<const BLOCKBYTES: usize>(&self) -> Option<[u8; BLOCKBYTES]> {
        if self.key.is_empty() {
            return None;
        }
        let mut block = [0u8; BLOCKBYTES];
        block[..self.key.len()].copy_from_slice(&self.key);
        Some(block)
    }
}

impl std::fmt::Debug for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Params")
            .field("digest_len", &self.digest_len)
            .field("key_len", &self.key.len())
            .field("salt", &self.salt)
            .field("personal", &self.personal)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_block_layout() {
        let params = Params::new(32)
            .with_key(&[9u8; 5])
            .with_salt(&[1u8; 8])
            .with_personal(&[2u8; 8]);
        let block = params.param_block::<32>("blake2s").expect("param block");

        assert_eq!(&block[..4], &[32, 5, 1, 1]);
        assert_eq!(&block[4..16], &[0u8; 12]);
        assert_eq!(&block[16..24], &[1u8; 8]);
        assert_eq!(&block[24..32], &[2u8; 8]);

        let block = Params::new(64)
            .with_salt(&[3u8; 16])
            .param_block::<64>("blake2b")
            .expect("param block");
        assert_eq!(&block[..4], &[64, 0, 1, 1]);
        assert_eq!(&block[32..48], &[3u8; 16]);
        assert_eq!(&block[48..64], &[0u8; 16]);
    }

    #[test]
    fn test_param_limits() {
        Params::new(0)
            .param_block::<32>("blake2s")
            .expect_err("zero digest length");
        Params::new(33)
            .param_block::<32>("blake2s")
            .expect_err("digest too long");
        Params::new(32)
            .with_key(&[0u8; 33])
            .param_block::<32>("blake2s")
            .expect_err("key too long");
        Params::new(64)
            .with_salt(&[0u8; 8])
            .param_block::<64>("blake2b")
            .expect_err("short salt");
        Params::new(64)
            .with_personal(&[0u8; 17])
            .param_block::<64>("blake2b")
            .expect_err("long personal");
        Params::new(64)
            .with_key(&[0u8; 64])
            .param_block::<64>("blake2b")
            .expect("max key");
    }

    #[test]
    fn test_key_block() {
        assert!(Params::new(32).key_block::<64>().is_none());

        let block = Params::new(32)
            .with_key(b"key")
            .key_block::<64>()
            .expect("key block");
        assert_eq!(&block[..3], b"key");
        assert_eq!(&block[3..], &[0u8; 61]);
    }

    #[test]
    fn test_with_key_replaces_key() {
        let params = Params::new(32).with_key(b"first key").with_key(b"second");
        assert_eq!(params.key(), b"second");
        assert_eq!(params.key_block::<64>().expect("key block")[..6], *b"second");

        assert!(Params::new(32).with_key(b"").key().is_empty());
    }

    #[test]
    fn test_debug_hides_key() {
        let params = Params::new(32).with_key(b"super secret");
        let printed = format!("{:?}", params);
        assert!(printed.contains("key_len: 12"));
        assert!(!printed.contains("115"));
    }
}
