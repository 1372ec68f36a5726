//! # AES-256-GCM authenticated encryption
//!
//! [`Aes256Gcm`] encrypts with AES-256 in counter mode and authenticates the
//! associated data and ciphertext with GHASH, which runs through the same
//! [`StreamingState`] engine as the hash functions. Nonces are 96 bits.
//!
//! Decryption verifies the tag before any plaintext is produced.
//!
//! # Example
//!
//! ```
//! use chunkwise::aes256gcm::*;
//!
//! let key = Key::gen();
//! let nonce = Nonce::gen();
//! let aead = Aes256Gcm::new(&key);
//!
//! let ciphertext = aead
//!     .encrypt(&nonce, b"attack at dawn", b"header")
//!     .expect("encrypt failed");
//! assert_eq!(ciphertext.len(), 14 + CRYPTO_AEAD_AES256GCM_ABYTES);
//!
//! let plaintext = aead
//!     .decrypt(&nonce, &ciphertext, b"header")
//!     .expect("decrypt failed");
//! assert_eq!(plaintext, b"attack at dawn");
//!
//! // the associated data is authenticated too
//! aead.decrypt(&nonce, &ciphertext, b"other header")
//!     .expect_err("decrypt should have failed");
//! ```

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes256;
use ctr::cipher::{InnerIvInit, StreamCipher, StreamCipherSeek};
use generic_array::GenericArray;
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroize;

pub use crate::constants::{
    CRYPTO_AEAD_AES256GCM_ABYTES, CRYPTO_AEAD_AES256GCM_ADBYTES_MAX,
    CRYPTO_AEAD_AES256GCM_KEYBYTES, CRYPTO_AEAD_AES256GCM_MESSAGEBYTES_MAX,
    CRYPTO_AEAD_AES256GCM_NPUBBYTES,
};
use crate::error::Error;
use crate::streaming::StreamingState;
use crate::types::*;
use crate::utils::xor_buf;

pub mod ghash;

use ghash::{Ghash, HashKey};

/// Stack-allocated AES-256-GCM key.
pub type Key = StackByteArray<CRYPTO_AEAD_AES256GCM_KEYBYTES>;
/// Stack-allocated 96-bit nonce.
pub type Nonce = StackByteArray<CRYPTO_AEAD_AES256GCM_NPUBBYTES>;
/// Stack-allocated authentication tag.
pub type Tag = StackByteArray<CRYPTO_AEAD_AES256GCM_ABYTES>;

const BLOCKBYTES: usize = 16;
const ZEROS: [u8; BLOCKBYTES] = [0u8; BLOCKBYTES];

/// AES-256 in counter mode with GCM's 32-bit big-endian block counter.
type Aes256Ctr = ctr::Ctr32BE<Aes256>;

fn check_lengths(message_len: u64, aad_len: u64) -> Result<(), Error> {
    if message_len > CRYPTO_AEAD_AES256GCM_MESSAGEBYTES_MAX {
        debug!(message_len, "aes256gcm message too long");
        return Err(Error::LengthOverflow {
            total: 0,
            requested: message_len,
            limit: CRYPTO_AEAD_AES256GCM_MESSAGEBYTES_MAX,
        });
    }
    if aad_len > CRYPTO_AEAD_AES256GCM_ADBYTES_MAX {
        debug!(aad_len, "aes256gcm associated data too long");
        return Err(Error::LengthOverflow {
            total: 0,
            requested: aad_len,
            limit: CRYPTO_AEAD_AES256GCM_ADBYTES_MAX,
        });
    }
    Ok(())
}

/// AES-256-GCM with a fixed key.
#[derive(Clone)]
pub struct Aes256Gcm {
    cipher: Aes256,
    hash_key: HashKey,
}

impl Aes256Gcm {
    /// Expands `key` and derives the GHASH key from it.
    pub fn new<Key: ByteArray<CRYPTO_AEAD_AES256GCM_KEYBYTES>>(key: &Key) -> Self {
        let cipher = Aes256::new(GenericArray::from_slice(key.as_slice()));

        let mut block = aes::Block::from([0u8; BLOCKBYTES]);
        cipher.encrypt_block(&mut block);
        let mut hash_key = HashKey::new();
        hash_key.copy_from_slice(&block);
        block.as_mut_slice().zeroize();

        Self { cipher, hash_key }
    }

    fn pre_counter_block<Nonce: ByteArray<CRYPTO_AEAD_AES256GCM_NPUBBYTES>>(
        nonce: &Nonce,
    ) -> [u8; BLOCKBYTES] {
        let mut j0 = [0u8; BLOCKBYTES];
        j0[..CRYPTO_AEAD_AES256GCM_NPUBBYTES].copy_from_slice(nonce.as_slice());
        j0[BLOCKBYTES - 1] = 1;
        j0
    }

    /// XORs the keystream starting at `inc32(j0)` into `data`.
    fn apply_keystream(&self, j0: &[u8; BLOCKBYTES], data: &mut [u8]) -> Result<(), Error> {
        let mut iv = aes::Block::from(*j0);
        let mut ctr = Aes256Ctr::from_core(ctr::CtrCore::inner_iv_init(self.cipher.clone(), &iv));
        iv.as_mut_slice().zeroize();

        // block J0 masks the tag, the message starts one block later
        let len = data.len();
        ctr.try_seek(BLOCKBYTES as u64)
            .and_then(|()| ctr.try_apply_keystream(data))
            .map_err(|_| chunkwise_error!(format!("aes256gcm keystream exhausted for {} bytes", len)))
    }

    fn compute_tag(
        &self,
        j0: &[u8; BLOCKBYTES],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Tag, Error> {
        let mut ghash = StreamingState::<Ghash>::create(&self.hash_key)?;
        ghash.update(aad)?;
        ghash.update(&ZEROS[..(BLOCKBYTES - aad.len() % BLOCKBYTES) % BLOCKBYTES])?;
        ghash.update(ciphertext)?;
        ghash.update(&ZEROS[..(BLOCKBYTES - ciphertext.len() % BLOCKBYTES) % BLOCKBYTES])?;

        let mut lengths = [0u8; BLOCKBYTES];
        lengths[..8].copy_from_slice(&(aad.len() as u64 * 8).to_be_bytes());
        lengths[8..].copy_from_slice(&(ciphertext.len() as u64 * 8).to_be_bytes());
        ghash.update(&lengths)?;

        let mut tag = Tag::new();
        ghash.finish(tag.as_mut_slice())?;
        ghash.free();

        let mut mask = aes::Block::from(*j0);
        self.cipher.encrypt_block(&mut mask);
        xor_buf(tag.as_mut_slice(), &mask);
        mask.as_mut_slice().zeroize();

        Ok(tag)
    }

    /// Encrypts `data` in place and returns the authentication tag over
    /// `aad` and the resulting ciphertext.
    pub fn encrypt_in_place_detached<Nonce: ByteArray<CRYPTO_AEAD_AES256GCM_NPUBBYTES>>(
        &self,
        nonce: &Nonce,
        data: &mut [u8],
        aad: &[u8],
    ) -> Result<Tag, Error> {
        check_lengths(data.len() as u64, aad.len() as u64)?;

        let mut j0 = Self::pre_counter_block(nonce);
        let tag = self
            .apply_keystream(&j0, data)
            .and_then(|()| self.compute_tag(&j0, aad, data));
        j0.zeroize();

        tag
    }

    /// Verifies `tag` over `aad` and the ciphertext in `data`, then decrypts
    /// `data` in place. On failure `data` is left untouched.
    pub fn decrypt_in_place_detached<
        Nonce: ByteArray<CRYPTO_AEAD_AES256GCM_NPUBBYTES>,
        OtherTag: ByteArray<CRYPTO_AEAD_AES256GCM_ABYTES>,
    >(
        &self,
        nonce: &Nonce,
        data: &mut [u8],
        aad: &[u8],
        tag: &OtherTag,
    ) -> Result<(), Error> {
        check_lengths(data.len() as u64, aad.len() as u64)?;

        let mut j0 = Self::pre_counter_block(nonce);
        let computed = match self.compute_tag(&j0, aad, data) {
            Ok(computed) => computed,
            Err(err) => {
                j0.zeroize();
                return Err(err);
            }
        };

        if computed.as_array().ct_eq(tag.as_array()).unwrap_u8() != 1 {
            debug!(
                ciphertext_len = data.len(),
                aad_len = aad.len(),
                "aes256gcm tag mismatch"
            );
            j0.zeroize();
            return Err(Error::AuthenticationFailure);
        }

        let decrypted = self.apply_keystream(&j0, data);
        j0.zeroize();

        decrypted
    }

    /// Encrypts `plaintext`, returning the ciphertext with the tag appended.
    pub fn encrypt<Nonce: ByteArray<CRYPTO_AEAD_AES256GCM_NPUBBYTES>>(
        &self,
        nonce: &Nonce,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let mut output = Vec::with_capacity(plaintext.len() + CRYPTO_AEAD_AES256GCM_ABYTES);
        output.extend_from_slice(plaintext);
        let tag = self.encrypt_in_place_detached(nonce, &mut output, aad)?;
        output.extend_from_slice(tag.as_slice());
        Ok(output)
    }

    /// Verifies and decrypts `ciphertext`, which carries the tag in its last
    /// [`CRYPTO_AEAD_AES256GCM_ABYTES`] bytes.
    pub fn decrypt<Nonce: ByteArray<CRYPTO_AEAD_AES256GCM_NPUBBYTES>>(
        &self,
        nonce: &Nonce,
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, Error> {
        if ciphertext.len() < CRYPTO_AEAD_AES256GCM_ABYTES {
            return Err(chunkwise_error!(format!(
                "ciphertext length {} is shorter than the {}-byte tag",
                ciphertext.len(),
                CRYPTO_AEAD_AES256GCM_ABYTES
            )));
        }

        let (body, tag) = ciphertext.split_at(ciphertext.len() - CRYPTO_AEAD_AES256GCM_ABYTES);
        let tag = Tag::try_from(tag)?;

        let mut output = body.to_vec();
        match self.decrypt_in_place_detached(nonce, &mut output, aad, &tag) {
            Ok(()) => Ok(output),
            Err(err) => {
                output.zeroize();
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for Aes256Gcm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aes256Gcm").finish_non_exhaustive()
    }
}

/// Encrypts `plaintext` under `key` and `nonce`, returning the ciphertext
/// with the tag appended.
pub fn aes256gcm_encrypt(
    key: &[u8; CRYPTO_AEAD_AES256GCM_KEYBYTES],
    nonce: &[u8; CRYPTO_AEAD_AES256GCM_NPUBBYTES],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, Error> {
    Aes256Gcm::new(key).encrypt(nonce, plaintext, aad)
}

/// Verifies and decrypts `ciphertext` (ciphertext with the tag appended).
pub fn aes256gcm_decrypt(
    key: &[u8; CRYPTO_AEAD_AES256GCM_KEYBYTES],
    nonce: &[u8; CRYPTO_AEAD_AES256GCM_NPUBBYTES],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, Error> {
    Aes256Gcm::new(key).decrypt(nonce, ciphertext, aad)
}
