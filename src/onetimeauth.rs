//! # One-time authentication
//!
//! [`OnetimeAuth`] implements one-time authentication based on the Poly1305
//! message authentication code, driven by the streaming engine.
//!
//! Use [`OnetimeAuth`] to authenticate messages when:
//!
//! * you want to exchange many small messages, such as in an online protocol
//! * you can generate a unique key for each message you're authenticating,
//!   i.e., using a key and a nonce
//!
//! Do not reuse the same key for different messages with [`OnetimeAuth`], as
//! it provides an opportunity for an attacker to discover the key.
//!
//! # One-shot example
//!
//! ```
//! use chunkwise::onetimeauth::*;
//!
//! // Generate a random key
//! let key = Key::gen();
//!
//! // Compute the mac in one shot. Here we clone the key for the purpose of this
//! // example, but normally you would not do this as you never want to re-use a
//! // key.
//! let mac = OnetimeAuth::compute_to_vec(key.clone(), b"Data to authenticate").expect("mac failed");
//!
//! // Verify the mac
//! OnetimeAuth::compute_and_verify(&mac, key, b"Data to authenticate").expect("verify failed");
//! ```
//!
//! # Incremental example
//!
//! ```
//! use chunkwise::onetimeauth::*;
//!
//! let key = Key::gen();
//!
//! let mut mac = OnetimeAuth::new(key.clone())?;
//! mac.update(b"Multi-part")?;
//! mac.update(b"data")?;
//! let mac = mac.finalize_to_vec()?;
//!
//! let mut verify_mac = OnetimeAuth::new(key.clone())?;
//! verify_mac.update(b"Multi-part")?;
//! verify_mac.update(b"data")?;
//! verify_mac.verify(&mac)?;
//!
//! // Check that invalid data fails, consume the key
//! let mut verify_mac = OnetimeAuth::new(key)?;
//! verify_mac.update(b"Multi-part")?;
//! verify_mac.update(b"bad data")?;
//! verify_mac
//!     .verify(&mac)
//!     .expect_err("verify should have failed");
//! # Ok::<(), chunkwise::error::Error>(())
//! ```

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::constants::{CRYPTO_ONETIMEAUTH_BYTES, CRYPTO_ONETIMEAUTH_KEYBYTES};
use crate::error::Error;
use crate::poly1305::Poly1305Core;
use crate::streaming::StreamingState;
use crate::types::*;

/// Stack-allocated key for one-time authentication.
pub type Key = StackByteArray<CRYPTO_ONETIMEAUTH_KEYBYTES>;
/// Stack-allocated message authentication code for one-time authentication.
pub type Mac = StackByteArray<CRYPTO_ONETIMEAUTH_BYTES>;

/// Computes the Poly1305 authenticator of `input` under `key` into `mac`.
pub fn crypto_onetimeauth(
    mac: &mut [u8; CRYPTO_ONETIMEAUTH_BYTES],
    input: &[u8],
    key: &[u8; CRYPTO_ONETIMEAUTH_KEYBYTES],
) -> Result<(), Error> {
    StreamingState::<Poly1305Core>::oneshot(&Key::from(key), input, mac)
}

/// Verifies in constant time that `mac` authenticates `input` under `key`.
pub fn crypto_onetimeauth_verify(
    mac: &[u8; CRYPTO_ONETIMEAUTH_BYTES],
    input: &[u8],
    key: &[u8; CRYPTO_ONETIMEAUTH_KEYBYTES],
) -> Result<(), Error> {
    let mut computed = Mac::new();
    crypto_onetimeauth(&mut computed, input, key)?;
    verify_mac(mac, &computed)
}

fn verify_mac(
    expected: &[u8; CRYPTO_ONETIMEAUTH_BYTES],
    computed: &[u8; CRYPTO_ONETIMEAUTH_BYTES],
) -> Result<(), Error> {
    if expected.ct_eq(computed).unwrap_u8() == 1 {
        Ok(())
    } else {
        debug!("poly1305 authenticator mismatch");
        Err(Error::AuthenticationFailure)
    }
}

/// Poly1305 one-time authenticator.
pub struct OnetimeAuth {
    state: StreamingState<Poly1305Core>,
}

impl OnetimeAuth {
    /// Single-part interface for [`OnetimeAuth`]. Computes (and returns) the
    /// message authentication code for `input` using `key`. The `key` is
    /// consumed to prevent accidental re-use of the same key.
    pub fn compute<
        Key: ByteArray<CRYPTO_ONETIMEAUTH_KEYBYTES>,
        Input: Bytes + ?Sized,
        Output: NewByteArray<CRYPTO_ONETIMEAUTH_BYTES>,
    >(
        key: Key,
        input: &Input,
    ) -> Result<Output, Error> {
        let mut mac = Self::new(key)?;
        mac.update(input)?;
        mac.finalize()
    }

    /// Convenience wrapper around [`OnetimeAuth::compute`]. Returns the
    /// message authentication code as a [`Vec`].
    pub fn compute_to_vec<Key: ByteArray<CRYPTO_ONETIMEAUTH_KEYBYTES>, Input: Bytes + ?Sized>(
        key: Key,
        input: &Input,
    ) -> Result<Vec<u8>, Error> {
        Self::compute::<Key, Input, Vec<u8>>(key, input)
    }

    /// Verifies the message authentication code `other_mac` matches the
    /// expected code for `key` and `input`. The `key` is consumed to prevent
    /// accidental re-use of the same key.
    pub fn compute_and_verify<
        OtherMac: Bytes + ?Sized,
        Key: ByteArray<CRYPTO_ONETIMEAUTH_KEYBYTES>,
        Input: Bytes + ?Sized,
    >(
        other_mac: &OtherMac,
        key: Key,
        input: &Input,
    ) -> Result<(), Error> {
        let mut mac = Self::new(key)?;
        mac.update(input)?;
        mac.verify(other_mac)
    }

    /// Returns a new one-time authenticator for `key`. The `key` is
    /// consumed to prevent accidental re-use of the same key.
    pub fn new<Key: ByteArray<CRYPTO_ONETIMEAUTH_KEYBYTES>>(key: Key) -> Result<Self, Error> {
        let key = crate::poly1305::Key::from(key.as_array());
        Ok(Self {
            state: StreamingState::create(&key)?,
        })
    }

    /// Updates the one-time authenticator at `self` with `input`.
    pub fn update<Input: Bytes + ?Sized>(&mut self, input: &Input) -> Result<(), Error> {
        self.state.update(input.as_slice())
    }

    /// Finalizes this one-time authenticator, returning the message
    /// authentication code.
    pub fn finalize<Output: NewByteArray<CRYPTO_ONETIMEAUTH_BYTES>>(self) -> Result<Output, Error> {
        let mut output = Output::new_byte_array();
        self.state.finish(output.as_mut_slice())?;
        Ok(output)
    }

    /// Finalizes this one-time authenticator, returning the message
    /// authentication code as a [`Vec`]. Convenience wrapper around
    /// [`OnetimeAuth::finalize`].
    pub fn finalize_to_vec(self) -> Result<Vec<u8>, Error> {
        self.finalize()
    }

    /// Finalizes this authenticator, and verifies that the computed code
    /// matches `other_mac` using a constant-time comparison.
    pub fn verify<OtherMac: Bytes + ?Sized>(self, other_mac: &OtherMac) -> Result<(), Error> {
        let computed: Mac = self.finalize()?;

        match <&[u8; CRYPTO_ONETIMEAUTH_BYTES]>::try_from(other_mac.as_slice()) {
            Ok(other) => verify_mac(other, &computed),
            Err(_) => {
                debug!(
                    len = other_mac.as_slice().len(),
                    "poly1305 authenticator has wrong length"
                );
                Err(Error::AuthenticationFailure)
            }
        }
    }
}
