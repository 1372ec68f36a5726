//! # Byte array types and traits
//!
//! Keys, nonces, digests and tags are passed around as fixed-length byte
//! arrays. [`StackByteArray`] is the owned, zeroize-on-drop container used
//! throughout the crate; the [`Bytes`], [`MutBytes`], [`ByteArray`] and
//! [`NewByteArray`] traits let the public APIs also accept plain arrays,
//! slices and vectors.

use std::convert::TryFrom;
use std::ops::{Deref, DerefMut};

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Error;
use crate::rng::copy_randombytes;

/// Borrowed view of a byte sequence.
pub trait Bytes {
    /// Returns the bytes as a slice.
    fn as_slice(&self) -> &[u8];

    /// Returns the number of bytes.
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if there are no bytes.
    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Mutable view of a byte sequence.
pub trait MutBytes: Bytes {
    /// Returns the bytes as a mutable slice.
    fn as_mut_slice(&mut self) -> &mut [u8];
}

/// A byte sequence of exactly `LENGTH` bytes.
pub trait ByteArray<const LENGTH: usize>: Bytes {
    /// Returns a reference to the underlying array.
    fn as_array(&self) -> &[u8; LENGTH];
}

/// A byte sequence of `LENGTH` bytes which can be created from nothing.
pub trait NewByteArray<const LENGTH: usize>: MutBytes {
    /// Returns a new, zero-filled value.
    fn new_byte_array() -> Self;

    /// Returns a new value filled from the OS's random number generator.
    fn gen() -> Self
    where
        Self: Sized,
    {
        let mut res = Self::new_byte_array();
        copy_randombytes(res.as_mut_slice());
        res
    }
}

/// Fixed-length byte array, stored inline. Zeroized on drop; equality
/// comparison runs in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct StackByteArray<const LENGTH: usize>([u8; LENGTH]);

impl<const LENGTH: usize> StackByteArray<LENGTH> {
    /// Returns a new, zero-filled array.
    pub fn new() -> Self {
        Self([0u8; LENGTH])
    }

    /// Returns a new array filled with random bytes.
    pub fn gen() -> Self {
        let mut res = Self::new();
        copy_randombytes(&mut res.0);
        res
    }
}

impl<const LENGTH: usize> std::fmt::Debug for StackByteArray<LENGTH> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StackByteArray").field(&self.0.as_slice()).finish()
    }
}

impl<const LENGTH: usize> Default for StackByteArray<LENGTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LENGTH: usize> PartialEq for StackByteArray<LENGTH> {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).unwrap_u8() == 1
    }
}

impl<const LENGTH: usize> Eq for StackByteArray<LENGTH> {}

impl<const LENGTH: usize> Deref for StackByteArray<LENGTH> {
    type Target = [u8; LENGTH];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const LENGTH: usize> DerefMut for StackByteArray<LENGTH> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const LENGTH: usize> AsRef<[u8]> for StackByteArray<LENGTH> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const LENGTH: usize> AsMut<[u8]> for StackByteArray<LENGTH> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const LENGTH: usize> From<&[u8; LENGTH]> for StackByteArray<LENGTH> {
    fn from(src: &[u8; LENGTH]) -> Self {
        Self(*src)
    }
}

impl<const LENGTH: usize> From<[u8; LENGTH]> for StackByteArray<LENGTH> {
    fn from(src: [u8; LENGTH]) -> Self {
        Self(src)
    }
}

impl<const LENGTH: usize> TryFrom<&[u8]> for StackByteArray<LENGTH> {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        if src.len() != LENGTH {
            Err(chunkwise_error!(format!(
                "Invalid size: expected {} found {}",
                LENGTH,
                src.len()
            )))
        } else {
            let mut arr = Self::new();
            arr.0.copy_from_slice(src);
            Ok(arr)
        }
    }
}

impl<const LENGTH: usize> Bytes for StackByteArray<LENGTH> {
    fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl<const LENGTH: usize> MutBytes for StackByteArray<LENGTH> {
    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const LENGTH: usize> ByteArray<LENGTH> for StackByteArray<LENGTH> {
    fn as_array(&self) -> &[u8; LENGTH] {
        &self.0
    }
}

impl<const LENGTH: usize> NewByteArray<LENGTH> for StackByteArray<LENGTH> {
    fn new_byte_array() -> Self {
        Self::new()
    }
}

impl<const LENGTH: usize> Bytes for [u8; LENGTH] {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl<const LENGTH: usize> MutBytes for [u8; LENGTH] {
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl<const LENGTH: usize> ByteArray<LENGTH> for [u8; LENGTH] {
    fn as_array(&self) -> &[u8; LENGTH] {
        self
    }
}

impl<const LENGTH: usize> NewByteArray<LENGTH> for [u8; LENGTH] {
    fn new_byte_array() -> Self {
        [0u8; LENGTH]
    }
}

impl Bytes for [u8] {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl MutBytes for [u8] {
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl Bytes for Vec<u8> {
    fn as_slice(&self) -> &[u8] {
        self.as_ref()
    }
}

impl MutBytes for Vec<u8> {
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self.as_mut()
    }
}

impl<const LENGTH: usize> NewByteArray<LENGTH> for Vec<u8> {
    fn new_byte_array() -> Self {
        vec![0u8; LENGTH]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from() {
        let arr = StackByteArray::<4>::try_from(&[1u8, 2, 3, 4][..]).expect("try_from");
        assert_eq!(arr.as_slice(), &[1, 2, 3, 4]);

        StackByteArray::<4>::try_from(&[1u8, 2, 3][..]).expect_err("should fail");
    }

    #[test]
    fn test_eq() {
        let a = StackByteArray::from([7u8; 16]);
        let mut b = a.clone();
        assert_eq!(a, b);
        b[15] ^= 1;
        assert_ne!(a, b);
    }

    #[test]
    fn test_gen() {
        let a = StackByteArray::<32>::gen();
        let b = StackByteArray::<32>::gen();
        assert_ne!(a, b);

        let v: Vec<u8> = <Vec<u8> as NewByteArray<24>>::gen();
        assert_eq!(v.len(), 24);
    }
}
