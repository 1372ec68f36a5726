//! # BLAKE2b hashing
//!
//! [`Blake2b`] hashes with BLAKE2b (64-bit words, 128-byte blocks), with
//! digests of 1 to 64 bytes. Passing a key turns it into a MAC.
//!
//! # One-time interface
//!
//! ```
//! use base64::engine::general_purpose;
//! use base64::Engine as _;
//! use chunkwise::blake2b::Blake2b;
//!
//! let hash = Blake2b::<32>::hash_to_vec(b"hello", None).expect("hash failed");
//!
//! assert_eq!(
//!     general_purpose::STANDARD.encode(&hash),
//!     "Mk3PAn3UowqTLEQfNlol6GsXPe+kuOWJSCU0cbgbcs8="
//! );
//! ```
//!
//! # Incremental interface
//!
//! ```
//! use base64::engine::general_purpose;
//! use base64::Engine as _;
//! use chunkwise::blake2b::Blake2b;
//!
//! let mut hasher = Blake2b::<32>::new(None).expect("new failed");
//! hasher.update(b"hel").expect("update failed");
//! hasher.update(b"lo").expect("update failed");
//! let hash = hasher.finalize_to_vec().expect("finalize failed");
//!
//! assert_eq!(
//!     general_purpose::STANDARD.encode(&hash),
//!     "Mk3PAn3UowqTLEQfNlol6GsXPe+kuOWJSCU0cbgbcs8="
//! );
//! ```

pub use crate::blake2::Params;
use crate::blake2::{Blake2Hasher, Blake2bCore};
pub use crate::constants::{
    BLAKE2B_BLOCKBYTES, BLAKE2B_KEYBYTES, BLAKE2B_OUTBYTES, BLAKE2B_PERSONALBYTES,
    BLAKE2B_SALTBYTES,
};
use crate::error::Error;
use crate::streaming::StreamingState;
use crate::types::*;

/// Incremental BLAKE2b hasher with an `OUTPUT_LENGTH`-byte digest.
pub type Blake2b<const OUTPUT_LENGTH: usize> = Blake2Hasher<Blake2bCore, OUTPUT_LENGTH>;
/// BLAKE2b with the full 64-byte digest.
pub type Blake2b512 = Blake2b<BLAKE2B_OUTBYTES>;
/// BLAKE2b with a 32-byte digest.
pub type Blake2b256 = Blake2b<32>;

/// Stack-allocated full-length BLAKE2b digest.
pub type Digest = StackByteArray<BLAKE2B_OUTBYTES>;
/// Stack-allocated maximum-length BLAKE2b key.
pub type Key = StackByteArray<BLAKE2B_KEYBYTES>;

/// Hashes `input` into `output` with an optional `key`. The digest length is
/// the length of `output`, between 1 and [`BLAKE2B_OUTBYTES`].
pub fn hash(output: &mut [u8], input: &[u8], key: Option<&[u8]>) -> Result<(), Error> {
    let params = Params::new(output.len()).with_key(key.unwrap_or_default());
    StreamingState::<Blake2bCore>::oneshot(&params, input, output)
}
