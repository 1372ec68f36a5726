//! # chunkwise: chunk-invariant streaming for block-based MACs and hashes
//!
//! A pure-Rust streaming engine for block-oriented algorithms. Callers feed a
//! message in arbitrarily sized pieces and get exactly the same result as
//! processing it in one call, whatever the chunk boundaries were.
//!
//! The engine lives in [streaming]: a [`StreamingState`](streaming::StreamingState)
//! owns a block buffer sized for the algorithm and the configured lane
//! width, and drives a pluggable
//! [`CompressionBackend`](streaming::CompressionBackend). On top of it the
//! crate provides:
//!
//! * [blake2s] and [blake2b]: plain and keyed BLAKE2 hashing with salt and
//!   personalization
//! * [onetimeauth]: the Poly1305 one-time authenticator
//! * [aes256gcm]: AES-256-GCM authenticated encryption, whose GHASH is a
//!   streaming backend too
//!
//! Every state zeroizes its buffer and chaining value when dropped.
//!
//! ```
//! use chunkwise::blake2b::Blake2b;
//!
//! let mut hasher = Blake2b::<32>::new(None)?;
//! hasher.update(b"chunk")?;
//! hasher.update(b"wise")?;
//! let streamed = hasher.finalize_to_vec()?;
//!
//! assert_eq!(streamed, Blake2b::<32>::hash_to_vec(b"chunkwise", None)?);
//! # Ok::<(), chunkwise::error::Error>(())
//! ```
//!
//! # Security notes
//!
//! This crate has NOT been audited. The backends are portable scalar code
//! written to avoid secret-dependent branches and table lookups.

#![warn(missing_docs)]
#![cfg_attr(feature = "nightly", feature(test))]

#[macro_use]
pub mod error;
mod utils;

#[cfg(feature = "serde")]
mod bytes_serde;

pub mod aes256gcm;
pub mod blake2;
pub mod blake2b;
pub mod blake2s;
/// Constant value definitions
#[allow(missing_docs)]
pub mod constants;
pub mod onetimeauth;
pub mod poly1305;
pub mod prelude;
/// Random number generation
pub mod rng;
pub mod streaming;
pub mod types;
