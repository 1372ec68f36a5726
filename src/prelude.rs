//! # The chunkwise prelude
//!
//! Re-exports the most commonly used types and traits of this crate.
//!
//! ```
//! use chunkwise::prelude::*;
//!
//! let digest: Blake2s256Digest = Blake2s256::hash(b"data", None)?;
//! assert_eq!(digest.len(), 32);
//! # Ok::<(), Error>(())
//! ```

pub use crate::aes256gcm::Aes256Gcm;
pub use crate::blake2::Params;
pub use crate::blake2b::{Blake2b, Blake2b256, Blake2b512};
pub use crate::blake2s::{Blake2s, Blake2s256, Digest as Blake2s256Digest};
pub use crate::error::Error;
pub use crate::onetimeauth::OnetimeAuth;
pub use crate::streaming::{Algorithm, CompressionBackend, LaneWidth, StreamingState};
pub use crate::types::*;
