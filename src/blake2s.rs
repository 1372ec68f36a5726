//! # BLAKE2s hashing
//!
//! [`Blake2s`] hashes with BLAKE2s (32-bit words, 64-byte blocks), with
//! digests of 1 to 32 bytes. It is the better fit for 32-bit and small
//! targets; pass a key to use it as a MAC.
//!
//! ```
//! use chunkwise::blake2s::{Blake2s256, Digest};
//!
//! let mut hasher = Blake2s256::new(Some(&b"my key"[..])).expect("new failed");
//! hasher.update(b"some data").expect("update failed");
//! let digest: Digest = hasher.finalize().expect("finalize failed");
//!
//! let one_shot: Digest =
//!     Blake2s256::hash(b"some data", Some(&b"my key"[..])).expect("hash failed");
//! assert_eq!(digest, one_shot);
//! ```

pub use crate::blake2::Params;
use crate::blake2::{Blake2Hasher, Blake2sCore};
pub use crate::constants::{
    BLAKE2S_BLOCKBYTES, BLAKE2S_KEYBYTES, BLAKE2S_OUTBYTES, BLAKE2S_PERSONALBYTES,
    BLAKE2S_SALTBYTES,
};
use crate::error::Error;
use crate::streaming::StreamingState;
use crate::types::*;

/// Incremental BLAKE2s hasher with an `OUTPUT_LENGTH`-byte digest.
pub type Blake2s<const OUTPUT_LENGTH: usize> = Blake2Hasher<Blake2sCore, OUTPUT_LENGTH>;
/// BLAKE2s with the full 32-byte digest.
pub type Blake2s256 = Blake2s<BLAKE2S_OUTBYTES>;

/// Stack-allocated full-length BLAKE2s digest.
pub type Digest = StackByteArray<BLAKE2S_OUTBYTES>;
/// Stack-allocated maximum-length BLAKE2s key.
pub type Key = StackByteArray<BLAKE2S_KEYBYTES>;

/// Hashes `input` into `output` with an optional `key`. The digest length is
/// the length of `output`, between 1 and [`BLAKE2S_OUTBYTES`].
pub fn hash(output: &mut [u8], input: &[u8], key: Option<&[u8]>) -> Result<(), Error> {
    let params = Params::new(output.len()).with_key(key.unwrap_or_default());
    StreamingState::<Blake2sCore>::oneshot(&params, input, output)
}

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct TestVector {
        hash: String,
        #[serde(rename = "in")]
        in_: String,
        key: String,
        out: String,
    }

    lazy_static! {
        static ref TEST_VECTORS: Vec<TestVector> =
            serde_json::from_str(include_str!("test-vectors/blake2-kat.json")).unwrap();
    }

    #[test]
    fn test_vectors() {
        let mut count = 0;
        for vector in TEST_VECTORS.iter().filter(|v| v.hash == "blake2s") {
            let key = hex::decode(&vector.key).unwrap();
            let input = hex::decode(&vector.in_).unwrap();

            let mut output = [0u8; 32];
            hash(&mut output, &input, Some(key.as_slice())).expect("hash");
            assert_eq!(vector.out, hex::encode(output));

            // block-sized pieces leave a full block buffered at the end
            let mut hasher = Blake2s256::new(Some(key.as_slice())).expect("new");
            for chunk in input.chunks(BLAKE2S_BLOCKBYTES) {
                hasher.update(chunk).expect("update");
            }
            let digest: Digest = hasher.finalize().expect("finalize");
            assert_eq!(vector.out, hex::encode(digest));
            count += 1;
        }
        assert_eq!(count, 12);
    }

    #[test]
    fn test_key_type() {
        let key = Key::gen();
        let a: Digest = Blake2s256::hash(b"data", Some(key.as_slice())).expect("hash");
        let b: Digest = Blake2s256::hash(b"data", None).expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_digest() {
        let mut output = [0u8; 16];
        hash(&mut output, b"data", None).expect("hash");
        let digest: [u8; 16] = Blake2s::<16>::hash(b"data", None).expect("hash");
        assert_eq!(output, digest);

        Blake2s::<33>::new(None).expect_err("digest too long");
    }

    #[test]
    fn test_long_input_chunked() {
        let input: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
        let expected = Blake2s256::hash_to_vec(&input, None).expect("hash");

        let mut hasher = Blake2s256::new(None).expect("new");
        for chunk in input.chunks(63) {
            hasher.update(chunk).expect("update");
        }
        assert_eq!(hasher.finalize_to_vec().expect("finalize"), expected);
    }
}
