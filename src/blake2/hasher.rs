use super::Params;
use crate::error::Error;
use crate::streaming::{CompressionBackend, StreamingState};
use crate::types::*;

/// Incremental BLAKE2 hasher producing `OUTPUT_LENGTH`-byte digests. Use it
/// through the [`Blake2s`](crate::blake2s::Blake2s) and
/// [`Blake2b`](crate::blake2b::Blake2b) aliases.
pub struct Blake2Hasher<B: CompressionBackend, const OUTPUT_LENGTH: usize> {
    state: StreamingState<B>,
}

impl<B, const OUTPUT_LENGTH: usize> Blake2Hasher<B, OUTPUT_LENGTH>
where
    B: CompressionBackend<Params = Params>,
{
    /// Returns a new hasher, keyed with `key` if one is given.
    pub fn new(key: Option<&[u8]>) -> Result<Self, Error> {
        Self::new_with_params(&Params::new(OUTPUT_LENGTH).with_key(key.unwrap_or_default()))
    }

    /// Returns a new hasher from full BLAKE2 parameters. The parameters'
    /// digest length must be `OUTPUT_LENGTH`.
    pub fn new_with_params(params: &Params) -> Result<Self, Error> {
        if params.digest_len() != OUTPUT_LENGTH {
            return Err(chunkwise_error!(format!(
                "digest length {} does not match output length {}",
                params.digest_len(),
                OUTPUT_LENGTH
            )));
        }
        Ok(Self {
            state: StreamingState::create(params)?,
        })
    }

    /// Updates the hasher state from `input`.
    pub fn update<Input: Bytes + ?Sized>(&mut self, input: &Input) -> Result<(), Error> {
        self.state.update(input.as_slice())
    }

    /// Computes and returns the hash of everything absorbed so far. The
    /// hasher can keep absorbing input afterwards.
    pub fn finalize<Output: NewByteArray<OUTPUT_LENGTH>>(&self) -> Result<Output, Error> {
        let mut output = Output::new_byte_array();
        self.state.finish(output.as_mut_slice())?;
        Ok(output)
    }

    /// Computes and returns the hash as a [`Vec`]. Provided for convenience.
    pub fn finalize_to_vec(&self) -> Result<Vec<u8>, Error> {
        self.finalize()
    }

    /// Number of input bytes absorbed so far.
    pub fn bytes_absorbed(&self) -> u64 {
        self.state.total_len()
    }

    /// One-time interface. Computes the hash of `input` with an optional
    /// `key`.
    pub fn hash<Input: Bytes + ?Sized, Output: NewByteArray<OUTPUT_LENGTH>>(
        input: &Input,
        key: Option<&[u8]>,
    ) -> Result<Output, Error> {
        let mut hasher = Self::new(key)?;
        hasher.update(input)?;
        hasher.finalize()
    }

    /// Convenience wrapper for [`Blake2Hasher::hash`].
    pub fn hash_to_vec<Input: Bytes + ?Sized>(
        input: &Input,
        key: Option<&[u8]>,
    ) -> Result<Vec<u8>, Error> {
        Self::hash(input, key)
    }
}

impl<B: CompressionBackend, const OUTPUT_LENGTH: usize> Clone for Blake2Hasher<B, OUTPUT_LENGTH> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<B: CompressionBackend, const OUTPUT_LENGTH: usize> std::fmt::Debug
    for Blake2Hasher<B, OUTPUT_LENGTH>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blake2Hasher")
            .field("output_length", &OUTPUT_LENGTH)
            .field("state", &self.state)
            .finish()
    }
}
