//! # Streaming block engine
//!
//! [`StreamingState`] turns a fixed-block compression function into an
//! incremental hash or MAC: input arrives through any number of
//! [`StreamingState::update`] calls of arbitrary length, full blocks are
//! compressed as soon as it is known that more input follows them, and the
//! remainder waits in a one-block buffer until [`StreamingState::finish`]
//! runs the algorithm's final-block treatment on it.
//!
//! The algorithm itself is supplied by a [`CompressionBackend`]. BLAKE2s,
//! BLAKE2b, Poly1305 and GHASH backends are provided by this crate.
//!
//! The digest never depends on how the input was split between `update`
//! calls.
//!
//! # Example
//!
//! ```
//! use chunkwise::blake2::{Blake2bCore, Params};
//! use chunkwise::streaming::StreamingState;
//!
//! let params = Params::new(64);
//!
//! let mut state = StreamingState::<Blake2bCore>::create(&params).expect("create failed");
//! state.update(b"hello ").expect("update failed");
//! state.update(b"world").expect("update failed");
//!
//! let mut digest = [0u8; 64];
//! state.finish(&mut digest).expect("finish failed");
//! state.free();
//!
//! let mut expected = [0u8; 64];
//! StreamingState::<Blake2bCore>::oneshot(&params, b"hello world", &mut expected)
//!     .expect("hash failed");
//!
//! assert_eq!(digest, expected);
//! ```

mod policy;

pub use policy::{block_size, Algorithm, LaneWidth};
use tracing::{debug, error, trace};
use zeroize::Zeroize;

use crate::error::Error;

/// A compression function together with its chaining state.
///
/// The engine guarantees that `compress_interior` always receives a
/// non-empty whole number of [`BLOCK_LEN`](Self::BLOCK_LEN) blocks which are
/// followed by more input, and that `compress_final` receives the last
/// `0..=BLOCK_LEN` bytes of the message. A zero-length final block only
/// occurs for an empty message. `prior_len` is the number of message bytes
/// absorbed before the bytes being passed in.
pub trait CompressionBackend: Clone + Zeroize {
    /// Algorithm implemented by this backend.
    const ALGORITHM: Algorithm;
    /// Vector width this backend is written for.
    const LANE_WIDTH: LaneWidth;
    /// Bytes consumed per compression block.
    const BLOCK_LEN: usize = Self::ALGORITHM.compression_block_len();
    /// Longest message, in bytes, the algorithm accepts.
    const MAX_INPUT_LEN: u64 = u64::MAX;

    /// Key material and options needed to initialize the chaining state.
    type Params;

    /// Returns a freshly initialized chaining state.
    fn new(params: &Self::Params) -> Result<Self, Error>;

    /// Length of the digest or tag produced by [`extract`](Self::extract).
    fn digest_len(&self) -> usize;

    /// Absorbs one or more full blocks known not to be the last.
    fn compress_interior(&mut self, prior_len: u64, blocks: &[u8]);

    /// Absorbs the last block, applying padding and length encoding.
    fn compress_final(&mut self, prior_len: u64, last: &[u8]);

    /// Writes the digest into `output`, which is exactly
    /// [`digest_len`](Self::digest_len) bytes long.
    fn extract(&self, output: &mut [u8]);
}

/// Number of bytes held in a buffer of `block_len` bytes after `total_len`
/// bytes of input. A positive exact multiple of `block_len` leaves a full
/// block in the buffer rather than an empty one.
#[inline]
fn residual_len(total_len: u64, block_len: usize) -> usize {
    let block_len = block_len as u64;
    if total_len > 0 && total_len % block_len == 0 {
        block_len as usize
    } else {
        (total_len % block_len) as usize
    }
}

/// Incremental state for any [`CompressionBackend`].
#[derive(Clone)]
pub struct StreamingState<B: CompressionBackend> {
    block_state: B,
    buf: Vec<u8>,
    total_len: u64,
}

impl<B: CompressionBackend> StreamingState<B> {
    /// Length of the internal buffer, as given by [`block_size`].
    pub fn buffer_len() -> usize {
        block_size(B::ALGORITHM, B::LANE_WIDTH)
    }

    /// Allocates and initializes a new state from `params`.
    pub fn create(params: &B::Params) -> Result<Self, Error> {
        let buf_len = Self::buffer_len();
        debug_assert_eq!(buf_len % B::BLOCK_LEN, 0);

        let mut buf = Vec::new();
        if buf.try_reserve_exact(buf_len).is_err() {
            error!(
                algorithm = B::ALGORITHM.name(),
                bytes = buf_len,
                "block buffer allocation failed"
            );
            return Err(Error::AllocationFailure(buf_len));
        }
        buf.resize(buf_len, 0);

        let block_state = B::new(params)?;

        trace!(
            algorithm = B::ALGORITHM.name(),
            buffer_len = buf_len,
            "created streaming state"
        );

        Ok(Self {
            block_state,
            buf,
            total_len: 0,
        })
    }

    /// Resets the state in place as if it had just been created with
    /// `params`. The buffer is reused.
    pub fn init(&mut self, params: &B::Params) -> Result<(), Error> {
        let fresh = B::new(params)?;
        self.block_state.zeroize();
        self.block_state = fresh;
        self.buf.fill(0);
        self.total_len = 0;

        trace!(algorithm = B::ALGORITHM.name(), "reinitialized streaming state");

        Ok(())
    }

    /// Absorbs `data`.
    ///
    /// Fails with [`Error::LengthOverflow`] if the total input would exceed
    /// the algorithm's limit, in which case the state is left unchanged.
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        let buf_len = self.buf.len();
        let total_len = self.total_len;
        let requested = data.len() as u64;

        let new_total = match total_len.checked_add(requested) {
            Some(new_total) if new_total <= B::MAX_INPUT_LEN => new_total,
            _ => {
                debug!(
                    algorithm = B::ALGORITHM.name(),
                    total_len, requested, "input length limit exceeded"
                );
                return Err(Error::LengthOverflow {
                    total: total_len,
                    requested,
                    limit: B::MAX_INPUT_LEN,
                });
            }
        };

        let sz = residual_len(total_len, buf_len);

        if data.len() <= buf_len - sz {
            // fits in the buffer, nothing to compress yet
            self.buf[sz..sz + data.len()].copy_from_slice(data);
            self.total_len = new_total;
            return Ok(());
        }

        let mut data = data;
        if sz > 0 {
            // complete the buffered chunk; more input follows, so it is interior
            let (head, rest) = data.split_at(buf_len - sz);
            self.buf[sz..].copy_from_slice(head);
            self.block_state
                .compress_interior(total_len - sz as u64, &self.buf);
            data = rest;
        }

        // data is non-empty here, keep its last chunk back for finish
        let tail_len = residual_len(data.len() as u64, buf_len);
        let (blocks, tail) = data.split_at(data.len() - tail_len);
        if !blocks.is_empty() {
            self.block_state
                .compress_interior(new_total - data.len() as u64, blocks);
        }
        self.buf[..tail_len].copy_from_slice(tail);
        self.total_len = new_total;

        Ok(())
    }

    /// Computes the digest of everything absorbed so far and copies it into
    /// `output`, which must be exactly [`digest_len`](Self::digest_len) bytes.
    ///
    /// The state is not modified: `finish` can be called repeatedly, and
    /// further [`update`](Self::update) calls continue the same message.
    pub fn finish(&self, output: &mut [u8]) -> Result<(), Error> {
        let digest_len = self.block_state.digest_len();
        if output.len() != digest_len {
            return Err(chunkwise_error!(format!(
                "invalid output length {}, expected {}",
                output.len(),
                digest_len
            )));
        }

        let r = residual_len(self.total_len, self.buf.len());
        let last_len = residual_len(r as u64, B::BLOCK_LEN);
        let (multi, last) = self.buf[..r].split_at(r - last_len);

        let mut tmp = self.block_state.clone();
        if !multi.is_empty() {
            tmp.compress_interior(self.total_len - r as u64, multi);
        }
        tmp.compress_final(self.total_len - last_len as u64, last);
        tmp.extract(output);
        tmp.zeroize();

        Ok(())
    }

    /// Convenience wrapper around [`finish`](Self::finish), returning the
    /// digest as a [`Vec`].
    pub fn finish_to_vec(&self) -> Result<Vec<u8>, Error> {
        let mut output = vec![0u8; self.digest_len()];
        self.finish(&mut output)?;
        Ok(output)
    }

    /// Wipes and releases the state. Equivalent to dropping it.
    pub fn free(self) {
        drop(self)
    }

    /// Bytes absorbed since the state was created or last reinitialized.
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Length of the digest [`finish`](Self::finish) produces.
    pub fn digest_len(&self) -> usize {
        self.block_state.digest_len()
    }

    /// The buffered input suffix which has not been compressed yet.
    pub fn buffered(&self) -> &[u8] {
        &self.buf[..residual_len(self.total_len, self.buf.len())]
    }

    /// One-shot interface: creates a state, absorbs `input`, writes the
    /// digest to `output` and frees the state.
    pub fn oneshot(params: &B::Params, input: &[u8], output: &mut [u8]) -> Result<(), Error> {
        let mut state = Self::create(params)?;
        state.update(input)?;
        state.finish(output)?;
        state.free();
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn block_state(&self) -> &B {
        &self.block_state
    }
}

impl<B: CompressionBackend> std::fmt::Debug for StreamingState<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingState")
            .field("algorithm", &B::ALGORITHM)
            .field("lane_width", &B::LANE_WIDTH)
            .field("total_len", &self.total_len)
            .field("buffer_len", &self.buf.len())
            .finish()
    }
}

impl<B: CompressionBackend> Drop for StreamingState<B> {
    fn drop(&mut self) {
        self.block_state.zeroize();
        self.buf.zeroize();
        self.total_len = 0;
    }
}
