//! GHASH, the universal hash GCM authenticates with, as a streaming backend.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::GHASH_BLOCKBYTES as BLOCKBYTES;
use crate::error::Error;
use crate::streaming::{Algorithm, CompressionBackend, LaneWidth};
use crate::types::StackByteArray;

/// The GHASH key `H`, the block cipher applied to the all-zero block.
pub type HashKey = StackByteArray<BLOCKBYTES>;

/// Multiplies `x` by `y` in GF(2^128) with GCM's bit order and reduction
/// polynomial. Runs in constant time.
fn gf_mul(x: u128, y: u128) -> u128 {
    const R: u128 = 0xe1 << 120;

    let mut z = 0u128;
    let mut v = y;
    for i in 0..128 {
        let bit = (x >> (127 - i)) & 1;
        z ^= v & bit.wrapping_neg();
        let lsb = v & 1;
        v = (v >> 1) ^ (R & lsb.wrapping_neg());
    }
    z
}

/// GHASH accumulator.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Ghash {
    h: u128,
    y: u128,
}

impl Ghash {
    fn absorb(&mut self, block: &[u8]) {
        let mut bytes = [0u8; BLOCKBYTES];
        bytes.copy_from_slice(block);
        self.y = gf_mul(self.y ^ u128::from_be_bytes(bytes), self.h);
        bytes.zeroize();
    }
}

impl CompressionBackend for Ghash {
    type Params = HashKey;

    const ALGORITHM: Algorithm = Algorithm::Ghash;
    const LANE_WIDTH: LaneWidth = LaneWidth::M32;

    fn new(hash_key: &HashKey) -> Result<Self, Error> {
        Ok(Self {
            h: u128::from_be_bytes(**hash_key),
            y: 0,
        })
    }

    fn digest_len(&self) -> usize {
        BLOCKBYTES
    }

    fn compress_interior(&mut self, _prior_len: u64, blocks: &[u8]) {
        for block in blocks.chunks_exact(BLOCKBYTES) {
            self.absorb(block);
        }
    }

    fn compress_final(&mut self, _prior_len: u64, last: &[u8]) {
        if last.is_empty() {
            return;
        }
        let mut block = [0u8; BLOCKBYTES];
        block[..last.len()].copy_from_slice(last);
        self.absorb(&block);
        block.zeroize();
    }

    fn extract(&self, output: &mut [u8]) {
        output.copy_from_slice(&self.y.to_be_bytes());
    }
}
