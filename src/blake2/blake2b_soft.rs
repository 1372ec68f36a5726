use zeroize::{Zeroize, ZeroizeOnDrop};

use super::Params;
use crate::constants::{BLAKE2B_BLOCKBYTES as BLOCKBYTES, BLAKE2B_OUTBYTES as OUTBYTES};
use crate::error::Error;
use crate::streaming::{Algorithm, CompressionBackend, LaneWidth};
use crate::utils::{load_u64_le, rotr64};

const SIGMA: [[usize; 16]; 12] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

const IV: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

#[inline(always)]
fn g(v: &mut [u64; 16], m: &[u64; 16], s: &[usize; 16], i: usize, abcd: [usize; 4]) {
    let [a, b, c, d] = abcd;
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[s[2 * i]]);
    v[d] = rotr64(v[d] ^ v[a], 32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = rotr64(v[b] ^ v[c], 24);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[s[2 * i + 1]]);
    v[d] = rotr64(v[d] ^ v[a], 16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = rotr64(v[b] ^ v[c], 63);
}

/// Scalar BLAKE2b compression core.
///
/// `h` is the chaining state and `wv` the working vector the compression
/// function runs on. A keyed core holds its padded key block until the
/// first compression.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blake2bCore {
    wv: [u64; 16],
    h: [u64; 8],
    digest_len: usize,
    keyed: bool,
    pending_key: Option<[u8; BLOCKBYTES]>,
}

impl Blake2bCore {
    fn compress(&mut self, block: &[u8], counter: u128, last: bool) {
        let mut m = [0u64; 16];
        for (i, word) in m.iter_mut().enumerate() {
            *word = load_u64_le(&block[(i * 8)..(i * 8 + 8)]);
        }

        let v = &mut self.wv;
        v[..8].copy_from_slice(&self.h);
        v[8..].copy_from_slice(&IV);
        v[12] ^= counter as u64;
        v[13] ^= (counter >> 64) as u64;
        if last {
            v[14] = !v[14];
        }

        for s in SIGMA.iter() {
            g(v, &m, s, 0, [0, 4, 8, 12]);
            g(v, &m, s, 1, [1, 5, 9, 13]);
            g(v, &m, s, 2, [2, 6, 10, 14]);
            g(v, &m, s, 3, [3, 7, 11, 15]);
            g(v, &m, s, 4, [0, 5, 10, 15]);
            g(v, &m, s, 5, [1, 6, 11, 12]);
            g(v, &m, s, 6, [2, 7, 8, 13]);
            g(v, &m, s, 7, [3, 4, 9, 14]);
        }

        for i in 0..8 {
            self.h[i] ^= v[i] ^ v[i + 8];
        }
        m.zeroize();
    }

    fn counter_offset(&self) -> u128 {
        if self.keyed {
            BLOCKBYTES as u128
        } else {
            0
        }
    }
}

impl CompressionBackend for Blake2bCore {
    type Params = Params;

    const ALGORITHM: Algorithm = Algorithm::Blake2b;
    const LANE_WIDTH: LaneWidth = LaneWidth::M32;

    fn new(params: &Params) -> Result<Self, Error> {
        let param_block = params.param_block::<64>("blake2b")?;

        let mut h = IV;
        for (i, word) in h.iter_mut().enumerate() {
            *word ^= load_u64_le(&param_block[(8 * i)..(8 * i + 8)]);
        }

        let pending_key = params.key_block::<BLOCKBYTES>();

        Ok(Self {
            wv: [0u64; 16],
            h,
            digest_len: params.digest_len(),
            keyed: pending_key.is_some(),
            pending_key,
        })
    }

    fn digest_len(&self) -> usize {
        self.digest_len
    }

    fn compress_interior(&mut self, prior_len: u64, blocks: &[u8]) {
        if let Some(mut key_block) = self.pending_key.take() {
            self.compress(&key_block, BLOCKBYTES as u128, false);
            key_block.zeroize();
        }

        let base = self.counter_offset() + prior_len as u128;
        for (i, block) in blocks.chunks_exact(BLOCKBYTES).enumerate() {
            self.compress(block, base + ((i + 1) * BLOCKBYTES) as u128, false);
        }
    }

    fn compress_final(&mut self, prior_len: u64, last: &[u8]) {
        if let Some(mut key_block) = self.pending_key.take() {
            // the key block alone is the message when nothing else was absorbed
            let is_last = last.is_empty();
            self.compress(&key_block, BLOCKBYTES as u128, is_last);
            key_block.zeroize();
            if is_last {
                return;
            }
        }

        let mut block = [0u8; BLOCKBYTES];
        block[..last.len()].copy_from_slice(last);
        let counter = self.counter_offset() + prior_len as u128 + last.len() as u128;
        self.compress(&block, counter, true);
        block.zeroize();
    }

    fn extract(&self, output: &mut [u8]) {
        let mut buffer = [0u8; OUTBYTES];
        for (chunk, word) in buffer.chunks_exact_mut(8).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        output.copy_from_slice(&buffer[..output.len()]);
        buffer.zeroize();
    }
}
