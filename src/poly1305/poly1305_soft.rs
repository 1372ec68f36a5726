use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{
    CRYPTO_ONETIMEAUTH_POLY1305_BYTES as MACBYTES, CRYPTO_ONETIMEAUTH_POLY1305_KEYBYTES as KEYBYTES,
};
use crate::error::Error;
use crate::streaming::{Algorithm, CompressionBackend, LaneWidth};
use crate::types::*;
use crate::utils::load_u64_le;

const BLOCK_SIZE: usize = 16;

/// Poly1305 one-time key: `r` in the first half, `s` in the second.
pub type Key = StackByteArray<KEYBYTES>;

#[inline]
fn mul(x: u64, y: u64) -> u128 {
    u128::from(x) * u128::from(y)
}

#[inline]
fn shr(in_: u128, shift: u64) -> u64 {
    (in_ >> shift) as u64
}

#[inline]
fn lo(in_: u128) -> u64 {
    in_ as u64
}

/// Poly1305 accumulator in 44/44/42-bit limbs.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Poly1305Core {
    r: [u64; 3],
    h: [u64; 3],
    pad: [u64; 2],
}

impl Poly1305Core {
    fn blocks(&mut self, input: &[u8], partial: bool) {
        let hibit = if partial {
            0u64
        } else {
            // 1 << 128
            1u64 << 40
        };

        let r0 = self.r[0];
        let r1 = self.r[1];
        let r2 = self.r[2];

        let mut h0 = self.h[0];
        let mut h1 = self.h[1];
        let mut h2 = self.h[2];

        let s1 = r1 * (5 << 2);
        let s2 = r2 * (5 << 2);

        for m in input.chunks_exact(BLOCK_SIZE) {
            // h += m[i]
            let t0 = load_u64_le(&m[0..8]);
            let t1 = load_u64_le(&m[8..]);

            h0 = h0.wrapping_add(t0 & 0xfffffffffff);
            h1 = h1.wrapping_add(((t0 >> 44) | (t1 << 20)) & 0xfffffffffff);
            h2 = h2.wrapping_add(((t1 >> 24) & 0x3ffffffffff) | hibit);

            // h *= r
            let d0 = mul(h0, r0) + mul(h1, s2) + mul(h2, s1);
            let mut d1 = mul(h0, r1) + mul(h1, r0) + mul(h2, s2);
            let mut d2 = mul(h0, r2) + mul(h1, r1) + mul(h2, r0);

            // (partial) h %= p
            let mut c = shr(d0, 44);
            h0 = lo(d0) & 0xfffffffffff;
            d1 += c as u128;
            c = shr(d1, 44);
            h1 = lo(d1) & 0xfffffffffff;
            d2 += c as u128;
            c = shr(d2, 42);
            h2 = lo(d2) & 0x3ffffffffff;
            h0 += c * 5;
            c = h0 >> 44;
            h0 &= 0xfffffffffff;
            h1 += c;
        }

        self.h[0] = h0;
        self.h[1] = h1;
        self.h[2] = h2;
    }
}

impl CompressionBackend for Poly1305Core {
    type Params = Key;

    const ALGORITHM: Algorithm = Algorithm::Poly1305;
    const LANE_WIDTH: LaneWidth = LaneWidth::M32;

    fn new(key: &Key) -> Result<Self, Error> {
        let mut state = Self::default();

        let (t0, t1) = (load_u64_le(&key[0..8]), load_u64_le(&key[8..16]));

        // clamp r
        state.r[0] = t0 & 0xffc0fffffff;
        state.r[1] = ((t0 >> 44) | (t1 << 20)) & 0xfffffc0ffff;
        state.r[2] = (t1 >> 24) & 0x00ffffffc0f;

        state.pad[0] = load_u64_le(&key[16..24]);
        state.pad[1] = load_u64_le(&key[24..32]);

        Ok(state)
    }

    fn digest_len(&self) -> usize {
        MACBYTES
    }

    fn compress_interior(&mut self, _prior_len: u64, blocks: &[u8]) {
        self.blocks(blocks, false);
    }

    fn compress_final(&mut self, _prior_len: u64, last: &[u8]) {
        if last.len() == BLOCK_SIZE {
            self.blocks(last, false);
        } else if !last.is_empty() {
            let mut block = [0u8; BLOCK_SIZE];
            block[..last.len()].copy_from_slice(last);
            block[last.len()] = 1;
            self.blocks(&block, true);
            block.zeroize();
        }
    }

    fn extract(&self, output: &mut [u8]) {
        // fully carry h
        let mut h0 = self.h[0];
        let mut h1 = self.h[1];
        let mut h2 = self.h[2];

        let mut c = h1 >> 44;
        h1 &= 0xfffffffffff;
        h2 += c;
        c = h2 >> 42;
        h2 &= 0x3ffffffffff;
        h0 += c * 5;
        c = h0 >> 44;
        h0 &= 0xfffffffffff;
        h1 += c;
        c = h1 >> 44;
        h1 &= 0xfffffffffff;
        h2 += c;
        c = h2 >> 42;
        h2 &= 0x3ffffffffff;
        h0 += c * 5;
        c = h0 >> 44;
        h0 &= 0xfffffffffff;
        h1 += c;

        // compute h + -p
        let mut g0 = h0.wrapping_add(5);
        c = g0 >> 44;
        g0 &= 0xfffffffffff;
        let mut g1 = h1.wrapping_add(c);
        c = g1 >> 44;
        g1 &= 0xfffffffffff;
        let mut g2 = (h2.wrapping_add(c)).wrapping_sub(1u64 << 42);

        // select h if h < p, or h + -p if h >= p
        let mut mask = (g2 >> ((8 * 8) - 1)).wrapping_sub(1);
        g0 &= mask;
        g1 &= mask;
        g2 &= mask;
        mask = !mask;
        h0 = (h0 & mask) | g0;
        h1 = (h1 & mask) | g1;
        h2 = (h2 & mask) | g2;

        // h = (h + pad)
        let t0 = self.pad[0];
        let t1 = self.pad[1];

        h0 = h0.wrapping_add(t0 & 0xfffffffffff);
        c = h0 >> 44;
        h0 &= 0xfffffffffff;
        h1 = h1.wrapping_add((((t0 >> 44) | (t1 << 20)) & 0xfffffffffff).wrapping_add(c));
        c = h1 >> 44;
        h1 &= 0xfffffffffff;
        h2 = h2.wrapping_add(((t1 >> 24) & 0x3ffffffffff).wrapping_add(c));
        h2 &= 0x3ffffffffff;

        // mac = h % (2^128)
        h0 |= h1 << 44;
        h1 = (h1 >> 20) | (h2 << 24);

        output[0..8].copy_from_slice(&h0.to_le_bytes());
        output[8..16].copy_from_slice(&h1.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::StreamingState;

    const IETF_TEXT: &[u8] = b"Any submission to the IETF intended by the Contributor for publication as all or part of an IETF Internet-Draft or RFC and any statement made within the context of an IETF activity is considered an \"IETF Contribution\". Such statements include oral statements in IETF sessions, as well as written and electronic communications made at any time or place, which are addressed to";

    fn mac(key: &Key, input: &[u8]) -> [u8; 16] {
        let mut output = [0u8; 16];
        StreamingState::<Poly1305Core>::oneshot(key, input, &mut output).expect("mac");
        output
    }

    // RFC 8439 section 2.5.2 and appendix A.3: (key, message, tag)
    const RFC_VECTORS: [(&str, &[u8], &str); 5] = [
        (
            "85d6be7857556d337f4452fe42d506a80103808afb0db2fd4abff6af4149f51b",
            b"Cryptographic Forum Research Group",
            "a8061dc1305136c6c22b8baf0c0127a9",
        ),
        (
            "0000000000000000000000000000000000000000000000000000000000000000",
            &[0u8; 64],
            "00000000000000000000000000000000",
        ),
        (
            "0000000000000000000000000000000036e5f6b5c5e06070f0efca96227a863e",
            IETF_TEXT,
            "36e5f6b5c5e06070f0efca96227a863e",
        ),
        (
            "36e5f6b5c5e06070f0efca96227a863e00000000000000000000000000000000",
            IETF_TEXT,
            "f3477e7cd95417af89a6b8794c310cf0",
        ),
        (
            "1c9240a5eb55d38af333888604f6b5f0473917c1402b80099dca5cbc207075c0",
            b"'Twas brillig, and the slithy toves\nDid gyre and gimble in the wabe:\nAll mimsy were the borogoves,\nAnd the mome raths outgrabe.",
            "4541669a7eaaee61e708dc7cbcc5eb62",
        ),
    ];

    #[test]
    fn test_rfc_vectors() {
        for (key, text, tag) in RFC_VECTORS {
            let key = Key::try_from(hex::decode(key).expect("hex").as_slice()).expect("key");
            assert_eq!(hex::encode(mac(&key, text)), tag);
        }
    }

    #[test]
    fn test_incremental_matches_oneshot() {
        let key = Key::gen();
        let expected = mac(&key, IETF_TEXT);

        for step in [1usize, 7, 15, 16, 17, 32, 100] {
            let mut state = StreamingState::<Poly1305Core>::create(&key).expect("create");
            for chunk in IETF_TEXT.chunks(step) {
                state.update(chunk).expect("update");
            }
            assert_eq!(state.finish_to_vec().expect("finish"), expected.to_vec());
        }
    }

    #[test]
    fn test_empty_message_is_pad() {
        let mut key = Key::new();
        key[16..].copy_from_slice(&[0xabu8; 16]);
        assert_eq!(mac(&key, b""), [0xabu8; 16]);
    }
}
