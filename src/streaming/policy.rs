//! Block-size policy: how many bytes the streaming buffer holds for each
//! algorithm and lane width.

/// Algorithms driven by the streaming engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// BLAKE2s, 64-byte compression blocks.
    Blake2s,
    /// BLAKE2b, 128-byte compression blocks.
    Blake2b,
    /// Poly1305, 16-byte blocks.
    Poly1305,
    /// GHASH (the GCM authenticator), 16-byte blocks.
    Ghash,
}

/// Vector width a compression backend is written for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneWidth {
    /// Scalar 32/64-bit words.
    M32,
    /// 128-bit vectors.
    M128,
    /// 256-bit vectors.
    M256,
}

impl Algorithm {
    /// Size of one compression block, independent of lane width.
    pub const fn compression_block_len(self) -> usize {
        match self {
            Algorithm::Blake2s => 64,
            Algorithm::Blake2b => 128,
            Algorithm::Poly1305 | Algorithm::Ghash => 16,
        }
    }

    /// Name used in log events.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Blake2s => "blake2s",
            Algorithm::Blake2b => "blake2b",
            Algorithm::Poly1305 => "poly1305",
            Algorithm::Ghash => "ghash",
        }
    }
}

/// Returns the streaming buffer length, in bytes, for `algorithm` on a
/// backend of the given lane width. Wider backends consume several
/// compression blocks per call, so the buffer holds that many.
pub const fn block_size(algorithm: Algorithm, lanes: LaneWidth) -> usize {
    let blocks_per_call = match (algorithm, lanes) {
        (_, LaneWidth::M32) => 1,
        (Algorithm::Blake2s, LaneWidth::M128) | (Algorithm::Blake2b, LaneWidth::M128) => 4,
        (Algorithm::Blake2s, LaneWidth::M256) | (Algorithm::Blake2b, LaneWidth::M256) => 8,
        (Algorithm::Poly1305, LaneWidth::M128) | (Algorithm::Ghash, LaneWidth::M128) => 2,
        (Algorithm::Poly1305, LaneWidth::M256) | (Algorithm::Ghash, LaneWidth::M256) => 4,
    };
    blocks_per_call * algorithm.compression_block_len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size() {
        assert_eq!(block_size(Algorithm::Blake2s, LaneWidth::M32), 64);
        assert_eq!(block_size(Algorithm::Blake2s, LaneWidth::M128), 256);
        assert_eq!(block_size(Algorithm::Blake2s, LaneWidth::M256), 512);
        assert_eq!(block_size(Algorithm::Blake2b, LaneWidth::M32), 128);
        assert_eq!(block_size(Algorithm::Blake2b, LaneWidth::M128), 512);
        assert_eq!(block_size(Algorithm::Blake2b, LaneWidth::M256), 1024);
        assert_eq!(block_size(Algorithm::Poly1305, LaneWidth::M32), 16);
        assert_eq!(block_size(Algorithm::Poly1305, LaneWidth::M256), 64);
        assert_eq!(block_size(Algorithm::Ghash, LaneWidth::M128), 32);
    }

    #[test]
    fn test_block_size_is_multiple_of_compression_block() {
        for alg in [
            Algorithm::Blake2s,
            Algorithm::Blake2b,
            Algorithm::Poly1305,
            Algorithm::Ghash,
        ] {
            for lanes in [LaneWidth::M32, LaneWidth::M128, LaneWidth::M256] {
                assert_eq!(block_size(alg, lanes) % alg.compression_block_len(), 0);
            }
        }
    }
}
