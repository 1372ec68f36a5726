#[inline]
pub(crate) fn xor_buf(out: &mut [u8], in_: &[u8]) {
    let len = std::cmp::min(out.len(), in_.len());
    for i in 0..len {
        out[i] ^= in_[i];
    }
}

#[inline]
pub(crate) fn load_u64_le(bytes: &[u8]) -> u64 {
    (bytes[0] as u64)
        | (bytes[1] as u64) << 8
        | (bytes[2] as u64) << 16
        | (bytes[3] as u64) << 24
        | (bytes[4] as u64) << 32
        | (bytes[5] as u64) << 40
        | (bytes[6] as u64) << 48
        | (bytes[7] as u64) << 56
}

#[inline]
pub(crate) fn load_u32_le(bytes: &[u8]) -> u32 {
    (bytes[0] as u32) | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16 | (bytes[3] as u32) << 24
}

#[inline]
pub(crate) fn rotr64(x: u64, b: u32) -> u64 {
    x.rotate_right(b)
}

#[inline]
pub(crate) fn rotr32(x: u32, b: u32) -> u32 {
    x.rotate_right(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_buf() {
        let mut a = [0];
        let b = [0];

        xor_buf(&mut a, &b);
        assert_eq!([0], a);

        let mut a = [1, 1, 1];
        let b = [0];

        xor_buf(&mut a, &b);
        assert_eq!([1, 1, 1], a);

        let mut a = [1, 1, 1];
        let b = [0, 1, 1];

        xor_buf(&mut a, &b);
        assert_eq!([1, 0, 0], a);
    }

    #[test]
    fn test_loads() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(load_u64_le(&bytes), u64::from_le_bytes(bytes));
        assert_eq!(load_u32_le(&bytes[..4]), 0x04030201);
        assert_eq!(rotr32(1, 1), 0x8000_0000);
        assert_eq!(rotr64(1, 63), 2);
    }
}
