//! Bit codec: bytes to MSB-first bit sequences and back, plus LSB helpers.
//!
//! Bits are stored one per `u8` (values 0 or 1).

/// Expand every byte into 8 bits, most-significant bit first.
pub fn bytes_to_bits(data: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for &byte in data {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1);
        }
    }
    bits
}

/// Pack bits MSB-first into bytes.
///
/// A trailing partial byte is right-padded with zero bits. Callers that need
/// the exact bit count must carry it separately (the length prefix does).
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; bits.len().div_ceil(8)];
    for (i, &bit) in bits.iter().enumerate() {
        let byte_idx = i / 8;
        let bit_pos = 7 - (i % 8);
        out[byte_idx] |= (bit & 1) << bit_pos;
    }
    out
}

/// Least-significant bit of a channel value.
#[inline]
pub fn lsb(value: u8) -> u8 {
    value & 1
}

/// Replace the least-significant bit of `value` with `bit`, keeping the rest.
#[inline]
pub fn with_lsb(value: u8, bit: u8) -> u8 {
    (value & !1) | (bit & 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_bits_msb_first() {
        assert_eq!(bytes_to_bits(&[0x41]), vec![0, 1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(
            bytes_to_bits(&[0x80, 0x01]),
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]
        );
        assert!(bytes_to_bits(&[]).is_empty());
    }

    #[test]
    fn test_bits_to_bytes_inverse() {
        let data = b"\x00\xffHello, LSB!\x7f";
        assert_eq!(bits_to_bytes(&bytes_to_bits(data)), data.to_vec());
    }

    #[test]
    fn test_bits_to_bytes_pads_with_zeros() {
        // 101 -> 1010_0000
        assert_eq!(bits_to_bytes(&[1, 0, 1]), vec![0xA0]);
        // 9 bits -> two bytes, second holds one high bit
        assert_eq!(bits_to_bytes(&[1, 1, 1, 1, 1, 1, 1, 1, 1]), vec![0xFF, 0x80]);
        assert!(bits_to_bytes(&[]).is_empty());
    }

    #[test]
    fn test_with_lsb_only_touches_low_bit() {
        for value in 0..=255u8 {
            for bit in 0..=1u8 {
                let out = with_lsb(value, bit);
                assert_eq!(lsb(out), bit);
                assert_eq!(out & !1, value & !1);
            }
        }
    }
}
