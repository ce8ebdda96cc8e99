//! Capacity checks and the length-prefix frame.
//!
//! A frame is a 32-bit big-endian payload *byte* length followed by the
//! payload itself, both bit-expanded MSB first. The prefix always occupies
//! the first 32 coordinates of the channel order.

use crate::bits::{bits_to_bytes, bytes_to_bits};
use crate::error::{Result, StegoError};
use crate::sequencer::CHANNELS_PER_PIXEL;

/// Width of the length prefix in bits.
pub const LENGTH_PREFIX_BITS: usize = 32;

/// Number of addressable channels in a `width` x `height` grid.
pub fn total_channels(width: u32, height: u32) -> u64 {
    (width as u64 * height as u64).saturating_mul(CHANNELS_PER_PIXEL as u64)
}

/// Channels needed to hold a frame carrying `payload_len` bytes.
pub fn required_channels(payload_len: usize) -> u64 {
    payload_len as u64 * 8 + LENGTH_PREFIX_BITS as u64
}

/// Whether `payload_len` bytes plus the length prefix fit in the grid.
pub fn check_capacity(width: u32, height: u32, payload_len: usize) -> bool {
    total_channels(width, height) >= required_channels(payload_len)
}

/// Largest payload, in bytes, that fits in the grid.
pub fn max_payload_len(width: u32, height: u32) -> usize {
    let free = total_channels(width, height).saturating_sub(LENGTH_PREFIX_BITS as u64);
    // also bounded by what the prefix can express
    (free / 8).min(u32::MAX as u64) as usize
}

/// Bit-encoded length prefix for a payload of `payload_len` bytes.
///
/// Always exactly [`LENGTH_PREFIX_BITS`] long.
pub fn length_prefix_bits(payload_len: usize) -> Result<Vec<u8>> {
    let len = u32::try_from(payload_len).map_err(|_| StegoError::CapacityExceeded {
        needed: required_channels(payload_len),
        available: u32::MAX as u64 * 8 + LENGTH_PREFIX_BITS as u64,
    })?;
    Ok(bytes_to_bits(&len.to_be_bytes()))
}

/// Decode a 32-bit length prefix back into a byte length.
///
/// `bits` must hold at least [`LENGTH_PREFIX_BITS`] bits; extra bits are
/// ignored.
pub fn decode_length_prefix(bits: &[u8]) -> u32 {
    let mut be = [0u8; 4];
    let packed = bits_to_bytes(&bits[..LENGTH_PREFIX_BITS.min(bits.len())]);
    be[..packed.len()].copy_from_slice(&packed);
    u32::from_be_bytes(be)
}

/// Full frame: length prefix bits followed by payload bits.
pub fn frame_bits(payload: &[u8]) -> Result<Vec<u8>> {
    let mut bits = length_prefix_bits(payload.len())?;
    bits.extend(bytes_to_bits(payload));
    Ok(bits)
}
