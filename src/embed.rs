//! Embedder: writes a framed payload into channel LSBs along the seeded order.

use crate::bits::{lsb, with_lsb};
use crate::capacity::{check_capacity, frame_bits, required_channels, total_channels};
use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;
use crate::seed::Seed;
use crate::sequencer::ChannelOrder;
use tracing::debug;

/// Outcome of a successful embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedReport {
    /// Frame bits written, i.e. channels visited (`32 + 8 * payload_len`).
    pub bits_written: usize,
    /// Channels whose value actually changed (LSB differed from the bit).
    pub channels_changed: usize,
}

/// Hide `payload` in `grid`.
///
/// The capacity check happens before anything is written, so a failed embed
/// leaves the grid untouched. On success exactly `32 + 8 * payload.len()`
/// channels are visited, and only their least-significant bits may change.
pub fn embed<G>(grid: &mut G, payload: &[u8], seed: &Seed) -> Result<EmbedReport>
where
    G: PixelGrid + ?Sized,
{
    let (width, height) = grid.dimensions();
    if !check_capacity(width, height, payload.len()) {
        return Err(StegoError::CapacityExceeded {
            needed: required_channels(payload.len()),
            available: total_channels(width, height),
        });
    }

    let bits = frame_bits(payload)?;
    let order = ChannelOrder::new(width, height, seed)?;

    let mut channels_changed = 0;
    for (coord, &bit) in order.zip(bits.iter()) {
        let value = grid.channel(coord);
        if lsb(value) != bit {
            grid.set_channel(coord, with_lsb(value, bit));
            channels_changed += 1;
        }
    }

    debug!(
        width,
        height,
        payload_len = payload.len(),
        bits_written = bits.len(),
        channels_changed,
        "payload embedded"
    );

    Ok(EmbedReport {
        bits_written: bits.len(),
        channels_changed,
    })
}
