//! Extractor: recovers a framed payload from channel LSBs.
//!
//! Extraction walks a single [`ChannelOrder`] through two phases without
//! restarting it:
//!
//! ```text
//! ReadingLength { bits_read < 32 }
//!     -> LengthComplete { declared }
//!     -> ReadingPayload { bits_read < declared * 8 }
//!     -> Done
//! ```
//!
//! There is no integrity check. A wrong seed usually shows up as an
//! impossible declared length ([`StegoError::CorruptLength`]); when the
//! garbage length happens to fit, garbage bytes come back.

use crate::bits::{bits_to_bytes, lsb};
use crate::capacity::{decode_length_prefix, total_channels, LENGTH_PREFIX_BITS};
use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;
use crate::seed::Seed;
use crate::sequencer::ChannelOrder;
use tracing::debug;

/// Where an [`Extractor`] currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractState {
    ReadingLength { bits_read: usize },
    LengthComplete { declared: u32 },
    ReadingPayload { bits_read: usize, target: usize },
    Done,
    Failed,
}

/// Step-wise extractor over one grid and one seed.
pub struct Extractor<'a, G: PixelGrid + ?Sized> {
    grid: &'a G,
    order: ChannelOrder,
    state: ExtractState,
    bits: Vec<u8>,
}

impl<'a, G: PixelGrid + ?Sized> Extractor<'a, G> {
    pub fn new(grid: &'a G, seed: &Seed) -> Result<Self> {
        let (width, height) = grid.dimensions();
        Ok(Self {
            grid,
            order: ChannelOrder::new(width, height, seed)?,
            state: ExtractState::ReadingLength { bits_read: 0 },
            bits: Vec::with_capacity(LENGTH_PREFIX_BITS),
        })
    }

    pub fn state(&self) -> &ExtractState {
        &self.state
    }

    /// Read the next LSB from the order, or fail if the order is exhausted.
    fn read_bit(&mut self, needed: u64) -> Result<u8> {
        match self.order.next() {
            Some(coord) => Ok(lsb(self.grid.channel(coord))),
            None => Err(StegoError::TruncatedImage {
                needed,
                available: self.order.total() as u64,
            }),
        }
    }

    /// Advance by one transition. Returns the payload once `Done` is reached.
    pub fn step(&mut self) -> Result<Option<Vec<u8>>> {
        let result = self.advance();
        if result.is_err() {
            self.state = ExtractState::Failed;
        }
        result
    }

    fn advance(&mut self) -> Result<Option<Vec<u8>>> {
        match self.state {
            ExtractState::ReadingLength { bits_read } => {
                let bit = self.read_bit(LENGTH_PREFIX_BITS as u64)?;
                self.bits.push(bit);
                let bits_read = bits_read + 1;
                self.state = if bits_read == LENGTH_PREFIX_BITS {
                    let declared = decode_length_prefix(&self.bits);
                    ExtractState::LengthComplete { declared }
                } else {
                    ExtractState::ReadingLength { bits_read }
                };
                Ok(None)
            }
            ExtractState::LengthComplete { declared } => {
                let target = declared as u64 * 8;
                let remaining = self.order.remaining() as u64;
                if target > remaining {
                    debug!(declared, remaining, "declared length exceeds image");
                    return Err(StegoError::CorruptLength {
                        declared,
                        available: remaining / 8,
                    });
                }
                let target = target as usize;
                self.bits.clear();
                self.bits.reserve_exact(target);
                self.state = if target == 0 {
                    ExtractState::Done
                } else {
                    ExtractState::ReadingPayload { bits_read: 0, target }
                };
                Ok(self.take_if_done())
            }
            ExtractState::ReadingPayload { bits_read, target } => {
                let needed = LENGTH_PREFIX_BITS as u64 + target as u64;
                let bit = self.read_bit(needed)?;
                self.bits.push(bit);
                let bits_read = bits_read + 1;
                self.state = if bits_read == target {
                    ExtractState::Done
                } else {
                    ExtractState::ReadingPayload { bits_read, target }
                };
                Ok(self.take_if_done())
            }
            ExtractState::Done | ExtractState::Failed => Ok(None),
        }
    }

    fn take_if_done(&mut self) -> Option<Vec<u8>> {
        if self.state == ExtractState::Done {
            Some(bits_to_bytes(&std::mem::take(&mut self.bits)))
        } else {
            None
        }
    }

    /// Drive the state machine to completion.
    pub fn run(mut self) -> Result<Vec<u8>> {
        loop {
            if let Some(payload) = self.step()? {
                return Ok(payload);
            }
        }
    }
}

/// Recover the payload hidden in `grid` with `seed`.
///
/// With the wrong seed the 32 prefix bits come from unrelated channels, so on
/// small grids (6x3 has room for 2 bytes) this is nearly always
/// `CorruptLength` rather than a garbage payload.
pub fn extract<G>(grid: &G, seed: &Seed) -> Result<Vec<u8>>
where
    G: PixelGrid + ?Sized,
{
    let (width, height) = grid.dimensions();
    let payload = Extractor::new(grid, seed)?.run()?;
    debug!(
        width,
        height,
        channels = total_channels(width, height),
        payload_len = payload.len(),
        "payload extracted"
    );
    Ok(payload)
}
