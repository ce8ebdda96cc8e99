//! Channel sequencer: the seeded permutation of every (x, y, channel) triple.
//!
//! # Algorithm
//!
//! The order is fixed so independent implementations agree bit for bit:
//!
//! 1. Canonical scan order is row-major over `y`, then `x`, then channel
//!    `0..3`. Triple `(x, y, c)` has canonical index `(y * W + x) * 3 + c`.
//! 2. The PRNG is ChaCha20 keyed with the 32 seed bytes
//!    (`rand_chacha::ChaCha20Rng::from_seed`).
//! 3. Forward Fisher-Yates: for `i` in `0..n`, draw `j = rng.gen_range(i..n)`
//!    as a `u32`, swap slots `i` and `j`, emit slot `i`.
//!
//! Sampling as `u32` rather than `usize` keeps the PRNG consumption identical
//! on 32-bit and 64-bit targets.
//!
//! ## Word stream
//!
//! `ChaCha20Rng` (rand_chacha 0.3) is the original 20-round ChaCha block
//! function with the seed as key, a 64-bit block counter starting at 0 and a
//! zero 64-bit stream id. Each block yields 16 little-endian `u32` words,
//! consumed in order; blocks follow each other by counter. The all-zero seed
//! starts `0xade0b876, 0x903df1a0, ...`.
//!
//! ## Drawing `j`
//!
//! `gen_range(i..n)` on `u32` is rand 0.8's `UniformInt::<u32>::sample_single`,
//! widening multiply with a conservative rejection zone:
//!
//! ```text
//! range = n - i
//! zone  = (range << range.leading_zeros()) - 1     // wrapping, u32
//! loop {
//!     v  = next u32 word
//!     m  = (v as u64) * (range as u64)
//!     if (m as u32) <= zone { j = i + (m >> 32) as u32; break }
//!     // else discard v and draw the next word
//! }
//! ```
//!
//! For the seed of passphrase `"k"` on a 6x3 grid (`n = 54`) the first words
//! are `0x47f575a1` (`j = 15`), `0xe323bd8a` (`j = 1 + 47`), then
//! `0x535ab742`, which is rejected for `i = 2`.
//!
//! [`ChannelOrder`] runs the shuffle lazily and keeps only displaced slots in
//! a sparse map, so consuming the first `m` triples costs O(m) regardless of
//! image size. [`order`] materializes the full permutation.

use crate::error::{Result, StegoError};
use crate::seed::Seed;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashMap;
use std::iter::FusedIterator;

/// Color channels addressed per pixel (red, green, blue).
pub const CHANNELS_PER_PIXEL: u32 = 3;

/// One addressable bit location: a single color channel of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelCoord {
    pub x: u32,
    pub y: u32,
    /// 0 = red, 1 = green, 2 = blue.
    pub channel: u8,
}

impl ChannelCoord {
    /// Map a canonical scan-order index back to its coordinate.
    pub fn from_index(index: u32, width: u32) -> Self {
        let pixel = index / CHANNELS_PER_PIXEL;
        Self {
            x: pixel % width,
            y: pixel / width,
            channel: (index % CHANNELS_PER_PIXEL) as u8,
        }
    }

    /// Canonical scan-order index of this coordinate.
    pub fn index(&self, width: u32) -> u32 {
        (self.y * width + self.x) * CHANNELS_PER_PIXEL + self.channel as u32
    }
}

/// Total channel count `width * height * 3`, or `GridTooLarge` if it
/// overflows the 32-bit index space.
pub fn channel_count(width: u32, height: u32) -> Result<u32> {
    let total = width as u64 * height as u64 * CHANNELS_PER_PIXEL as u64;
    u32::try_from(total).map_err(|_| StegoError::GridTooLarge { width, height })
}

/// Lazily shuffled channel order for one grid and one seed.
///
/// Yields exactly `width * height * 3` coordinates, each once.
pub struct ChannelOrder {
    width: u32,
    len: u32,
    cursor: u32,
    rng: ChaCha20Rng,
    displaced: HashMap<u32, u32>,
}

impl ChannelOrder {
    pub fn new(width: u32, height: u32, seed: &Seed) -> Result<Self> {
        let len = channel_count(width, height)?;
        Ok(Self {
            width,
            len,
            cursor: 0,
            rng: ChaCha20Rng::from_seed(*seed.as_bytes()),
            displaced: HashMap::new(),
        })
    }

    /// Total number of coordinates in the order.
    pub fn total(&self) -> u32 {
        self.len
    }

    /// Coordinates not yet consumed.
    pub fn remaining(&self) -> u32 {
        self.len - self.cursor
    }

    /// Current content of slot `k` of the virtual permutation array.
    fn slot(&self, k: u32) -> u32 {
        self.displaced.get(&k).copied().unwrap_or(k)
    }
}

impl Iterator for ChannelOrder {
    type Item = ChannelCoord;

    fn next(&mut self) -> Option<ChannelCoord> {
        if self.cursor >= self.len {
            return None;
        }
        let i = self.cursor;
        let j = self.rng.gen_range(i..self.len);

        let picked = self.slot(j);
        if j != i {
            let current = self.slot(i);
            self.displaced.insert(j, current);
        }
        // slot i is final from here on
        self.displaced.remove(&i);
        self.cursor += 1;

        Some(ChannelCoord::from_index(picked, self.width))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining() as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ChannelOrder {}
impl FusedIterator for ChannelOrder {}

/// Materialize the full seeded permutation of a `width` x `height` grid.
///
/// Same sequence as [`ChannelOrder`], computed with an in-place
/// Fisher-Yates over the whole canonical list.
pub fn order(width: u32, height: u32, seed: &Seed) -> Result<Vec<ChannelCoord>> {
    let n = channel_count(width, height)?;
    let mut indices: Vec<u32> = (0..n).collect();
    let mut rng = ChaCha20Rng::from_seed(*seed.as_bytes());
    for i in 0..n {
        let j = rng.gen_range(i..n);
        indices.swap(i as usize, j as usize);
    }
    Ok(indices
        .into_iter()
        .map(|k| ChannelCoord::from_index(k, width))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn seed(s: &str) -> Seed {
        Seed::from_passphrase(s)
    }

    #[test]
    fn test_order_is_deterministic() {
        let a = order(7, 5, &seed("k")).unwrap();
        let b = order(7, 5, &seed("k")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_known_answer() {
        let c = |x, y, channel| ChannelCoord { x, y, channel };
        let expected = [
            c(5, 0, 0),
            c(4, 2, 0),
            c(1, 2, 2),
            c(2, 0, 0),
            c(4, 2, 1),
            c(2, 1, 1),
            c(5, 2, 0),
            c(0, 2, 0),
            c(3, 0, 2),
            c(1, 1, 0),
            c(4, 0, 0),
            c(4, 1, 1),
        ];

        let eager = order(6, 3, &seed("k")).unwrap();
        assert_eq!(&eager[..12], &expected);

        let lazy: Vec<_> = ChannelOrder::new(6, 3, &seed("k")).unwrap().take(12).collect();
        assert_eq!(lazy, expected);
    }

    #[test]
    fn test_order_is_a_permutation() {
        let (w, h) = (9, 4);
        let coords = order(w, h, &seed("perm")).unwrap();
        assert_eq!(coords.len(), (w * h * 3) as usize);

        let unique: HashSet<_> = coords.iter().copied().collect();
        assert_eq!(unique.len(), coords.len());
        for c in &coords {
            assert!(c.x < w && c.y < h && c.channel < 3);
        }
    }

    #[test]
    fn test_order_actually_shuffles() {
        let coords = order(16, 16, &seed("shuffle")).unwrap();
        let canonical: Vec<_> = (0..16 * 16 * 3)
            .map(|k| ChannelCoord::from_index(k, 16))
            .collect();
        assert_ne!(coords, canonical);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = order(16, 16, &seed("s1")).unwrap();
        let b = order(16, 16, &seed("s2")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_lazy_matches_eager() {
        for (w, h) in [(1, 1), (2, 2), (6, 3), (31, 17)] {
            let s = seed("lazy");
            let eager = order(w, h, &s).unwrap();
            let lazy: Vec<_> = ChannelOrder::new(w, h, &s).unwrap().collect();
            assert_eq!(eager, lazy, "mismatch for {}x{}", w, h);
        }
    }

    #[test]
    fn test_prefix_consumption() {
        let s = seed("prefix");
        let eager = order(64, 64, &s).unwrap();
        let mut lazy = ChannelOrder::new(64, 64, &s).unwrap();
        let head: Vec<_> = lazy.by_ref().take(40).collect();
        assert_eq!(head, &eager[..40]);
        assert_eq!(lazy.remaining(), 64 * 64 * 3 - 40);
        assert_eq!(lazy.len(), lazy.remaining() as usize);
        // continuing the same iterator picks up exactly where it stopped
        assert_eq!(lazy.next(), Some(eager[40]));
    }

    #[test]
    fn test_empty_grid() {
        assert!(order(0, 10, &seed("x")).unwrap().is_empty());
        let mut lazy = ChannelOrder::new(10, 0, &seed("x")).unwrap();
        assert_eq!(lazy.total(), 0);
        assert_eq!(lazy.next(), None);
    }

    #[test]
    fn test_grid_too_large() {
        match ChannelOrder::new(u32::MAX, 2, &seed("x")) {
            Err(StegoError::GridTooLarge { width, height }) => {
                assert_eq!((width, height), (u32::MAX, 2));
            }
            _ => panic!("expected GridTooLarge"),
        }
    }

    #[test]
    fn test_coord_index_roundtrip() {
        let c = ChannelCoord { x: 3, y: 2, channel: 1 };
        assert_eq!(c.index(5), (2 * 5 + 3) * 3 + 1);
        assert_eq!(ChannelCoord::from_index(c.index(5), 5), c);
    }
}
