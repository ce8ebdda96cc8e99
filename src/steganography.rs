//! Passphrase-keyed LSB steganography engine over `image::DynamicImage`.
//!
//! Thin facade over [`embed`](crate::embed::embed) and
//! [`extract`](crate::extract::extract) that owns the seed and handles the
//! RGB/RGBA narrowing of arbitrary decoded images.

use crate::capacity::max_payload_len;
use crate::carrier::Carrier;
use crate::embed::{embed, EmbedReport};
use crate::error::Result;
use crate::extract::extract;
use crate::seed::Seed;
use image::{DynamicImage, GenericImageView};

/// Main steganography engine
#[derive(Debug, Clone)]
pub struct LsbStego {
    seed: Seed,
}

impl LsbStego {
    /// Create an engine from an explicit seed.
    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }

    /// Create an engine whose channel order is keyed by `passphrase`.
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::new(Seed::from_passphrase(passphrase))
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Embed `payload` into a copy of `carrier`.
    ///
    /// The result is RGB8, or RGBA8 when the carrier has an alpha channel.
    /// It must be stored losslessly.
    pub fn embed(&self, carrier: &DynamicImage, payload: &[u8]) -> Result<DynamicImage> {
        let (image, _) = self.embed_with_report(carrier, payload)?;
        Ok(image)
    }

    /// Like [`embed`](Self::embed), also returning what was written.
    pub fn embed_with_report(
        &self,
        carrier: &DynamicImage,
        payload: &[u8],
    ) -> Result<(DynamicImage, EmbedReport)> {
        let mut grid = Carrier::from_dynamic(carrier);
        let report = embed(&mut grid, payload, &self.seed)?;
        Ok((grid.into_dynamic(), report))
    }

    /// Embed directly into an already decoded carrier, in place.
    pub fn embed_in_place(&self, carrier: &mut Carrier, payload: &[u8]) -> Result<EmbedReport> {
        embed(carrier, payload, &self.seed)
    }

    /// Recover the payload hidden in `stego`.
    pub fn extract(&self, stego: &DynamicImage) -> Result<Vec<u8>> {
        let grid = Carrier::from_dynamic(stego);
        self.extract_from(&grid)
    }

    pub fn extract_from(&self, carrier: &Carrier) -> Result<Vec<u8>> {
        extract(carrier, &self.seed)
    }

    /// Maximum payload size in bytes the image can carry.
    pub fn calculate_capacity(image: &DynamicImage) -> usize {
        let (width, height) = image.dimensions();
        max_payload_len(width, height)
    }
}
