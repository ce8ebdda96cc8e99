//! # steglsb
//!
//! Passphrase-keyed LSB steganography: hides an arbitrary byte payload in the
//! least-significant bits of an image's red, green and blue channels.
//!
//! ## Quick Start
//!
//! ```no_run
//! use steglsb::LsbStego;
//! use image::ImageReader;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Load carrier image
//! let carrier = ImageReader::open("cover.png")?.decode()?;
//!
//! // Channel order is keyed by the passphrase
//! let stego = LsbStego::from_passphrase("correct horse");
//!
//! // Embed secret bytes
//! let stego_image = stego.embed(&carrier, b"This is a secret message")?;
//!
//! // Save the result (must be lossless)
//! stego_image.save("stego.png")?;
//!
//! // Extract with the same passphrase
//! let extracted = stego.extract(&stego_image)?;
//! assert_eq!(extracted, b"This is a secret message");
//! # Ok(())
//! # }
//! ```
//!
//! ## How it works
//!
//! - The passphrase is turned into a 32-byte [`Seed`] (HKDF-SHA256).
//! - The seed keys a ChaCha20 Fisher-Yates shuffle of every
//!   `(x, y, channel)` triple ([`sequencer`]).
//! - A 32-bit big-endian byte length and then the payload are written one
//!   bit per channel LSB along that order ([`embed`], [`extract`]).
//!
//! There is no encryption and no integrity check: the passphrase only
//! decides *where* the bits go. A wrong passphrase yields garbage or a
//! [`StegoError::CorruptLength`].
//!
//! ## Modules
//!
//! - `bits`: bit codec and LSB helpers
//! - `seed`: passphrase to seed derivation
//! - `sequencer`: seeded channel permutation
//! - `capacity`: capacity checks and length framing
//! - `grid`: pixel grid trait
//! - `embed` / `extract`: the core protocol
//! - `carrier`: image decoding and lossless output
//! - `steganography`: `DynamicImage` engine

pub mod bits;
pub mod capacity;
pub mod carrier;
pub mod embed;
pub mod error;
pub mod extract;
pub mod grid;
pub mod seed;
pub mod sequencer;
pub mod steganography;

// Re-export main types for convenience
pub use carrier::{Carrier, OutputFormat};
pub use embed::EmbedReport;
pub use error::{Result, StegoError};
pub use extract::{ExtractState, Extractor};
pub use grid::PixelGrid;
pub use seed::Seed;
pub use sequencer::{order, ChannelCoord, ChannelOrder};
pub use steganography::LsbStego;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create an [`LsbStego`] keyed by a passphrase
///
/// # Examples
///
/// ```
/// let stego = steglsb::with_passphrase("my-secret-password");
/// assert_eq!(stego.seed(), &steglsb::Seed::from_passphrase("my-secret-password"));
/// ```
pub fn with_passphrase(passphrase: &str) -> LsbStego {
    LsbStego::from_passphrase(passphrase)
}

/// Calculate maximum payload capacity in bytes for a given image
///
/// # Examples
///
/// ```no_run
/// use image::ImageReader;
/// # fn main() -> anyhow::Result<()> {
/// let img = ImageReader::open("photo.png")?.decode()?;
/// let capacity = steglsb::calculate_capacity(&img);
/// println!("Image can hold {} bytes", capacity);
/// # Ok(())
/// # }
/// ```
pub fn calculate_capacity(image: &image::DynamicImage) -> usize {
    LsbStego::calculate_capacity(image)
}
