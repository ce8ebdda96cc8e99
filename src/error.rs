use thiserror::Error;

/// Failures reported by the embed/extract pipeline and the carrier boundary.
///
/// None of these are retried: every operation is deterministic, so the same
/// input fails the same way. The remedy is a larger carrier, the correct
/// passphrase, or a lossless output format.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The payload plus its 32-bit length prefix does not fit in the carrier.
    #[error("payload too large for carrier: need {needed} channels, image has {available}")]
    CapacityExceeded { needed: u64, available: u64 },

    /// The channel order ran out before extraction finished.
    #[error("image truncated: need {needed} channels, image has {available}")]
    TruncatedImage { needed: u64, available: u64 },

    /// The recovered length prefix cannot be satisfied by this image.
    /// Usually the symptom of a wrong passphrase.
    #[error("corrupt length prefix: declares {declared} bytes but only {available} bytes remain (wrong passphrase?)")]
    CorruptLength { declared: u32, available: u64 },

    /// The requested output container would destroy the hidden bits.
    #[error("unsupported output format: {0} (use .png, .bmp, .tif or .tiff)")]
    UnsupportedOutputFormat(String),

    /// `width * height * 3` does not fit the 32-bit channel index.
    #[error("image {width}x{height} has too many channels to address")]
    GridTooLarge { width: u32, height: u32 },

    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("file operation error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
