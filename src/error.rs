//! Error types for QR generation, reconstruction and export

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or exporting a QR code
#[derive(Error, Debug)]
pub enum Error {
    /// Content is empty or whitespace-only
    #[error("Nothing to encode: content is empty")]
    EmptyContent,

    /// The QR encoder rejected the content (e.g. capacity exceeded)
    #[error("QR encoding failed: {0}")]
    Encode(String),

    /// Logo image data could not be decoded
    #[error("Logo image could not be decoded: {0}")]
    Logo(String),

    /// A colour string was not `#rgb` or `#rrggbb`
    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    /// A `data:` URL was malformed
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// An option value could not be parsed
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Export was requested for a bitmap without pixels
    #[error("Bitmap is empty")]
    EmptyBitmap,

    /// Clipboard write failed
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    /// Image encoding or decoding error
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
