//! rust_qr_gen - styled QR code generation with raster-to-SVG reconstruction
//!
//! Encodes content with the `qrcode` crate, rasterizes it at a requested pixel
//! size with colours, quiet zone, optional centred logo and border, and exports
//! PNG, JPEG or SVG. The SVG is rebuilt from the rendered bitmap by inferring
//! the module pitch and classifying each module, so it works on any square
//! QR bitmap, not just ones this crate produced.
//!
//! ```no_run
//! use rust_qr_gen::{ExportFormat, OptionChange, QrOptions, export, render};
//!
//! let options = QrOptions::default().apply(OptionChange::Size(300));
//! let qr = render("https://example.com", &options).unwrap();
//! let svg = export::encode(&qr, ExportFormat::Svg).unwrap();
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Process-level tunables read from the environment
pub mod config;
/// Input state and render sequencing
pub mod controller;
/// Bridge to the external QR encoder
pub mod encoder;
/// Error type and result alias
pub mod error;
/// PNG/JPEG/SVG and clipboard export
pub mod export;
/// Core data structures (BitMatrix, options, colours, logo)
pub mod models;
/// Rasterization and logo/border composition
pub mod render;
/// Utility functions (brightness, binarization)
pub mod utils;
/// Raster-to-vector reconstruction
pub mod vector;

pub use controller::{Controller, PreviewState, RenderOutcome, RenderRequest};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use models::{BitMatrix, BorderStyle, ContentKind, ECLevel, Logo, OptionChange, QrOptions, Rgb};
pub use render::{Render, RenderInfo, render};
pub use vector::{Reconstruction, VectorDocument, reconstruct};

/// Reconstruct an SVG document from an arbitrary image file.
///
/// Colours, logo and border come from `style`; module geometry comes from the
/// pixels. The image is converted to RGBA first.
pub fn vectorize_file<P: AsRef<std::path::Path>>(path: P, style: &QrOptions) -> Result<Reconstruction> {
    let bitmap = image::open(path)?.to_rgba8();
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(Error::EmptyBitmap);
    }
    Ok(reconstruct(&bitmap, style))
}
