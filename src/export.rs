//! One-shot exports of a render: PNG, JPEG, SVG files and the clipboard

use crate::config;
use crate::error::{Error, Result};
use crate::render::Render;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, ImageEncoder, RgbaImage};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Lossless raster
    Png,
    /// Lossy raster, no alpha
    Jpeg,
    /// Vector reconstruction
    Svg,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
        }
    }

    /// MIME type
    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            "svg" => Ok(ExportFormat::Svg),
            _ => Err(Error::InvalidOption(format!("export format '{s}'"))),
        }
    }
}

/// Encode a bitmap as PNG
pub fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(Error::EmptyBitmap);
    }
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        bitmap.as_raw(),
        bitmap.width(),
        bitmap.height(),
        ColorType::Rgba8,
    )?;
    Ok(out)
}

/// Encode a bitmap as JPEG at `quality` (1-100); alpha is dropped
pub fn encode_jpeg(bitmap: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(Error::EmptyBitmap);
    }
    let rgb = DynamicImage::ImageRgba8(bitmap.clone()).to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100)).encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ColorType::Rgb8,
    )?;
    Ok(out)
}

/// Encode a render in `format`
pub fn encode(render: &Render, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Png => encode_png(render.composite()),
        ExportFormat::Jpeg => encode_jpeg(render.composite(), config::jpeg_quality()),
        ExportFormat::Svg => Ok(render.to_vector().to_svg_string().into_bytes()),
    }
}

/// Download-style file name: `qr-code-<unix millis>.<ext>`
pub fn file_name(format: ExportFormat, at: SystemTime) -> String {
    let millis = at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("qr-code-{}.{}", millis, format.extension())
}

/// Write a render into `dir` (created if missing) and return the file path
pub fn save(render: &Render, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    let bytes = encode(render, format)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(format, SystemTime::now()));
    fs::write(&path, bytes)?;
    log::info!("exported {} ({})", path.display(), format.mime());
    Ok(path)
}

/// Write a render into the configured output directory (`QR_OUTPUT_DIR`)
pub fn save_default(render: &Render, format: ExportFormat) -> Result<PathBuf> {
    save(render, format, &config::output_dir())
}

/// Put the composite bitmap on the system clipboard as an image
#[cfg(feature = "clipboard")]
pub fn copy_to_clipboard(render: &Render) -> Result<()> {
    use std::borrow::Cow;

    let bitmap = render.composite();
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    clipboard
        .set_image(arboard::ImageData {
            width: bitmap.width() as usize,
            height: bitmap.height() as usize,
            bytes: Cow::Borrowed(bitmap.as_raw()),
        })
        .map_err(|e| Error::Clipboard(e.to_string()))?;
    log::info!("copied {}x{} image to clipboard", bitmap.width(), bitmap.height());
    Ok(())
}
