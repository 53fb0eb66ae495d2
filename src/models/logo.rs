use crate::error::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbaImage};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

const OCTET_STREAM: &str = "application/octet-stream";

/// Encoded logo image as supplied by the caller.
///
/// Bytes are kept encoded so the vector export can embed them verbatim;
/// decoding happens only when the logo is drawn into a bitmap.
#[derive(Clone, PartialEq, Eq)]
pub struct Logo {
    bytes: Arc<[u8]>,
    mime: String,
}

impl Logo {
    /// Wrap encoded image bytes, sniffing the MIME type from the header
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        let mime = image::guess_format(&bytes)
            .map(mime_for)
            .unwrap_or(OCTET_STREAM)
            .to_string();
        Self {
            bytes: bytes.into(),
            mime,
        }
    }

    /// Read an image file from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_bytes(std::fs::read(path)?))
    }

    /// Parse a `data:<mime>;base64,<payload>` URL
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| Error::InvalidDataUrl("missing 'data:' scheme".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::InvalidDataUrl("missing ',' separator".into()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| Error::InvalidDataUrl("only base64 payloads are supported".into()))?;

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| Error::InvalidDataUrl(e.to_string()))?;
        let mut logo = Self::from_bytes(bytes);
        // Sniffed type wins; the declared one only fills in unknown formats
        if logo.mime == OCTET_STREAM && is_image_mime(mime) {
            logo.mime = mime.to_ascii_lowercase();
        }
        Ok(logo)
    }

    /// Encoded image bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type of the encoded bytes
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Render as a base64 `data:` URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Decode into RGBA pixels
    pub fn decode(&self) -> Result<RgbaImage> {
        image::load_from_memory(&self.bytes)
            .map(|img| img.to_rgba8())
            .map_err(|e| Error::Logo(e.to_string()))
    }
}

impl fmt::Debug for Logo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logo")
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

fn mime_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Ico => "image/x-icon",
        ImageFormat::Tiff => "image/tiff",
        _ => OCTET_STREAM,
    }
}

/// `image/<subtype>` with a plain token subtype
fn is_image_mime(mime: &str) -> bool {
    mime.get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
        && mime.len() > 6
        && mime[6..]
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
}
