//! Bridge to the external QR symbol encoder (`qrcode` crate)

use crate::error::{Error, Result};
use crate::models::{BitMatrix, ECLevel};
use qrcode::{Color, QrCode};

/// Encode `content` into a square module grid (true = dark), without quiet zone
pub fn encode_symbol(content: &str, level: ECLevel) -> Result<BitMatrix> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), level.into())
        .map_err(|e| Error::Encode(e.to_string()))?;

    let width = code.width();
    let mut grid = BitMatrix::new(width, width);
    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color == Color::Dark {
            grid.set(i % width, i / width, true);
        }
    }

    log::debug!(
        "encoded {} bytes at level {} into {}x{} modules",
        content.len(),
        level,
        width,
        width
    );
    Ok(grid)
}
