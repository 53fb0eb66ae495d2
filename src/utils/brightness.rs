//! Per-pixel brightness as the plain average of R, G and B
//!
//! Alpha is ignored: rendered QR canvases are fully opaque, and the
//! reconstruction treats a pixel by its colour alone.

use rayon::prelude::*;

/// Brightness of one pixel, `floor((r + g + b) / 3)`
#[inline]
pub fn pixel_brightness(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

/// Convert an RGBA buffer to one brightness byte per pixel
pub fn rgba_to_brightness(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    rgba.chunks_exact(4)
        .take(pixel_count)
        .map(|px| pixel_brightness(px[0], px[1], px[2]))
        .collect()
}

/// Convert an RGBA buffer to brightness, processing rows in parallel
pub fn rgba_to_brightness_parallel(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; width * height];
    if width == 0 {
        return out;
    }

    out.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 4;
        for (x, value) in row.iter_mut().enumerate() {
            let idx = row_start + x * 4;
            *value = pixel_brightness(rgba[idx], rgba[idx + 1], rgba[idx + 2]);
        }
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_brightness() {
        assert_eq!(pixel_brightness(255, 255, 255), 255);
        assert_eq!(pixel_brightness(0, 0, 0), 0);
        // Pure red averages to a third
        assert_eq!(pixel_brightness(255, 0, 0), 85);
        // 127.67 floors to 127
        assert_eq!(pixel_brightness(128, 128, 127), 127);
    }

    #[test]
    fn test_rgba_to_brightness_ignores_alpha() {
        let rgba = vec![30, 60, 90, 0, 255, 255, 255, 10];
        let out = rgba_to_brightness(&rgba, 2, 1);
        assert_eq!(out, vec![60, 255]);
    }

    #[test]
    fn test_parallel_matches_scalar() {
        let (width, height) = (37, 23);
        let rgba: Vec<u8> = (0..width * height * 4).map(|i| (i * 7 % 256) as u8).collect();
        assert_eq!(
            rgba_to_brightness(&rgba, width, height),
            rgba_to_brightness_parallel(&rgba, width, height)
        );
    }

    #[test]
    fn test_zero_width() {
        assert!(rgba_to_brightness_parallel(&[], 0, 5).is_empty());
    }
}
