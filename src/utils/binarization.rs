use crate::models::BitMatrix;
use crate::utils::brightness::{rgba_to_brightness, rgba_to_brightness_parallel};
use image::RgbaImage;

/// Brightness below which a pixel counts as dark
pub const DARK_THRESHOLD: u8 = 128;

/// Simple global threshold binarization
/// Returns a BitMatrix where true = dark (value strictly below `threshold`)
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            binary.set(x, y, gray[idx] < threshold);
        }
    }

    binary
}

/// Dark-pixel mask of a bitmap at [`DARK_THRESHOLD`]
///
/// Brightness is computed on the rayon pool when `parallel` is set.
pub fn dark_mask(bitmap: &RgbaImage, parallel: bool) -> BitMatrix {
    let (width, height) = (bitmap.width() as usize, bitmap.height() as usize);
    let raw = bitmap.as_raw();
    let brightness = if parallel {
        rgba_to_brightness_parallel(raw, width, height)
    } else {
        rgba_to_brightness(raw, width, height)
    };
    threshold_binarize(&brightness, width, height, DARK_THRESHOLD)
}
