//! Module grid → RGBA bitmap
//!
//! Sizing follows the usual canvas QR rasterizer: the symbol plus its quiet
//! zone is stretched over the requested width with a fractional scale, so the
//! bitmap side equals the requested size exactly. When the requested size
//! cannot give every module at least one pixel, a fixed scale of 4 pixels per
//! module is used instead and the bitmap grows accordingly.

use crate::models::{BitMatrix, Rgb};
use image::RgbaImage;

/// Pixels per module when the requested size is too small
pub const FALLBACK_SCALE: u32 = 4;

/// Pixel geometry of a rasterized symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterLayout {
    /// Modules per side including both quiet zones
    pub total_modules: u32,
    /// Quiet zone in modules
    pub margin: u32,
    /// Bitmap side in pixels
    pub side: u32,
}

impl RasterLayout {
    /// Layout for a symbol of `modules` per side
    pub fn new(modules: u32, margin: u32, requested: u32) -> Self {
        let total_modules = modules + 2 * margin;
        let side = if requested >= total_modules {
            requested
        } else {
            total_modules * FALLBACK_SCALE
        };
        Self {
            total_modules,
            margin,
            side,
        }
    }

    /// Pixels per module (fractional)
    pub fn scale(&self) -> f64 {
        self.side as f64 / self.total_modules as f64
    }

    /// Symbol module covering pixel coordinate `p`, or `None` in the quiet zone.
    ///
    /// Computed as `floor(p * total / side) - margin` in integers, which is
    /// `floor((p - margin * scale) / scale)` without rounding drift.
    pub fn module_at(&self, p: u32) -> Option<usize> {
        let index = (p as u64 * self.total_modules as u64 / self.side as u64) as u32;
        if index < self.margin || index >= self.total_modules - self.margin {
            None
        } else {
            Some((index - self.margin) as usize)
        }
    }

    /// Pixel range `[start, end)` covered by symbol module `index` on either axis.
    ///
    /// Exactly the pixels for which [`RasterLayout::module_at`] returns `index`.
    pub fn module_span(&self, index: usize) -> (u32, u32) {
        let edge = |m: u64| (m * self.side as u64).div_ceil(self.total_modules as u64) as u32;
        let m = self.margin as u64 + index as u64;
        (edge(m), edge(m + 1))
    }
}

/// Rasterize a module grid with the given colours and quiet zone
pub fn rasterize(
    grid: &BitMatrix,
    margin: u32,
    requested: u32,
    foreground: Rgb,
    background: Rgb,
) -> RgbaImage {
    let layout = RasterLayout::new(grid.width() as u32, margin, requested);
    let dark = foreground.to_rgba();
    let light = background.to_rgba();

    // Column lookup is shared by every row
    let columns: Vec<Option<usize>> = (0..layout.side).map(|x| layout.module_at(x)).collect();

    let mut img = RgbaImage::from_pixel(layout.side, layout.side, light);
    for y in 0..layout.side {
        let Some(my) = layout.module_at(y) else {
            continue;
        };
        for (x, column) in columns.iter().enumerate() {
            if let Some(mx) = column {
                if grid.get(*mx, my) {
                    img.put_pixel(x as u32, y, dark);
                }
            }
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(n: usize) -> BitMatrix {
        let mut grid = BitMatrix::new(n, n);
        for y in 0..n {
            for x in 0..n {
                grid.set(x, y, (x + y) % 2 == 0);
            }
        }
        grid
    }

    #[test]
    fn side_matches_request_when_it_fits() {
        let layout = RasterLayout::new(25, 4, 200);
        assert_eq!(layout.total_modules, 33);
        assert_eq!(layout.side, 200);
        assert!((layout.scale() - 200.0 / 33.0).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_fixed_scale() {
        let layout = RasterLayout::new(177, 10, 100);
        assert_eq!(layout.side, 197 * FALLBACK_SCALE);
        assert_eq!(layout.module_at(40), Some(0));
        assert_eq!(layout.module_at(39), None);
    }

    #[test]
    fn quiet_zone_maps_to_none() {
        // 21 modules + 2*2 margin = 25 modules over 100px: exactly 4px each
        let layout = RasterLayout::new(21, 2, 100);
        assert_eq!(layout.module_at(0), None);
        assert_eq!(layout.module_at(7), None);
        assert_eq!(layout.module_at(8), Some(0));
        assert_eq!(layout.module_at(91), Some(20));
        assert_eq!(layout.module_at(92), None);
        assert_eq!(layout.module_at(99), None);
    }

    #[test]
    fn module_spans_partition_the_symbol() {
        for layout in [
            RasterLayout::new(21, 0, 200),
            RasterLayout::new(25, 4, 200),
            RasterLayout::new(21, 2, 100),
        ] {
            let modules = (layout.total_modules - 2 * layout.margin) as usize;
            for index in 0..modules {
                let (start, end) = layout.module_span(index);
                assert!(end > start);
                for p in start..end {
                    assert_eq!(layout.module_at(p), Some(index));
                }
                if index + 1 < modules {
                    assert_eq!(layout.module_span(index + 1).0, end);
                }
            }
        }
        // 21 modules over 200px: pitch 9.52, spans of 9 or 10 pixels
        assert_eq!(RasterLayout::new(21, 0, 200).module_span(0), (0, 10));
        assert_eq!(RasterLayout::new(21, 0, 200).module_span(20), (191, 200));
    }

    #[test]
    fn rasterize_paints_modules_and_background() {
        let grid = checker(21);
        let img = rasterize(&grid, 2, 100, Rgb::BLACK, Rgb::WHITE);
        assert_eq!(img.dimensions(), (100, 100));
        // Quiet zone is background
        assert_eq!(img.get_pixel(0, 0), &Rgb::WHITE.to_rgba());
        // Module (0,0) is dark and spans pixels 8..12
        assert_eq!(img.get_pixel(8, 8), &Rgb::BLACK.to_rgba());
        assert_eq!(img.get_pixel(11, 11), &Rgb::BLACK.to_rgba());
        // Module (1,0) is light
        assert_eq!(img.get_pixel(12, 8), &Rgb::WHITE.to_rgba());
    }

    #[test]
    fn zero_margin_fills_edge_to_edge() {
        let grid = checker(21);
        let img = rasterize(&grid, 0, 105, Rgb::new(10, 20, 30), Rgb::WHITE);
        assert_eq!(img.get_pixel(0, 0), &Rgb::new(10, 20, 30).to_rgba());
        assert_eq!(img.get_pixel(104, 104), &Rgb::new(10, 20, 30).to_rgba());
    }
}
