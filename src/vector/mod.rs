//! Raster-to-vector reconstruction
//!
//! Rebuilds a scalable description of a QR bitmap in three steps: infer the
//! module pitch from the top rows ([`inference`]), classify every grid cell
//! as dark or light ([`classify`]), then emit primitives in paint order
//! ([`svg`]): background, dark modules, logo backing and image, border.
//!
//! Renders produced by this crate already know their module grid, so
//! [`from_grid`] emits the same document straight from it. That path is exact
//! at fractional scales, where pixel inference has to fall back to per-pixel
//! tiling.

pub mod classify;
pub mod inference;
pub mod svg;

use crate::config;
use crate::models::{BitMatrix, QrOptions};
use crate::render::overlay::{BorderLayout, LogoLayout};
use crate::render::raster::RasterLayout;
use crate::utils::binarization::dark_mask;
use image::RgbaImage;

pub use classify::{ModuleCell, classify_modules};
pub use inference::infer_module_size;
pub use svg::{Primitive, Stroke, VectorDocument};

/// Outcome of a reconstruction
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    /// Module side in pixels (always >= 1; fractional only for [`from_grid`])
    pub module_size: f64,
    /// Number of dark-module primitives emitted
    pub dark_modules: usize,
    /// The vector document
    pub document: VectorDocument,
}

impl Reconstruction {
    /// Serialize the document as SVG
    pub fn to_svg_string(&self) -> String {
        self.document.to_svg_string()
    }
}

/// Module side of a bitmap, as inferred from its top rows
pub fn module_size_of(bitmap: &RgbaImage) -> usize {
    infer_module_size(&dark_mask(bitmap, false))
}

/// Reconstruct a vector document from a rendered symbol bitmap.
///
/// `bitmap` should be the bare symbol: the logo is re-emitted as its own
/// primitives, so drawing it into the bitmap first would turn logo pixels
/// into modules.
pub fn reconstruct(bitmap: &RgbaImage, style: &QrOptions) -> Reconstruction {
    let (width, height) = bitmap.dimensions();
    let parallel = width.max(height) >= config::parallel_min_side();
    let mask = dark_mask(bitmap, parallel);

    let module_size = infer_module_size(&mask);
    let cells = classify_modules(&mask, module_size);
    log::debug!(
        "reconstructed {}x{} bitmap: module size {}px, {} dark modules",
        width,
        height,
        module_size,
        cells.len()
    );

    let side = module_size as f64;
    let modules = cells
        .iter()
        .map(|cell| Primitive::square(cell.x as f64, cell.y as f64, side, style.foreground));
    let document = decorate(width, height, modules, style);

    Reconstruction {
        module_size: side,
        dark_modules: cells.len(),
        document,
    }
}

/// Emit the document for a known module grid rasterized with `layout`.
///
/// Each dark module covers exactly the pixels the rasterizer painted for it,
/// so at a fractional scale neighbouring modules are 9 or 10 pixels wide.
pub fn from_grid(grid: &BitMatrix, layout: &RasterLayout, style: &QrOptions) -> Reconstruction {
    let spans: Vec<(u32, u32)> = (0..grid.width()).map(|i| layout.module_span(i)).collect();
    let mut modules = Vec::with_capacity(grid.count_set());
    for (y, &(y0, y1)) in spans.iter().enumerate().take(grid.height()) {
        for (x, &(x0, x1)) in spans.iter().enumerate() {
            if grid.get(x, y) {
                modules.push(Primitive::filled(
                    x0 as f64,
                    y0 as f64,
                    (x1 - x0) as f64,
                    (y1 - y0) as f64,
                    style.foreground,
                ));
            }
        }
    }
    log::debug!(
        "vectorized {}x{} grid at {:.3}px per module, {} dark modules",
        grid.width(),
        grid.height(),
        layout.scale(),
        modules.len()
    );

    let dark_modules = modules.len();
    let document = decorate(layout.side, layout.side, modules, style);
    Reconstruction {
        module_size: layout.scale(),
        dark_modules,
        document,
    }
}

/// Background, then `modules`, then logo and border
fn decorate(
    width: u32,
    height: u32,
    modules: impl IntoIterator<Item = Primitive>,
    style: &QrOptions,
) -> VectorDocument {
    let mut document = VectorDocument::new(width, height);
    document.push_background(style.background);
    document.primitives.extend(modules);

    if let Some(logo) = &style.logo {
        document.push_logo(logo, &LogoLayout::new(width, style.logo_size));
    }
    document.push_border(
        style.border_style,
        style.border_color,
        &BorderLayout::new(width, style.border_width),
    );
    document
}
