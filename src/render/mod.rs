//! Rendering: content + options → bitmaps
//!
//! [`render`] is a pure function of its inputs. It encodes the content at the
//! effective error correction level, rasterizes the bare symbol, then composes
//! logo and border on a copy. Both bitmaps are kept: raster exports use the
//! composite, pixel reconstruction uses the bare symbol. The vector export
//! is emitted from the module grid.

pub mod overlay;
pub mod raster;

use crate::encoder::encode_symbol;
use crate::error::{Error, Result};
use crate::models::{BitMatrix, BorderStyle, ECLevel, QrOptions};
use crate::vector::{self, Reconstruction};
use raster::RasterLayout;
use image::RgbaImage;
use std::fmt;

/// A finished render
#[derive(Debug, Clone)]
pub struct Render {
    content: String,
    options: QrOptions,
    ec_level: ECLevel,
    grid: BitMatrix,
    symbol: RgbaImage,
    composite: RgbaImage,
}

impl Render {
    /// Encoded content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Options the render was produced with (normalized)
    pub fn options(&self) -> &QrOptions {
        &self.options
    }

    /// Level actually requested from the encoder
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Module grid from the encoder, without quiet zone
    pub fn grid(&self) -> &BitMatrix {
        &self.grid
    }

    /// Bare symbol bitmap (modules and quiet zone only)
    pub fn symbol(&self) -> &RgbaImage {
        &self.symbol
    }

    /// Symbol with logo and border drawn in
    pub fn composite(&self) -> &RgbaImage {
        &self.composite
    }

    /// Bitmap side in pixels
    pub fn side(&self) -> u32 {
        self.composite.width()
    }

    /// Vector document of this render, emitted from the module grid
    pub fn to_vector(&self) -> Reconstruction {
        let layout = RasterLayout::new(
            self.grid.width() as u32,
            self.options.margin,
            self.options.size,
        );
        vector::from_grid(&self.grid, &layout, &self.options)
    }

    /// Vector document rebuilt from the symbol pixels alone
    pub fn reconstruct(&self) -> Reconstruction {
        vector::reconstruct(&self.symbol, &self.options)
    }

    /// Summary for display next to the preview
    pub fn info(&self) -> RenderInfo {
        RenderInfo {
            size: self.side(),
            margin: self.options.margin,
            ec_level: self.ec_level,
            characters: self.content.chars().count(),
            border: self.options.border_style,
        }
    }
}

/// Render summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderInfo {
    /// Bitmap side in pixels
    pub size: u32,
    /// Quiet zone in modules
    pub margin: u32,
    /// Effective error correction level
    pub ec_level: ECLevel,
    /// Content length in characters
    pub characters: usize,
    /// Border style
    pub border: BorderStyle,
}

impl fmt::Display for RenderInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size:       {}px", self.size)?;
        writeln!(f, "Margin:     {}", self.margin)?;
        writeln!(f, "Correction: {}", self.ec_level.label())?;
        writeln!(f, "Characters: {}", self.characters)?;
        write!(f, "Border:     {}", self.border.label())
    }
}

/// Render `content` with `options`.
///
/// Whitespace-only content is rejected with [`Error::EmptyContent`]; callers
/// that show a placeholder instead should check before calling.
pub fn render(content: &str, options: &QrOptions) -> Result<Render> {
    if content.trim().is_empty() {
        return Err(Error::EmptyContent);
    }

    let options = options.clone().normalized();
    let ec_level = options.effective_ec_level();
    if ec_level != options.ec_level {
        log::debug!(
            "logo present: correction level {} raised to {}",
            options.ec_level,
            ec_level
        );
    }

    let grid = encode_symbol(content, ec_level)?;
    let symbol = raster::rasterize(
        &grid,
        options.margin,
        options.size,
        options.foreground,
        options.background,
    );
    let composite = overlay::compose(&symbol, &options)?;

    Ok(Render {
        content: content.to_string(),
        options,
        ec_level,
        grid,
        symbol,
        composite,
    })
}
