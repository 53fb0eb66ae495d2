//! Per-module darkness classification
//!
//! Cells are visited row-major on a grid of `module_size` pixels. Each cell is
//! subsampled with a stride of half the module size and is dark only on a
//! strict majority of dark samples, so a 50/50 cell resolves to light.

use crate::config;
use crate::models::BitMatrix;
use rayon::prelude::*;

/// Pixel origin of a dark module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleCell {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
}

/// Number of cells per side for a bitmap of `side` pixels
pub fn grid_side(side: usize, module_size: usize) -> usize {
    side.div_ceil(module_size.max(1))
}

/// Classify the cell whose top-left pixel is `(x0, y0)`
pub fn is_dark_cell(mask: &BitMatrix, x0: usize, y0: usize, module_size: usize) -> bool {
    let module_size = module_size.max(1);
    let stride = (module_size / 2).max(1);
    let x_end = (x0 + module_size).min(mask.width());
    let y_end = (y0 + module_size).min(mask.height());

    let mut dark = 0usize;
    let mut total = 0usize;
    for y in (y0..y_end).step_by(stride) {
        for x in (x0..x_end).step_by(stride) {
            total += 1;
            if mask.get(x, y) {
                dark += 1;
            }
        }
    }

    dark * 2 > total
}

fn classify_row(mask: &BitMatrix, row: usize, module_size: usize) -> Vec<ModuleCell> {
    let y0 = row * module_size;
    (0..grid_side(mask.width(), module_size))
        .map(|col| col * module_size)
        .filter(|&x0| is_dark_cell(mask, x0, y0, module_size))
        .map(|x0| ModuleCell {
            x: x0 as u32,
            y: y0 as u32,
        })
        .collect()
}

/// Dark modules of `mask` in row-major order
pub fn classify_modules(mask: &BitMatrix, module_size: usize) -> Vec<ModuleCell> {
    let module_size = module_size.max(1);
    let rows = grid_side(mask.height(), module_size);
    let parallel = mask.width().max(mask.height()) >= config::parallel_min_side() as usize;

    if parallel {
        // Indexed collect keeps row order
        let per_row: Vec<Vec<ModuleCell>> = (0..rows)
            .into_par_iter()
            .map(|row| classify_row(mask, row, module_size))
            .collect();
        per_row.into_iter().flatten().collect()
    } else {
        (0..rows)
            .flat_map(|row| classify_row(mask, row, module_size))
            .collect()
    }
}
