//! Module-size inference by edge-transition sampling
//!
//! Walks the top rows of a dark mask and measures runs of equal colour. Only
//! runs closed by a transition on both sides count; runs that touch the left
//! or right edge are quiet zone or clipped and say nothing about the module
//! pitch. The shortest such run is taken as one module, and every other run
//! must be a whole number of modules for the estimate to stand.

use crate::models::BitMatrix;

/// Rows sampled from the top of the bitmap
pub const SAMPLE_ROWS: usize = 10;

/// Estimate the side of one module in pixels.
///
/// The pitch is the shortest bounded run over the sampled rows, clamped to
/// `[1, width / 10]`. It falls back to 1 (per-pixel tiling) when the rows
/// carry no bounded runs, when some run is not a whole multiple of the pitch
/// (a fractional scale such as 9.52px), or when the pitch does not divide the
/// width. A grid of the returned size therefore always tiles the bitmap and
/// every sampled run.
pub fn infer_module_size(mask: &BitMatrix) -> usize {
    let width = mask.width();
    let upper = (width / 10).max(1);
    let runs: Vec<usize> = (0..mask.height().min(SAMPLE_ROWS))
        .flat_map(|y| bounded_runs(mask, y))
        .collect();

    let Some(&shortest) = runs.iter().min() else {
        return 1;
    };
    let size = shortest.clamp(1, upper);
    if runs.iter().any(|run| run % size != 0) {
        log::debug!("runs are not whole multiples of {size}px, tiling per pixel");
        return 1;
    }
    if width % size != 0 {
        log::debug!("{size}px does not tile a {width}px row, tiling per pixel");
        return 1;
    }
    size
}

/// Lengths of the runs in row `y` with a transition on both ends
fn bounded_runs(mask: &BitMatrix, y: usize) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut pixels = mask.row(y);
    let Some(mut current) = pixels.next() else {
        return runs;
    };
    let mut run = 1usize;
    let mut opened = false;

    for dark in pixels {
        if dark == current {
            run += 1;
            continue;
        }
        if opened {
            runs.push(run);
        }
        opened = true;
        current = dark;
        run = 1;
    }

    runs
}
