//! Utility functions for pixel analysis
//!
//! This module provides helper functions for raster-to-vector reconstruction:
//! - Brightness (RGBA to channel average)
//! - Binarization (fixed-threshold dark masks)

pub mod binarization;
pub mod brightness;
