//! Process-level tunables read once from the environment

use std::path::PathBuf;
use std::sync::OnceLock;

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

static JPEG_QUALITY: OnceLock<u8> = OnceLock::new();

/// JPEG export quality (`QR_JPEG_QUALITY`, default 90)
pub fn jpeg_quality() -> u8 {
    *JPEG_QUALITY.get_or_init(|| parse_env_u8("QR_JPEG_QUALITY", 90).clamp(1, 100))
}

static OUTPUT_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Directory exports are written to (`QR_OUTPUT_DIR`, default `.`)
pub fn output_dir() -> PathBuf {
    OUTPUT_DIR
        .get_or_init(|| {
            std::env::var("QR_OUTPUT_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
        })
        .clone()
}

static PARALLEL_MIN_SIDE: OnceLock<u32> = OnceLock::new();

/// Bitmap side at which module classification switches to rayon
/// (`QR_PARALLEL_MIN_SIDE`, default 256)
pub(crate) fn parallel_min_side() -> u32 {
    *PARALLEL_MIN_SIDE.get_or_init(|| parse_env_u32("QR_PARALLEL_MIN_SIDE", 256).max(1))
}
