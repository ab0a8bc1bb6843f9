//! Shared test utilities for the srcset-widths test suite.
//!
//! Synthetic images on disk and small shorthands for the values most tests
//! build over and over.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_test_jpeg(&tmp.path().join("hero.jpg"), 400, 300);
//!
//! let map = aggregate("80vw", &viewport(120, 2400));
//! assert_eq!(map_entries(&map), vec![(120, 96), (2400, 1920)]);
//! ```

use std::path::Path;

use image::{ImageEncoder, RgbImage};

use crate::breakpoints::BreakpointMap;
use crate::config::ViewportContext;

// =========================================================================
// Image fixtures
// =========================================================================

/// Write a small valid JPEG with a colour gradient.
///
/// The gradient keeps the encoder from collapsing the file to a few bytes,
/// so larger images produce larger files.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Value shorthands
// =========================================================================

/// Viewport bounds with the default 16px root font size. Panics if invalid.
pub fn viewport(min_width: u32, max_width: u32) -> ViewportContext {
    ViewportContext::new(min_width, max_width, 16)
        .unwrap_or_else(|e| panic!("bad test viewport {min_width}..{max_width}: {e}"))
}

/// Breakpoint map as `(viewport, width)` pairs in ascending viewport order.
pub fn map_entries(map: &BreakpointMap) -> Vec<(i64, i64)> {
    map.iter().map(|b| (b.viewport, b.width)).collect()
}
