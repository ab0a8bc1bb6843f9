//! CLI output formatting for all commands.
//!
//! # Output Format
//!
//! ## Breakpoints
//!
//! ```text
//! Breakpoints for "(width <= 800px) 80vw, 800px"
//!     120px → 96px
//!     800px → 640px
//!     801px → 800px
//!     2400px → 800px
//! Widths: 96px to 800px
//! ```
//!
//! ## Plan
//!
//! ```text
//! Source: 4800px, 1000.0 KB
//! Target: 320px to 2400px
//! 001 2400px (250.0 KB)
//! 002 1939px (163.2 KB)
//!     ...
//! srcset: image-2400w.jpg 2400w, image-1939w.jpg 1939w, ...
//! ```
//!
//! ## Render
//!
//! ```text
//! Rendering 2 images
//! 001 photos/dawn.jpg (4000px)
//!     2400px: 412.3 KB
//!     1939px: 288.0 KB
//! Rendered 2 images, 7 variants
//!     Manifest: variants/manifest.json
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.

use crate::breakpoints::BreakpointMap;
use crate::imaging::{ImageSource, TargetRange};
use crate::process::{Manifest, ProcessEvent};
use crate::srcset::srcset;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte count.
fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// One numbered variant line: `001 2400px (250.0 KB)`.
fn variant_line(index: usize, width: u32, filesize: u64) -> String {
    format!("{} {}px ({})", format_index(index), width, format_size(filesize))
}

// ============================================================================
// breakpoints
// ============================================================================

/// Format a breakpoint map, one `viewport → width` line per entry.
pub fn format_breakpoints(sizes: &str, map: &BreakpointMap) -> Vec<String> {
    let mut lines = vec![format!("Breakpoints for {:?}", sizes)];
    for point in map.iter() {
        lines.push(format!(
            "{}{}px \u{2192} {}px",
            indent(1),
            point.viewport,
            point.width
        ));
    }
    if let (Some(min), Some(max)) = (map.min_width(), map.max_width()) {
        lines.push(format!("Widths: {}px to {}px", min, max));
    }
    lines
}

/// Print a breakpoint map to stdout.
pub fn print_breakpoints(sizes: &str, map: &BreakpointMap) {
    for line in format_breakpoints(sizes, map) {
        println!("{}", line);
    }
}

// ============================================================================
// plan
// ============================================================================

/// Format a planned variant list for a source of the given size.
pub fn format_plan<I: ImageSource>(
    source_width: u32,
    source_filesize: u64,
    range: Option<TargetRange>,
    variants: &[I],
) -> Vec<String> {
    let mut lines = vec![format!(
        "Source: {}px, {}",
        source_width,
        format_size(source_filesize)
    )];
    match range {
        Some(range) => lines.push(format!(
            "Target: {}px to {}px",
            range.min_width, range.max_width
        )),
        None => lines.push("Target: none, source used as is".to_string()),
    }
    for (i, variant) in variants.iter().enumerate() {
        lines.push(variant_line(i + 1, variant.width(), variant.filesize()));
    }
    let srcset = srcset(variants);
    if !srcset.is_empty() {
        lines.push(format!("srcset: {}", srcset));
    }
    lines
}

/// Print a planned variant list to stdout.
pub fn print_plan<I: ImageSource>(
    source_width: u32,
    source_filesize: u64,
    range: Option<TargetRange>,
    variants: &[I],
) {
    for line in format_plan(source_width, source_filesize, range, variants) {
        println!("{}", line);
    }
}

// ============================================================================
// render
// ============================================================================

/// Format a single render progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started { image_count } => {
            let noun = if *image_count == 1 { "image" } else { "images" };
            vec![format!("Rendering {} {}", image_count, noun)]
        }
        ProcessEvent::ImageProcessed {
            index,
            source_path,
            source_width,
            variants,
        } => {
            let mut lines = vec![format!(
                "{} {} ({}px)",
                format_index(*index),
                source_path,
                source_width
            )];
            for variant in variants {
                lines.push(format!(
                    "{}{}px: {}",
                    indent(1),
                    variant.width,
                    format_size(variant.filesize)
                ));
            }
            lines
        }
    }
}

/// Format the summary printed after a render run.
pub fn format_render_summary(manifest: &Manifest, manifest_path: &Path) -> Vec<String> {
    let variant_count: usize = manifest.images.iter().map(|i| i.variants.len()).sum();
    vec![
        format!(
            "Rendered {} images, {} variants",
            manifest.images.len(),
            variant_count
        ),
        format!("{}Manifest: {}", indent(1), manifest_path.display()),
    ]
}

/// Print the render summary to stdout.
pub fn print_render_summary(manifest: &Manifest, manifest_path: &Path) {
    for line in format_render_summary(manifest, manifest_path) {
        println!("{}", line);
    }
}
