//! # srcset-widths
//!
//! Works out which image widths to produce for an `<img sizes="...">`
//! attribute, and produces them.
//!
//! # Architecture: Sizes In, Widths Out
//!
//! ```text
//! 1. Breakpoints  sizes + viewport bounds  →  viewport → width map
//! 2. Target       map + source width       →  [min, max] width to cover
//! 3. Distribute   target + filesize budget →  ordered variant widths
//! 4. Render       widths                   →  resized images (or estimates)
//! ```
//!
//! Steps 1–3 are pure. Step 4 goes through the [`imaging::ImageSource`]
//! trait, so the same computation runs against real files
//! ([`imaging::FileImage`]) or a filesize model ([`imaging::EstimatedImage`]).
//!
//! ```
//! use srcset_widths::config::{RenderConfig, ViewportContext};
//! use srcset_widths::imaging::{EstimatedImage, ImageSource, get_variants};
//!
//! let viewport = ViewportContext::new(320, 2400, 16).unwrap();
//! let config = RenderConfig::new("100vw").with_size_diff(64_000);
//! let source = EstimatedImage::new("hero", 4800, 1_024_000);
//!
//! let widths: Vec<u32> = get_variants(&source, &config, &viewport)
//!     .unwrap()
//!     .iter()
//!     .map(ImageSource::width)
//!     .collect();
//! assert_eq!(widths, vec![2400, 1939, 1449, 900]);
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`css`] | `calc()` arithmetic, unit conversion and expression reduction |
//! | [`breakpoints`] | Media conditions, per-rule ranges and the aggregated breakpoint map |
//! | [`imaging`] | Target range, step distribution, the `ImageSource` trait and its file/estimate implementations |
//! | [`srcset`] | `srcset` attribute values from rendered variants |
//! | [`config`] | Viewport and render settings, `srcset-widths.toml` loading and merging |
//! | [`process`] | Batch rendering of files and directories with a JSON manifest |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Degrade, Don't Fail
//!
//! Authors write `sizes` attributes by hand and browsers forgive a lot. A rule
//! that cannot be resolved here (percentages, typos, unsupported media
//! features) is skipped rather than reported, and a string where nothing
//! resolves falls back to the configured viewport bounds. The only errors
//! [`imaging::get_variants`] returns come from the image source itself.
//!
//! ## Even Filesize Steps
//!
//! Variants are not spaced evenly in width. Filesize grows roughly with the
//! square of the width, so equal width steps would put large byte gaps at
//! the top and near-duplicates at the bottom. The distribution blends a
//! square-root and a linear curve so neighbouring files differ by roughly the
//! configured `size_diff`.
//!
//! ## The Largest Variant Sets the Step Count
//!
//! How many steps fit depends on the encoded size of the largest variant,
//! which is only known after encoding it. That image is rendered first and
//! kept, never rendered twice.

pub mod breakpoints;
pub mod config;
pub mod css;
pub mod imaging;
pub mod output;
pub mod process;
pub mod srcset;

#[cfg(test)]
pub(crate) mod test_helpers;
