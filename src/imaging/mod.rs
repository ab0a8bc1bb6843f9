//! Variant widths and the images behind them.
//!
//! | Operation | Where |
//! |---|---|
//! | **Target range** | breakpoint map clamped to the source width |
//! | **Step distribution** | sqrt/linear blend over a filesize budget |
//! | **Resize → JPEG** | Lanczos3 + `JpegEncoder` ([`FileImage`]) |
//! | **Estimate** | quadratic filesize model ([`EstimatedImage`]) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for width math (unit testable)
//! - **Parameters**: Output settings and variant naming
//! - **Backend**: [`ImageSource`] trait, implemented by [`FileImage`] and [`EstimatedImage`]
//! - **Operations**: High-level functions combining calculations + an image source

pub mod backend;
mod calculations;
pub mod estimate;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageSource};
pub use calculations::{
    StepPlan, TargetRange, clamp_target, density_ranges, distribute_widths, step_count,
    step_factor,
};
pub use estimate::{EstimatedImage, estimate_filesize};
pub use operations::{get_variants, target_range};
pub use params::{OutputSettings, Quality, join_public_path, variant_file_name};
pub use rust_backend::{FileImage, is_supported_image, source_stem, supported_input_extensions};
