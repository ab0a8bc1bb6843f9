//! High-level variant operations.
//!
//! These functions combine breakpoint resolution, the pure width
//! calculations and an [`ImageSource`]. They decide which widths to render
//! and ask the source for each one.

use super::backend::{BackendError, ImageSource};
use super::calculations::{
    StepPlan, TargetRange, clamp_target, density_ranges, distribute_widths,
};
use crate::breakpoints::aggregate;
use crate::config::{RenderConfig, ViewportContext};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Target width range for a source of `source_width` pixels.
///
/// `None` means nothing can be rendered and the source should be used as is.
pub fn target_range(
    config: &RenderConfig,
    viewport: &ViewportContext,
    source_width: u32,
) -> Option<TargetRange> {
    let map = aggregate(config.sizes(), viewport);
    let range = clamp_target(map.min_width()?, map.max_width()?, source_width);
    match range {
        Some(range) => log::debug!(
            "sizes {:?} on {}px source: target {}..={}px",
            config.sizes(),
            source_width,
            range.min_width,
            range.max_width
        ),
        None => log::debug!(
            "sizes {:?} on {}px source: nothing to render",
            config.sizes(),
            source_width
        ),
    }
    range
}

/// Render every variant of `source` needed for `config`.
///
/// High-resolution levels come first, highest density first, then the base
/// level. Each level is ordered by descending width. The base level never
/// exceeds the source's width; high-resolution levels may.
///
/// When the target range collapses below one pixel the result is just a
/// copy of `source`.
pub fn get_variants<I: ImageSource + Clone>(
    source: &I,
    config: &RenderConfig,
    viewport: &ViewportContext,
) -> Result<Vec<I>> {
    let Some(target) = target_range(config, viewport, source.width()) else {
        return Ok(vec![source.clone()]);
    };

    let mut variants = Vec::new();
    if config.render_sizes().is_empty() {
        for (max_width, min_width) in density_ranges(target.max_width, config.high_res()) {
            let plan = StepPlan {
                max_width,
                min_width,
                size_diff: config.size_diff(),
                max_steps: config.max_steps(),
            };
            variants.extend(render_level(source, &plan, &[])?);
        }
    }

    let base = StepPlan {
        max_width: target.max_width,
        min_width: target.min_width as f64,
        size_diff: config.size_diff(),
        max_steps: config.max_steps(),
    };
    variants.extend(render_level(source, &base, config.render_sizes())?);
    Ok(variants)
}

/// Render one density level.
///
/// The largest variant is also the one whose filesize is measured, so it is rendered
/// exactly once.
fn render_level<I: ImageSource>(source: &I, plan: &StepPlan, explicit: &[u32]) -> Result<Vec<I>> {
    let mut images = Vec::new();
    let widths = distribute_widths(plan, explicit, |width| {
        let largest = source.resize(width)?;
        let filesize = largest.filesize();
        images.push(largest);
        Ok::<_, BackendError>(filesize)
    })?;

    for &width in widths.iter().skip(images.len()) {
        images.push(source.resize(width)?);
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{BrokenImage, DummyImage};

    fn viewport() -> ViewportContext {
        ViewportContext::new(320, 2400, 16).unwrap()
    }

    fn widths<I: ImageSource>(variants: &[I]) -> Vec<u32> {
        variants.iter().map(ImageSource::width).collect()
    }

    fn config(sizes: &str, max_steps: i64, size_diff: i64, high_res: i64) -> RenderConfig {
        RenderConfig::new(sizes)
            .with_max_steps(max_steps)
            .with_size_diff(size_diff)
            .with_high_res(high_res)
    }

    #[test]
    fn small_source_keeps_its_width() {
        let config = config("100vw", 5, 500_000, 1);
        let variants = get_variants(&DummyImage::new(200, 5000), &config, &viewport()).unwrap();
        assert_eq!(widths(&variants), vec![200]);
    }

    #[test]
    fn large_source_clamps_to_max_viewport() {
        let config = config("100vw", 5, 500_000, 1);
        let variants =
            get_variants(&DummyImage::new(4000, 320_000), &config, &viewport()).unwrap();
        assert_eq!(widths(&variants), vec![2400]);
    }

    #[test]
    fn retina_adds_double_width_level_first() {
        let config = config("100vw", 5, 500_000, 2);
        let small = get_variants(&DummyImage::new(200, 5000), &config, &viewport()).unwrap();
        assert_eq!(widths(&small), vec![400, 200]);
        let large = get_variants(&DummyImage::new(4000, 320_000), &config, &viewport()).unwrap();
        assert_eq!(widths(&large), vec![4800, 2400]);
    }

    #[test]
    fn three_density_levels_highest_first() {
        let config = config("100vw", 5, 500_000, 3);
        let variants =
            get_variants(&DummyImage::new(4000, 320_000), &config, &viewport()).unwrap();
        assert_eq!(widths(&variants), vec![7200, 4800, 2400]);
    }

    #[test]
    fn rem_size_scales_rem_lengths() {
        let config = RenderConfig::new("20rem").with_max_steps(1);
        let source = DummyImage::new(4000, 320_000);

        let large_rem = ViewportContext::new(320, 2400, 20).unwrap();
        let variants = get_variants(&source, &config, &large_rem).unwrap();
        assert_eq!(widths(&variants), vec![400]);

        let small_rem = ViewportContext::new(320, 2400, 10).unwrap();
        let variants = get_variants(&source, &config, &small_rem).unwrap();
        assert_eq!(widths(&variants), vec![200]);
    }

    #[test]
    fn max_viewport_bounds_viewport_lengths() {
        let config = RenderConfig::new("80vw").with_max_steps(1);
        let source = DummyImage::new(4000, 320_000);

        let narrow = ViewportContext::new(320, 1600, 16).unwrap();
        let variants = get_variants(&source, &config, &narrow).unwrap();
        assert_eq!(widths(&variants), vec![1280]);

        let wide = ViewportContext::new(320, 3000, 16).unwrap();
        let variants = get_variants(&source, &config, &wide).unwrap();
        assert_eq!(widths(&variants), vec![2400]);
    }

    #[test]
    fn steps_spread_by_filesize() {
        let config = config("100vw", 10, 64_000, 1);
        let variants =
            get_variants(&DummyImage::new(4800, 1_024_000), &config, &viewport()).unwrap();
        assert_eq!(widths(&variants), vec![2400, 1939, 1449, 900]);
    }

    #[test]
    fn largest_variant_rendered_once() {
        let config = config("100vw", 10, 64_000, 1);
        let source = DummyImage::new(4800, 1_024_000);
        get_variants(&source, &config, &viewport()).unwrap();
        assert_eq!(source.recorded_resizes(), vec![2400, 1939, 1449, 900]);
    }

    #[test]
    fn explicit_render_sizes_replace_distribution() {
        let config = config("100vw", 10, 5_000, 3).with_render_sizes(vec![800, 1200, 300]);
        let source = DummyImage::new(1000, 200_000);
        let variants = get_variants(&source, &config, &viewport()).unwrap();
        // high-res levels are skipped and explicit widths pass through as given
        assert_eq!(widths(&variants), vec![1200, 800, 300]);
        assert_eq!(source.recorded_resizes(), vec![1200, 800, 300]);
    }

    #[test]
    fn base_level_never_exceeds_source() {
        let config = config("(min-width: 1000px) 50vw, 100vw", 10, 5_000, 1);
        let variants =
            get_variants(&DummyImage::new(700, 400_000), &config, &viewport()).unwrap();
        assert!(!variants.is_empty());
        assert!(variants.iter().all(|v| v.width() <= 700));
    }

    #[test]
    fn negative_target_returns_source() {
        let config = RenderConfig::new("-10px");
        let source = DummyImage::new(4000, 320_000);
        let variants = get_variants(&source, &config, &viewport()).unwrap();
        assert_eq!(widths(&variants), vec![4000]);
        assert!(source.recorded_resizes().is_empty());
    }

    #[test]
    fn zero_width_source_returns_source() {
        let variants =
            get_variants(&DummyImage::new(0, 0), &RenderConfig::default(), &viewport()).unwrap();
        assert_eq!(widths(&variants), vec![0]);
    }

    #[test]
    fn repeated_runs_agree() {
        let config = config("(max-width: 800px) 100vw, 50vw", 10, 20_000, 2);
        let source = DummyImage::new(3000, 900_000);
        let first = widths(&get_variants(&source, &config, &viewport()).unwrap());
        let second = widths(&get_variants(&source, &config, &viewport()).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn resize_failure_propagates() {
        let result = get_variants(&BrokenImage, &RenderConfig::default(), &viewport());
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn target_range_reads_breakpoint_extremes() {
        let config = RenderConfig::new("(max-width: 800px) 100vw, 50vw");
        let range = target_range(&config, &viewport(), 4000).unwrap();
        // 320px at the narrow end, 50vw of 2400 at the wide end
        assert_eq!(range.min_width, 320);
        assert_eq!(range.max_width, 1200);
    }
}
