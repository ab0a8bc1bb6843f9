//! Pure calculation functions for variant widths.
//!
//! Nothing here touches an image. The one value that depends on real pixels,
//! the encoded size of the largest variant, comes in through a measuring closure,
//! so everything is testable with plain numbers.

/// Width budget for one density level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    /// Largest width to produce; always the first entry of the result.
    pub max_width: u32,
    /// Floor for generated steps. May be fractional for high-res levels.
    pub min_width: f64,
    /// Desired byte difference between neighbouring variants.
    pub size_diff: u64,
    /// Cap on the number of variants; 0 means uncapped.
    pub max_steps: u32,
}

/// Target width range read off a breakpoint map and clamped to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRange {
    pub min_width: i64,
    pub max_width: u32,
}

/// Clamp the breakpoint map's width range so the base level never exceeds
/// the source's native width.
///
/// Returns `None` when nothing renderable is left (clamped max below 1).
///
/// ```
/// # use srcset_widths::imaging::{TargetRange, clamp_target};
/// // Small source: both ends collapse onto its width
/// assert_eq!(
///     clamp_target(320, 2400, 200),
///     Some(TargetRange { min_width: 200, max_width: 200 })
/// );
/// assert_eq!(clamp_target(320, 2400, 0), None);
/// ```
pub fn clamp_target(map_min: i64, map_max: i64, source_width: u32) -> Option<TargetRange> {
    let max = map_max.min(i64::from(source_width));
    let min = if max < map_min { max } else { map_min };
    if max < 1 {
        return None;
    }
    let max_width = u32::try_from(max).ok()?;
    Some(TargetRange {
        min_width: min,
        max_width,
    })
}

/// Blend factor for `step` of `steps`.
///
/// Half square root, half linear. Filesize grows roughly with the square of
/// the width, so the square-root half keeps the byte gaps at the top of the
/// range from ballooning.
pub fn step_factor(step: u64, steps: u64) -> f64 {
    let ratio = step as f64 / steps as f64;
    0.5 * ratio.sqrt() + 0.5 * ratio
}

/// Number of steps for a largest variant of `filesize` bytes.
pub fn step_count(filesize: u64, size_diff: u64, max_steps: u32) -> u64 {
    let steps = filesize
        .checked_div(size_diff)
        .unwrap_or(u64::from(max_steps));
    if max_steps > 0 && steps > u64::from(max_steps) - 1 {
        u64::from(max_steps)
    } else {
        steps
    }
}

/// Widths to render for one density level, largest first.
///
/// A non-empty `explicit` list wins outright: it is returned sorted
/// descending and `measure` is never called. Otherwise `measure` is asked for
/// the encoded size of the `max_width` variant, and intermediate widths are
/// spread below it until they would drop under `min_width`.
pub fn distribute_widths<E>(
    plan: &StepPlan,
    explicit: &[u32],
    measure: impl FnOnce(u32) -> Result<u64, E>,
) -> Result<Vec<u32>, E> {
    if !explicit.is_empty() {
        let mut widths = explicit.to_vec();
        widths.sort_unstable_by(|a, b| b.cmp(a));
        return Ok(widths);
    }

    let filesize = measure(plan.max_width)?;
    let steps = step_count(filesize, plan.size_diff, plan.max_steps);

    let mut widths = vec![plan.max_width];
    for step in (1..steps).rev() {
        let width = (f64::from(plan.max_width) * step_factor(step, steps)).round();
        if width < plan.min_width {
            break;
        }
        widths.push(width as u32);
    }
    Ok(widths)
}

/// Target ranges for the high-resolution levels, highest density first.
///
/// Level `r` spans `max * r` down to `max * (r - 1) * 1.2`, which keeps its
/// smallest width clear of the level below. `high_res` of 1 yields nothing.
pub fn density_ranges(max_width: u32, high_res: u32) -> Vec<(u32, f64)> {
    (2..=high_res)
        .rev()
        .map(|r| {
            (
                max_width.saturating_mul(r),
                f64::from(max_width) * f64::from(r - 1) * 1.2,
            )
        })
        .collect()
}
