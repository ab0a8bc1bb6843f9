//! Breakpoints: which image width each viewport width needs.
//!
//! A `sizes` attribute is an ordered list of rules. The browser picks the
//! first rule whose media condition matches the current viewport. This
//! module evaluates that list over a viewport *interval* instead of a single
//! width, producing the image width required at each end of every sub-range
//! a rule governs:
//!
//! ```text
//! "(width <= 800px) 80vw, (width <= 1600px) 40vw, 800px"   over [120, 2400]
//!
//!   rule 1 → [120, 800]    120→96    800→640
//!   rule 2 → [801, 1600]   801→320   1600→640
//!   rule 3 → [1601, 2400]  1601→800  2400→800
//! ```
//!
//! Rules that cannot be resolved (unsupported units, malformed values)
//! contribute nothing. If no rule resolves at all, the map falls back to the
//! viewport bounds themselves.

use crate::config::ViewportContext;
use crate::css::calc::{closing_paren, reduce, reduce_to_number};
use crate::css::units::BaseViewport;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

fn bound_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("bound pattern must compile")
}

// The operator is optional in the exclusive forms, so `width 800` narrows
// both sides. `<=` and `>=` never match them: `=` is not a digit.
static INCLUSIVE_MAX: LazyLock<Regex> =
    LazyLock::new(|| bound_pattern(r"(?:max-width:|width\s*<=)\s*([0-9]+)"));
static EXCLUSIVE_MAX: LazyLock<Regex> =
    LazyLock::new(|| bound_pattern(r"width\s*<?\s*([0-9]+)"));
static INCLUSIVE_MIN: LazyLock<Regex> =
    LazyLock::new(|| bound_pattern(r"(?:min-width:|width\s*>=)\s*([0-9]+)"));
static EXCLUSIVE_MIN: LazyLock<Regex> =
    LazyLock::new(|| bound_pattern(r"width\s*>?\s*([0-9]+)"));

/// A closed range of viewport widths. May be empty (`min > max`) after
/// narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub min: i64,
    pub max: i64,
}

impl Interval {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl From<&ViewportContext> for Interval {
    fn from(viewport: &ViewportContext) -> Self {
        Self::new(viewport.min_width().into(), viewport.max_width().into())
    }
}

/// Bounds extracted from a media condition.
///
/// A bound that is `None` leaves the caller's interval untouched on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Condition {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Condition {
    /// Extract bounds from an already unit-reduced condition.
    ///
    /// Four comparisons are looked for, each at its leftmost occurrence:
    ///
    /// 1. `max-width: N` or `width <= N` → upper bound `N`
    /// 2. `width < N` → upper bound `N - 1`
    /// 3. `min-width: N` or `width >= N` → lower bound `N`
    /// 4. `width > N` → lower bound `N + 1`
    ///
    /// When both forms for one side are present the tighter one wins.
    /// Only the integer part of `N` is read.
    pub fn parse(query: &str) -> Self {
        let inclusive_max = first_number(&INCLUSIVE_MAX, query);
        let exclusive_max = first_number(&EXCLUSIVE_MAX, query).map(|n| n - 1);
        let inclusive_min = first_number(&INCLUSIVE_MIN, query);
        let exclusive_min = first_number(&EXCLUSIVE_MIN, query).map(|n| n.saturating_add(1));

        Self {
            min: tightest(inclusive_min, exclusive_min, i64::max),
            max: tightest(inclusive_max, exclusive_max, i64::min),
        }
    }

    /// Narrow `interval` to the bounds of this condition.
    pub fn apply(&self, interval: Interval) -> Interval {
        Interval {
            min: self.min.map_or(interval.min, |min| interval.min.max(min)),
            max: self.max.map_or(interval.max, |max| interval.max.min(max)),
        }
    }
}

fn tightest(a: Option<i64>, b: Option<i64>, pick: fn(i64, i64) -> i64) -> Option<i64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (a, b) => a.or(b),
    }
}

/// The first capture group of `pattern`'s leftmost match, as an integer.
fn first_number(pattern: &Regex, query: &str) -> Option<i64> {
    pattern.captures(query)?.get(1)?.as_str().parse().ok()
}

/// Split a rule into its optional parenthesized condition and its value.
///
/// `"(max-width: 800px) 90vw"` → `(Some("max-width: 800px"), "90vw")`. The
/// closing parenthesis must be followed by whitespace; otherwise the whole
/// rule is treated as a bare value.
pub fn split_rule(rule: &str) -> (Option<&str>, &str) {
    let trimmed = rule.trim_start();
    let Some(inner) = trimmed.strip_prefix('(') else {
        return (None, rule);
    };
    let Some(close) = closing_paren(inner) else {
        return (None, rule);
    };
    let after = &inner[close + 1..];
    if !after.starts_with(|c: char| c.is_whitespace()) {
        return (None, rule);
    }
    (Some(&inner[..close]), after.trim_start())
}

/// One resolved point: at viewport width `viewport`, the image is `width` px.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub viewport: i64,
    pub width: i64,
}

/// Result of resolving one rule over an interval: zero, one or two points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakpointRange {
    points: Vec<Breakpoint>,
}

impl BreakpointRange {
    fn insert(&mut self, point: Breakpoint) {
        match self.points.iter_mut().find(|p| p.viewport == point.viewport) {
            Some(existing) => existing.width = point.width,
            None => self.points.push(point),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Both ends of the range, if it has two points in ascending order.
    pub fn bounds(&self) -> Option<(Breakpoint, Breakpoint)> {
        match self.points[..] {
            [lo, hi] if lo.viewport < hi.viewport => Some((lo, hi)),
            _ => None,
        }
    }
}

/// Resolve one size rule over `interval`.
///
/// A leading condition narrows the interval (see [`Condition::parse`]); its
/// units resolve against the maximum viewport width. The value is then
/// evaluated with the interval's lower and upper end as viewport width.
/// Values that do not reduce to a number, or reduce to zero, are omitted.
pub fn resolve_range(rule: &str, interval: Interval, viewport: &ViewportContext) -> BreakpointRange {
    let rem_size = f64::from(viewport.rem_size());
    let (condition, value) = split_rule(rule);

    let interval = match condition {
        Some(query) => {
            let base = BaseViewport::with_width(f64::from(viewport.max_width()));
            Condition::parse(&reduce(query, base, rem_size)).apply(interval)
        }
        None => interval,
    };

    let mut range = BreakpointRange::default();
    for at in [interval.min, interval.max] {
        let base = BaseViewport::with_width(at as f64);
        match reduce_to_number(value, base, rem_size) {
            Some(width) if width != 0.0 => range.insert(Breakpoint {
                viewport: at,
                width: width.round() as i64,
            }),
            _ => log::debug!("size value {value:?} did not resolve at viewport {at}"),
        }
    }
    range
}

/// Viewport width → required image width, ordered by viewport width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakpointMap(BTreeMap<i64, i64>);

impl BreakpointMap {
    pub fn get(&self, viewport: i64) -> Option<i64> {
        self.0.get(&viewport).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Breakpoint> + '_ {
        self.0.iter().map(|(&viewport, &width)| Breakpoint { viewport, width })
    }

    /// Smallest required image width.
    pub fn min_width(&self) -> Option<i64> {
        self.0.values().copied().min()
    }

    /// Largest required image width.
    pub fn max_width(&self) -> Option<i64> {
        self.0.values().copied().max()
    }
}

impl FromIterator<(i64, i64)> for BreakpointMap {
    fn from_iter<T: IntoIterator<Item = (i64, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolve a whole `sizes` attribute into a [`BreakpointMap`].
///
/// Rules are processed left to right over a shrinking interval, starting
/// with the full viewport. A rule that resolves to two points claims its
/// sub-range: if it starts above the current lower end, later rules only
/// see what lies below it; otherwise, if it ends below the current upper
/// end, later rules only see what lies above it. At a shared viewport width
/// the earlier rule's value is kept.
///
/// Never returns an empty map.
pub fn aggregate(sizes: &str, viewport: &ViewportContext) -> BreakpointMap {
    let (_, points) = sizes.split(',').map(str::trim).fold(
        (Interval::from(viewport), BTreeMap::new()),
        |(interval, mut points), rule| {
            let Some((lo, hi)) = resolve_range(rule, interval, viewport).bounds() else {
                return (interval, points);
            };
            let narrowed = if lo.viewport > interval.min {
                Interval::new(interval.min, lo.viewport.saturating_sub(1))
            } else if hi.viewport < interval.max {
                Interval::new(hi.viewport.saturating_add(1), interval.max)
            } else {
                interval
            };
            points.entry(lo.viewport).or_insert(lo.width);
            points.entry(hi.viewport).or_insert(hi.width);
            (narrowed, points)
        },
    );

    if points.is_empty() {
        log::debug!("no size rule resolved in {sizes:?}; using viewport bounds");
        let (min, max): (i64, i64) = (viewport.min_width().into(), viewport.max_width().into());
        return BreakpointMap::from_iter([(min, min), (max, max)]);
    }
    BreakpointMap(points)
}
