//! CSS length units and their conversion to pixels.
//!
//! Only the units that can be resolved without layout context are supported:
//! `px`, `rem`, `em`, `vw` and `vh`. Percentages need the containing block
//! and are left untouched, as is every other unit.

use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

/// `<number><unit>` for the convertible units.
static UNIT_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9.]+)(rem|em|px|vh|vw)").expect("unit pattern must compile")
});

/// A length unit that can be converted to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Px,
    Rem,
    Em,
    Vw,
    Vh,
}

impl LengthUnit {
    /// The unit spelled `suffix`, e.g. `"rem"` → [`LengthUnit::Rem`].
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "px" => Some(LengthUnit::Px),
            "rem" => Some(LengthUnit::Rem),
            "em" => Some(LengthUnit::Em),
            "vw" => Some(LengthUnit::Vw),
            "vh" => Some(LengthUnit::Vh),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Rem => "rem",
            LengthUnit::Em => "em",
            LengthUnit::Vw => "vw",
            LengthUnit::Vh => "vh",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewport dimensions that `vw` and `vh` resolve against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseViewport {
    pub width: f64,
    pub height: f64,
}

impl BaseViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Base viewport of the given width with an assumed 16:9 aspect ratio.
    pub fn with_width(width: f64) -> Self {
        Self {
            width,
            height: (width * 9.0 / 16.0).round(),
        }
    }
}

/// Convert `value` in `unit` to pixels.
///
/// ```
/// # use srcset_widths::css::units::{BaseViewport, LengthUnit, resolve_unit};
/// let base = BaseViewport::with_width(500.0);
/// assert_eq!(resolve_unit(2.0, LengthUnit::Rem, base, 16.0), 32.0);
/// assert_eq!(resolve_unit(80.0, LengthUnit::Vw, base, 16.0), 400.0);
/// ```
pub fn resolve_unit(value: f64, unit: LengthUnit, base: BaseViewport, rem_size: f64) -> f64 {
    match unit {
        LengthUnit::Px => value,
        LengthUnit::Rem | LengthUnit::Em => value * rem_size,
        LengthUnit::Vw => value * base.width / 100.0,
        LengthUnit::Vh => value * base.height / 100.0,
    }
}

/// Replace every `<number><unit>` occurrence in `expression` with its pixel
/// value, leaving all other text as it is.
///
/// A number is a run of ASCII digits and periods. `px` values keep their
/// original spelling; converted values are written with [`format_number`].
/// Runs that are not followed by a supported unit (`50%`, `3fr`, bare
/// numbers) and runs that do not parse as a number are copied verbatim.
pub fn replace_units(expression: &str, base: BaseViewport, rem_size: f64) -> String {
    UNIT_VALUE
        .replace_all(expression, |caps: &Captures| {
            let number = &caps[1];
            match (LengthUnit::from_suffix(&caps[2]), number.parse::<f64>()) {
                (Some(LengthUnit::Px), Ok(_)) => number.to_string(),
                (Some(unit), Ok(value)) => format_number(resolve_unit(value, unit, base, rem_size)),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Write a pixel value as plain decimal text that the evaluator can read back.
///
/// Integral values print without a fractional part (`400`, not `400.0`);
/// `f64`'s `Display` never switches to exponent notation.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{value}")
}
