//! Reduction of CSS length expressions to pixel numbers.
//!
//! Reduction is textual and happens in two passes:
//!
//! 1. every `<number><unit>` is replaced by its pixel value
//!    ([`replace_units`]);
//! 2. every `calc(...)` span is replaced by the value of its inner
//!    arithmetic ([`evaluate`]).
//!
//! Anything that cannot be reduced stays in the output untouched. A size
//! rule like `(width > 5rem) calc(80vw - 30px - 2rem)` therefore reduces to
//! `(width > 80) 338`: the numbers inside the media condition are usable,
//! but the whole string is not a number.

use super::math::evaluate;
use super::units::{BaseViewport, format_number, replace_units};

/// Resolve units and evaluate `calc()` spans in `expression`.
///
/// ```
/// # use srcset_widths::css::calc::reduce;
/// # use srcset_widths::css::units::BaseViewport;
/// let base = BaseViewport::with_width(500.0);
/// assert_eq!(reduce("calc(50px-2px)", base, 16.0), "48");
/// assert_eq!(
///     reduce("(width > 5rem) calc(80vw - 30px - 2rem)", base, 16.0),
///     "(width > 80) 338"
/// );
/// ```
pub fn reduce(expression: &str, base: BaseViewport, rem_size: f64) -> String {
    reduce_calc_spans(&replace_units(expression, base, rem_size))
}

/// Reduce `expression` and return its value if the result is a bare number.
///
/// Returns `None` for anything that still contains text after reduction:
/// unsupported units, a leftover media condition, or a `calc()` that failed
/// to evaluate.
pub fn reduce_to_number(expression: &str, base: BaseViewport, rem_size: f64) -> Option<f64> {
    parse_bare_number(&reduce(expression, base, rem_size))
}

/// Replace each `calc(...)` span with its evaluated value.
///
/// Spans are matched with balanced parentheses, and `calc()` nested inside
/// a span is reduced first. A span that fails to evaluate is left as it was.
fn reduce_calc_spans(text: &str) -> String {
    const OPEN: &str = "calc(";

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let inner_start = start + OPEN.len();
        let Some(inner_len) = closing_paren(&rest[inner_start..]) else {
            // Unterminated: nothing further can be a complete span.
            break;
        };
        let span = &rest[start..inner_start + inner_len + 1];
        let inner = reduce_calc_spans(&rest[inner_start..inner_start + inner_len]);

        match evaluate(&inner) {
            Ok(value) => out.push_str(&format_number(value)),
            Err(err) => {
                log::debug!("calc() not reducible: {span:?}: {err}");
                out.push_str(span);
            }
        }
        rest = &rest[inner_start + inner_len + 1..];
    }
    out.push_str(rest);
    out
}

/// Byte offset of the `)` that closes an already-opened parenthesis.
pub(crate) fn closing_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Parse text that consists of a single decimal number and nothing else.
///
/// Stricter than `f64::from_str`: `inf`, `NaN` and exponent forms are not
/// lengths and are rejected.
fn parse_bare_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
