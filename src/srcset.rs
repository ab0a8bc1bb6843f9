//! HTML `srcset` attribute values.

use crate::imaging::ImageSource;

/// Build a `srcset` value (`"a-800w.jpg 800w, a-400w.jpg 400w"`) in the
/// order the variants are given.
///
/// Variants without a public path cannot be referenced and are skipped.
pub fn srcset<I: ImageSource>(variants: &[I]) -> String {
    variants
        .iter()
        .filter(|v| !v.public_path().is_empty())
        .map(|v| format!("{} {}w", v.public_path(), v.width()))
        .collect::<Vec<_>>()
        .join(", ")
}
