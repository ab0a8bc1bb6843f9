//! The small subset of CSS needed to read an `img` `sizes` attribute.
//!
//! | Module | Role |
//! |---|---|
//! | [`math`] | Arithmetic evaluator for `calc()` contents |
//! | [`units`] | `px`/`rem`/`em`/`vw`/`vh` → pixels |
//! | [`calc`] | Textual reduction of whole expressions |

pub mod calc;
pub mod math;
pub mod units;

pub use calc::{reduce, reduce_to_number};
pub use math::{MathError, evaluate};
pub use units::{BaseViewport, LengthUnit, resolve_unit};
