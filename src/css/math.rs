//! Arithmetic evaluator for the inside of CSS `calc()` expressions.
//!
//! By the time text reaches this module every length has already been
//! converted to a bare pixel number, so the grammar is plain arithmetic:
//!
//! ```text
//! expr           := addition
//! addition       := multiplication (('+' | '-') multiplication)*
//! multiplication := unary (('*' | '/') unary)*
//! unary          := '-' unary | paren_or_number
//! paren_or_number:= '(' expr ')' | number
//! number         := digits ('.' digits)?
//! ```
//!
//! Whitespace is ignored everywhere. Evaluation is a single recursive-descent
//! pass with no intermediate token list.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("division by zero at offset {0}")]
    DivisionByZero(usize),
    #[error("malformed expression at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: &'static str },
}

/// Evaluate an arithmetic expression to a floating-point value.
///
/// Fails with [`MathError::Malformed`] for empty input, unexpected
/// characters, unbalanced parentheses, numbers with two decimal points and
/// trailing input; fails with [`MathError::DivisionByZero`] when a divisor
/// evaluates to exactly zero.
///
/// ```
/// # use srcset_widths::css::math::evaluate;
/// assert_eq!(evaluate("400 - 30 - 32"), Ok(338.0));
/// assert_eq!(evaluate("2 * (3 + 4) / -7"), Ok(-2.0));
/// ```
pub fn evaluate(text: &str) -> Result<f64, MathError> {
    let compact: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let mut parser = Parser {
        input: &compact,
        pos: 0,
    };
    let value = parser.expression()?;
    if parser.pos < parser.input.len() {
        return Err(parser.malformed("unexpected trailing input"));
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn malformed(&self, reason: &'static str) -> MathError {
        MathError::Malformed {
            offset: self.pos,
            reason,
        }
    }

    fn expression(&mut self) -> Result<f64, MathError> {
        self.addition()
    }

    fn addition(&mut self) -> Result<f64, MathError> {
        let mut value = self.multiplication()?;
        loop {
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    value += self.multiplication()?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    value -= self.multiplication()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn multiplication(&mut self) -> Result<f64, MathError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(b'/') => {
                    let at = self.pos;
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(MathError::DivisionByZero(at));
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, MathError> {
        if self.peek() == Some(b'-') {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.paren_or_number()
    }

    fn paren_or_number(&mut self) -> Result<f64, MathError> {
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                let value = self.expression()?;
                if self.peek() != Some(b')') {
                    return Err(self.malformed("missing closing parenthesis"));
                }
                self.pos += 1;
                Ok(value)
            }
            Some(b) if b.is_ascii_digit() || b == b'.' => self.number(),
            Some(_) => Err(self.malformed("unexpected character")),
            None => Err(self.malformed("unexpected end of input")),
        }
    }

    fn number(&mut self) -> Result<f64, MathError> {
        let start = self.pos;
        let mut seen_point = false;
        while let Some(b) = self.peek() {
            match b {
                b'.' if seen_point => return Err(self.malformed("second decimal point")),
                b'.' => seen_point = true,
                b if b.is_ascii_digit() => {}
                _ => break,
            }
            self.pos += 1;
        }
        // Only ASCII digits and one '.' were consumed, so this slice is valid UTF-8.
        let digits = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.malformed("invalid number"))?;
        digits.parse::<f64>().map_err(|_| MathError::Malformed {
            offset: start,
            reason: "invalid number",
        })
    }
}
