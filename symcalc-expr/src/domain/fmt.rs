//! Utility functions to format real and complex values.

use num_complex::Complex64;
use std::fmt::{self, Display, Formatter};
use super::Domain;

/// Implements [`Display`] for any [`Domain`] value, using [`Domain::fmt_value`].
#[derive(Debug, Clone, Copy)]
pub struct ValueDisplay<'a, D>(pub &'a D);

impl<D: Domain> Display for ValueDisplay<'_, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt_value(f)
    }
}

/// Formats a real number using the shortest representation that round-trips. Negative zero is
/// written as `0`.
///
/// Non-finite values, which constant folding can produce (`exp(1000)`), are written as `inf`,
/// `-inf` and `NaN`. The parser reads these back as variable names, not numbers.
pub fn fmt_real(f: &mut Formatter<'_>, n: f64) -> fmt::Result {
    if n == 0.0 {
        write!(f, "0")
    } else {
        write!(f, "{}", n)
    }
}

/// Helper function to format the imaginary part of the complex number.
fn fmt_imag(f: &mut Formatter<'_>, n: f64) -> fmt::Result {
    if n == 1.0 {
        write!(f, "i")
    } else if n == -1.0 {
        write!(f, "-i")
    } else {
        fmt_real(f, n)?;
        write!(f, "i")
    }
}

/// Formats a complex number.
///
/// Values with both a real and an imaginary part are wrapped in parentheses, so that the output
/// can be embedded in a larger expression and parsed back.
pub fn fmt_complex(f: &mut Formatter<'_>, c: &Complex64) -> fmt::Result {
    let (re, im) = (c.re, c.im);

    // four possible combinations:
    // 1. real and imaginary exist (i.e. are non-zero)
    // 2. only real exists
    // 3. only imaginary exists
    // 4. neither real nor imaginary exist (i.e. zero)
    match (re == 0.0, im == 0.0) {
        (false, false) => {
            write!(f, "(")?;
            fmt_real(f, re)?;
            if im.is_sign_negative() {
                write!(f, " - ")?;
                fmt_imag(f, -im)?;
            } else {
                write!(f, " + ")?;
                fmt_imag(f, im)?;
            }
            write!(f, ")")
        },
        (false, true) => fmt_real(f, re),
        (true, false) => fmt_imag(f, im),
        (true, true) => write!(f, "0"),
    }
}
