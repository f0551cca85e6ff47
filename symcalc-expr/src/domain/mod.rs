//! The numeric domains an expression tree can be evaluated over.
//!
//! An [`Expression`](crate::Expression) is generic over a [`Domain`], chosen once for the whole
//! tree. Two domains are provided:
//!
//! - [`f64`], the real numbers.
//! - [`Complex64`], complex numbers as pairs of [`f64`]s.
//!
//! Constant folding, evaluation, and rendering of constants all go through this trait, so the
//! expression code never needs to know which domain it is working with.

pub mod fmt;

use num_complex::Complex64;
use num_traits::{One, Zero};
use std::{fmt::{Debug, Formatter}, ops::{Add, Div, Mul, Neg, Sub}};

pub use fmt::ValueDisplay;

/// A scalar type that expressions can be built and evaluated over.
pub trait Domain:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The name of the domain, used in diagnostics.
    const NAME: &'static str;

    /// Converts a real number, such as a parsed numeric literal, into this domain.
    fn from_real(n: f64) -> Self;

    /// The value of the imaginary unit in this domain, if the domain has one.
    fn imaginary_unit() -> Option<Self>;

    /// The real part of the value.
    fn real_part(&self) -> f64;

    /// Raises `self` to the power of `rhs`.
    fn pow(self, rhs: Self) -> Self;

    /// The sine of the value, in radians.
    fn sin(self) -> Self;

    /// The cosine of the value, in radians.
    fn cos(self) -> Self;

    /// The natural logarithm of the value.
    fn ln(self) -> Self;

    /// `e` raised to the power of the value.
    fn exp(self) -> Self;

    /// Writes the canonical text form of the value.
    fn fmt_value(&self, f: &mut Formatter<'_>) -> std::fmt::Result;

    /// Returns true if the value is inside the domain of the natural logarithm.
    ///
    /// Only the sign of the real part is considered, for complex numbers too.
    fn in_ln_domain(&self) -> bool {
        self.real_part() > 0.0
    }

    /// Returns a wrapper that implements [`Display`](std::fmt::Display) using
    /// [`Domain::fmt_value`].
    fn display(&self) -> ValueDisplay<'_, Self> {
        ValueDisplay(self)
    }
}

impl Domain for f64 {
    const NAME: &'static str = "real";

    fn from_real(n: f64) -> Self {
        n
    }

    fn imaginary_unit() -> Option<Self> {
        None
    }

    fn real_part(&self) -> f64 {
        *self
    }

    fn pow(self, rhs: Self) -> Self {
        self.powf(rhs)
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn fmt_value(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt::fmt_real(f, *self)
    }
}

impl Domain for Complex64 {
    const NAME: &'static str = "complex";

    fn from_real(n: f64) -> Self {
        Complex64::new(n, 0.0)
    }

    fn imaginary_unit() -> Option<Self> {
        Some(Complex64::i())
    }

    fn real_part(&self) -> f64 {
        self.re
    }

    fn pow(self, rhs: Self) -> Self {
        // integer exponents are computed by repeated multiplication, which is exact for values
        // like `i^2` and well-defined for a zero base
        if rhs.im == 0.0 && rhs.re.fract() == 0.0 && rhs.re.abs() <= i32::MAX as f64 {
            self.powi(rhs.re as i32)
        } else if rhs.im == 0.0 {
            self.powf(rhs.re)
        } else {
            self.powc(rhs)
        }
    }

    fn sin(self) -> Self {
        Complex64::sin(self)
    }

    fn cos(self) -> Self {
        Complex64::cos(self)
    }

    fn ln(self) -> Self {
        Complex64::ln(self)
    }

    fn exp(self) -> Self {
        Complex64::exp(self)
    }

    fn fmt_value(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt::fmt_complex(f, self)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use super::*;

    #[test]
    fn real_arithmetic() {
        assert_eq!(Domain::pow(2.0_f64, 10.0), 1024.0);
        assert_eq!(Domain::sin(0.0_f64), 0.0);
        assert_eq!(Domain::exp(0.0_f64), 1.0);
        assert_float_relative_eq!(Domain::ln(std::f64::consts::E), 1.0);
    }

    #[test]
    fn ln_domain_checks_real_part() {
        assert!(2.0_f64.in_ln_domain());
        assert!(!0.0_f64.in_ln_domain());
        assert!(!(-1.0_f64).in_ln_domain());
        assert!(!f64::NAN.in_ln_domain());

        assert!(Complex64::new(1.0, -5.0).in_ln_domain());
        assert!(!Complex64::new(0.0, 1.0).in_ln_domain());
        assert!(!Complex64::new(-2.0, 3.0).in_ln_domain());
    }

    #[test]
    fn imaginary_unit_only_for_complex() {
        assert_eq!(<f64 as Domain>::imaginary_unit(), None);
        assert_eq!(<Complex64 as Domain>::imaginary_unit(), Some(Complex64::new(0.0, 1.0)));
    }

    #[test]
    fn complex_integer_power_is_exact() {
        let i = Complex64::i();
        assert_eq!(Domain::pow(i, Complex64::from_real(2.0)), Complex64::new(-1.0, 0.0));
        assert_eq!(Domain::pow(Complex64::zero(), Complex64::from_real(3.0)), Complex64::zero());
        assert_eq!(Domain::pow(Complex64::zero(), Complex64::zero()), Complex64::one());
    }

    #[test]
    fn complex_fractional_power() {
        let root = Domain::pow(Complex64::from_real(-4.0), Complex64::from_real(0.5));
        assert!(root.re.abs() < 1e-12);
        assert_float_relative_eq!(root.im, 2.0);
    }
}
