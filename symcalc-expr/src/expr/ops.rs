//! Operators and function constructors for [`Expression`].
//!
//! Each of these builds its result through the [simplifying constructor](crate::simplify).
//! Addition, subtraction, multiplication, and powers can never fail, and are available as the
//! usual operator traits. Division and the natural logarithm can fail at construction, so they
//! are plain methods that return a [`Result`]. A scalar on the left of `/` or `^` goes through
//! [`Expression::rdiv`] and [`Expression::rpow`].

use crate::{domain::Domain, simplify};
use num_complex::Complex64;
use std::ops::{Add, Mul, Neg, Sub};
use super::{Expression, Func};
use symcalc_error::Error;

/// Implements a binary operator for every combination of owned and borrowed [`Expression`]s.
macro_rules! binary_op {
    ($trait:ident, $method:ident, $build:path) => {
        impl<D: Domain> $trait for Expression<D> {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                $build(self, rhs, &mut ())
            }
        }

        impl<D: Domain> $trait<&Expression<D>> for Expression<D> {
            type Output = Expression<D>;

            fn $method(self, rhs: &Expression<D>) -> Self::Output {
                $build(self, rhs.clone(), &mut ())
            }
        }

        impl<D: Domain> $trait<Expression<D>> for &Expression<D> {
            type Output = Expression<D>;

            fn $method(self, rhs: Expression<D>) -> Self::Output {
                $build(self.clone(), rhs, &mut ())
            }
        }

        impl<D: Domain> $trait for &Expression<D> {
            type Output = Expression<D>;

            fn $method(self, rhs: Self) -> Self::Output {
                $build(self.clone(), rhs.clone(), &mut ())
            }
        }
    };
}

binary_op!(Add, add, simplify::add);
binary_op!(Sub, sub, simplify::sub);
binary_op!(Mul, mul, simplify::mul);

/// Implements the binary operators with a scalar of the given domain on the left-hand side, such
/// as `2.0 * x`. The scalar is wrapped in a constant expression.
macro_rules! scalar_ops {
    ($($domain:ty),*) => {
        $(
            impl Add<Expression<$domain>> for $domain {
                type Output = Expression<$domain>;

                fn add(self, rhs: Expression<$domain>) -> Self::Output {
                    Expression::constant(self) + rhs
                }
            }

            impl Sub<Expression<$domain>> for $domain {
                type Output = Expression<$domain>;

                fn sub(self, rhs: Expression<$domain>) -> Self::Output {
                    Expression::constant(self) - rhs
                }
            }

            impl Mul<Expression<$domain>> for $domain {
                type Output = Expression<$domain>;

                fn mul(self, rhs: Expression<$domain>) -> Self::Output {
                    Expression::constant(self) * rhs
                }
            }
        )*
    };
}

scalar_ops!(f64, Complex64);

/// Negates the expression by multiplying it by `-1`. There is no negation node.
impl<D: Domain> Neg for Expression<D> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expression::constant(-D::one()) * self
    }
}

impl<D: Domain> Neg for &Expression<D> {
    type Output = Expression<D>;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl<D: Domain> Expression<D> {
    /// Raises the expression to the power of `rhs`.
    pub fn pow(&self, rhs: &Self) -> Self {
        simplify::pow(self.clone(), rhs.clone(), &mut ())
    }

    /// Divides the expression by `rhs`.
    ///
    /// Returns [`DivisionByZero`](crate::error::DivisionByZero) if `rhs` is the constant zero.
    /// A divisor that is only zero for some values of its variables is caught by
    /// [`Expression::eval`] instead.
    #[allow(clippy::should_implement_trait)]
    pub fn div(&self, rhs: &Self) -> Result<Self, Error> {
        simplify::div(self.clone(), rhs.clone(), &mut ())
    }

    /// Divides the scalar `lhs` by the expression, as in `2 / x`.
    ///
    /// Fails like [`Expression::div`] when the expression is the constant zero.
    pub fn rdiv(&self, lhs: D) -> Result<Self, Error> {
        simplify::div(Expression::constant(lhs), self.clone(), &mut ())
    }

    /// Raises the scalar `base` to the power of the expression, as in `2 ^ x`.
    pub fn rpow(&self, base: D) -> Self {
        simplify::pow(Expression::constant(base), self.clone(), &mut ())
    }

    /// The sine of the expression.
    pub fn sin(&self) -> Self {
        simplify::func_or_defer(Func::Sin, self.clone())
    }

    /// The cosine of the expression.
    pub fn cos(&self) -> Self {
        simplify::func_or_defer(Func::Cos, self.clone())
    }

    /// The natural logarithm of the expression.
    ///
    /// Returns [`DomainError`](crate::error::DomainError) if the expression is a constant whose
    /// real part is not positive.
    pub fn ln(&self) -> Result<Self, Error> {
        simplify::func(Func::Ln, self.clone(), &mut ())
    }

    /// `e` raised to the power of the expression.
    pub fn exp(&self) -> Self {
        simplify::func_or_defer(Func::Exp, self.clone())
    }

    /// Applies the given function to the expression.
    pub fn apply(&self, func: Func) -> Result<Self, Error> {
        simplify::func(func, self.clone(), &mut ())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn reference_operators() {
        let x = Expression::<f64>::var("x");
        let y = Expression::var("y");
        assert_eq!(&x + &y, x.clone() + y.clone());
        assert_eq!(&x - y.clone(), x.clone() - &y);
        assert_eq!((&x * &y).to_text(), "(x * y)");
    }

    #[test]
    fn scalar_on_the_left() {
        let x = Expression::<f64>::var("x");
        assert_eq!((2.0 * x.clone()).to_text(), "(2 * x)");
        assert_eq!((0.0 + x.clone()), x);
        assert_eq!((1.0 - x.clone()).to_text(), "(1 - x)");

        let z = Expression::<Complex64>::var("z");
        assert_eq!((Complex64::i() * z).to_text(), "(i * z)");
    }

    #[test]
    fn negation() {
        let x = Expression::<f64>::var("x");
        assert_eq!((-&x).to_text(), "(-1 * x)");
        assert_eq!(-Expression::constant(2.0), Expression::constant(-2.0));
    }

    #[test]
    fn fallible_constructors() {
        let x = Expression::<f64>::var("x");
        assert_eq!(x.div(&Expression::constant(2.0)).unwrap().to_text(), "(x / 2)");
        assert!(x.div(&Expression::constant(0.0)).is_err());
        assert_eq!(x.ln().unwrap().to_text(), "ln(x)");
        assert!(Expression::constant(-1.0).ln().is_err());
        assert_eq!(Expression::constant(1.0).apply(Func::Ln).unwrap(), Expression::constant(0.0));
    }

    #[test]
    fn scalar_left_division_and_power() {
        let x = Expression::<f64>::var("x");
        assert_eq!(x.rdiv(2.0).unwrap().to_text(), "(2 / x)");
        assert_eq!(x.rpow(2.0).to_text(), "(2 ^ x)");
        assert_eq!(x.rpow(0.0), Expression::constant(1.0));
        assert!(Expression::constant(0.0).rdiv(1.0).is_err());
        assert_eq!(Expression::constant(4.0).rdiv(2.0).unwrap(), Expression::constant(0.5));

        let z = Expression::<Complex64>::var("z");
        assert_eq!(z.rpow(Complex64::i()).to_text(), "(i ^ z)");
    }

    #[test]
    fn functions_fold_constants() {
        let zero = Expression::<f64>::constant(0.0);
        assert_eq!(zero.sin(), zero);
        assert_eq!(zero.cos(), Expression::constant(1.0));
        assert_eq!(zero.exp(), Expression::constant(1.0));
        assert_eq!(zero.pow(&Expression::var("x")), Expression::constant(1.0));
    }
}
