//! Symbolic differentiation.
//!
//! The derivative is built with the same simplifying constructor as every other expression, so
//! terms that multiply by a zero derivative, or by a derivative of one, disappear as the result
//! is assembled.
//!
//! | Expression | Derivative                             |
//! |------------|----------------------------------------|
//! | `c`        | `0`                                    |
//! | `x`        | `1` for the variable, `0` otherwise    |
//! | `l + r`    | `l' + r'`                              |
//! | `l - r`    | `l' - r'`                              |
//! | `l * r`    | `l' * r + l * r'`                      |
//! | `l / r`    | `(l' * r - l * r') / (r * r)`          |
//! | `l ^ r`    | `l ^ r * (r' * ln(l) + (r * l') / l)`  |
//! | `sin(e)`   | `cos(e) * e'`                          |
//! | `cos(e)`   | `-1 * sin(e) * e'`                     |
//! | `ln(e)`    | `(1 / e) * e'`                         |
//! | `exp(e)`   | `e * e'`                               |
//!
//! Differentiation never fails. If a quotient or logarithm of the derivative cannot be built,
//! such as the `ln(-2)` in the derivative of `(-2)^x`, it is kept unsimplified and the error is
//! reported when the derivative is evaluated.

use crate::{
    domain::Domain,
    expr::{BinOpKind, Expression, Func, Node},
    simplify::{div_or_defer, func_or_defer},
};
use tracing::debug;

/// Produces the derivative of the given expression with respect to the variable `with`.
fn derivative<D: Domain>(f: &Expression<D>, with: &str) -> Expression<D> {
    let zero = || Expression::constant(D::zero());
    let one = || Expression::constant(D::one());

    match f.node() {
        Node::Constant(_) => zero(),
        Node::Variable(name) => {
            if name == with {
                one()
            } else {
                zero()
            }
        },
        Node::Binary { op, lhs, rhs } => {
            let (dl, dr) = (derivative(lhs, with), derivative(rhs, with));
            match op {
                BinOpKind::Add => dl + dr,
                BinOpKind::Sub => dl - dr,
                BinOpKind::Mul => dl * rhs + lhs * dr,
                BinOpKind::Div => {
                    let numerator = dl * rhs - lhs * dr;
                    div_or_defer(numerator, rhs * rhs)
                },
                BinOpKind::Pow => {
                    // generalized power rule, correct when the exponent depends on `with` too
                    let ln = func_or_defer(Func::Ln, lhs.clone());
                    let inner = dr * ln + div_or_defer(rhs * dl, lhs.clone());
                    lhs.pow(rhs) * inner
                },
            }
        },
        Node::Unary { func, arg } => {
            let darg = derivative(arg, with);
            match func {
                Func::Sin => arg.cos() * darg,
                Func::Cos => Expression::constant(-D::one()) * arg.sin() * darg,
                Func::Ln => div_or_defer(one(), arg.clone()) * darg,
                Func::Exp => arg * darg,
            }
        },
    }
}

impl<D: Domain> Expression<D> {
    /// Returns the derivative of the expression with respect to the variable `with`.
    ///
    /// The input expression is not modified. Subtrees of the input are shared with the result
    /// wherever the derivative reuses them.
    pub fn diff(&self, with: &str) -> Self {
        debug!(expr = %self, with, "differentiating");
        derivative(self, with)
    }
}
