//! The simplifying constructor.
//!
//! Every compound [`Expression`] is built by one of the functions in this module. Before a new
//! node is allocated, the [rules](rules) of its operator are tried in order. If a rule applies,
//! its result is returned in place of the node.
//!
//! The rules are local: they only look at the immediate operands of the node being built, and
//! since the operands were themselves built by this module, the whole tree ends up in the same
//! normal form. [`Expression::simplify`] rebuilds an existing tree through the same rules, which
//! is a no-op for trees built by this crate.
//!
//! Two operations can fail at construction:
//!
//! - dividing by the literal constant zero fails with
//!   [`DivisionByZero`](crate::error::DivisionByZero);
//! - taking the logarithm of a constant whose real part is not positive fails with
//!   [`DomainError`](crate::error::DomainError).

pub mod rules;
pub mod step;

use crate::{domain::Domain, expr::{BinOpKind, Expression, Func, Node}};
use step::{Step, StepCollector};
use symcalc_error::Error;
use tracing::trace;

fn binary_node<D: Domain>(op: BinOpKind, lhs: Expression<D>, rhs: Expression<D>) -> Expression<D> {
    Expression::from_node(Node::Binary { op, lhs, rhs })
}

fn unary_node<D: Domain>(func: Func, arg: Expression<D>) -> Expression<D> {
    Expression::from_node(Node::Unary { func, arg })
}

/// Builds `lhs + rhs`.
pub(crate) fn add<D: Domain>(
    lhs: Expression<D>,
    rhs: Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expression<D> {
    rules::add::all(&lhs, &rhs, step_collector)
        .unwrap_or_else(|| binary_node(BinOpKind::Add, lhs, rhs))
}

/// Builds `lhs - rhs`.
pub(crate) fn sub<D: Domain>(
    lhs: Expression<D>,
    rhs: Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expression<D> {
    rules::subtract::all(&lhs, &rhs, step_collector)
        .unwrap_or_else(|| binary_node(BinOpKind::Sub, lhs, rhs))
}

/// Builds `lhs * rhs`.
pub(crate) fn mul<D: Domain>(
    lhs: Expression<D>,
    rhs: Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expression<D> {
    rules::multiply::all(&lhs, &rhs, step_collector)
        .unwrap_or_else(|| binary_node(BinOpKind::Mul, lhs, rhs))
}

/// Builds `lhs ^ rhs`.
pub(crate) fn pow<D: Domain>(
    lhs: Expression<D>,
    rhs: Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expression<D> {
    rules::power::all(&lhs, &rhs, step_collector)
        .unwrap_or_else(|| binary_node(BinOpKind::Pow, lhs, rhs))
}

/// Builds `lhs / rhs`, failing if `rhs` is the constant zero.
pub(crate) fn div<D: Domain>(
    lhs: Expression<D>,
    rhs: Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Expression<D>, Error> {
    Ok(rules::divide::all(&lhs, &rhs, step_collector)?
        .unwrap_or_else(|| binary_node(BinOpKind::Div, lhs, rhs)))
}

/// Builds `func(arg)`, failing if `func` is `ln` and `arg` is a constant outside of its domain.
pub(crate) fn func<D: Domain>(
    func: Func,
    arg: Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Expression<D>, Error> {
    Ok(rules::function::all(func, &arg, step_collector)?
        .unwrap_or_else(|| unary_node(func, arg)))
}

/// Builds `lhs / rhs`. If construction would fail, the quotient is allocated as is, and the
/// division by zero is reported when the expression is evaluated.
pub(crate) fn div_or_defer<D: Domain>(lhs: Expression<D>, rhs: Expression<D>) -> Expression<D> {
    match rules::divide::all(&lhs, &rhs, &mut ()) {
        Ok(Some(simplified)) => simplified,
        Ok(None) | Err(_) => binary_node(BinOpKind::Div, lhs, rhs),
    }
}

/// Builds `func(arg)`. If construction would fail, the call is allocated as is, and the domain
/// error is reported when the expression is evaluated.
///
/// Only `ln` can fail, so this is also how the other functions are built.
pub(crate) fn func_or_defer<D: Domain>(func: Func, arg: Expression<D>) -> Expression<D> {
    match rules::function::all(func, &arg, &mut ()) {
        Ok(Some(simplified)) => simplified,
        Ok(None) | Err(_) => unary_node(func, arg),
    }
}

/// Rebuilds the tree bottom-up through the simplifying constructor.
///
/// Subtrees that no rule touches are shared with the input instead of being copied.
fn simplify_with<D: Domain>(
    expr: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Expression<D>, Error> {
    match expr.node() {
        Node::Constant(_) | Node::Variable(_) => Ok(expr.clone()),
        Node::Binary { op, lhs, rhs } => {
            let new_lhs = simplify_with(lhs, step_collector)?;
            let new_rhs = simplify_with(rhs, step_collector)?;
            match rules::binary(*op, &new_lhs, &new_rhs, step_collector)? {
                Some(simplified) => Ok(simplified),
                None if new_lhs.ptr_eq(lhs) && new_rhs.ptr_eq(rhs) => Ok(expr.clone()),
                None => Ok(binary_node(*op, new_lhs, new_rhs)),
            }
        },
        Node::Unary { func, arg } => {
            let new_arg = simplify_with(arg, step_collector)?;
            match rules::unary(*func, &new_arg, step_collector)? {
                Some(simplified) => Ok(simplified),
                None if new_arg.ptr_eq(arg) => Ok(expr.clone()),
                None => Ok(unary_node(*func, new_arg)),
            }
        },
    }
}

impl<D: Domain> Expression<D> {
    /// Simplifies the expression by rebuilding it through the simplifying constructor.
    ///
    /// Trees built with the methods and operators of [`Expression`] are already simplified, so
    /// this only does something for trees whose construction was deferred by
    /// [`Expression::diff`], in which case it reports the deferred error.
    pub fn simplify(&self) -> Result<Self, Error> {
        simplify_with(self, &mut ())
    }

    /// Simplifies the expression, returning the simplified expression along with the steps
    /// taken to simplify it.
    pub fn simplify_with_steps(&self) -> Result<(Self, Vec<Step>), Error> {
        let mut steps = Vec::new();
        let simplified = simplify_with(self, &mut steps)?;
        for step in &steps {
            trace!(?step, "applied simplification rule");
        }
        Ok((simplified, steps))
    }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expression<f64> {
        Expression::var("x")
    }

    fn c(value: f64) -> Expression<f64> {
        Expression::constant(value)
    }

    #[test]
    fn fold_binary_constants() {
        assert_eq!(add(c(2.0), c(3.0), &mut ()), c(5.0));
        assert_eq!(sub(c(2.0), c(3.0), &mut ()), c(-1.0));
        assert_eq!(mul(c(2.0), c(3.0), &mut ()), c(6.0));
        assert_eq!(pow(c(2.0), c(3.0), &mut ()), c(8.0));
        assert_eq!(div(c(3.0), c(2.0), &mut ()).unwrap(), c(1.5));
    }

    #[test]
    fn fold_function_constants() {
        assert_eq!(func(Func::Sin, c(0.0), &mut ()).unwrap(), c(0.0));
        assert_eq!(func(Func::Cos, c(0.0), &mut ()).unwrap(), c(1.0));
        assert_eq!(func(Func::Exp, c(0.0), &mut ()).unwrap(), c(1.0));
        assert_eq!(func(Func::Ln, c(1.0), &mut ()).unwrap(), c(0.0));
    }

    #[test]
    fn identities() {
        assert_eq!(add(c(0.0), x(), &mut ()), x());
        assert_eq!(add(x(), c(0.0), &mut ()), x());
        assert_eq!(sub(x(), c(0.0), &mut ()), x());
        assert_eq!(mul(c(1.0), x(), &mut ()), x());
        assert_eq!(mul(x(), c(1.0), &mut ()), x());
        assert_eq!(mul(c(0.0), x(), &mut ()), c(0.0));
        assert_eq!(mul(x(), c(0.0), &mut ()), c(0.0));
        assert_eq!(div(x(), c(1.0), &mut ()).unwrap(), x());
        assert_eq!(div(c(0.0), x(), &mut ()).unwrap(), c(0.0));
        assert_eq!(pow(x(), c(1.0), &mut ()), x());
        assert_eq!(pow(c(0.0), x(), &mut ()), c(1.0));
    }

    #[test]
    fn zero_minus_x_is_kept() {
        assert_eq!(sub(c(0.0), x(), &mut ()).to_text(), "(0 - x)");
    }

    #[test]
    fn record_steps() {
        let mut steps = Vec::new();
        assert_eq!(mul(c(1.0), x(), &mut steps), x());
        assert_eq!(pow(c(0.0), x(), &mut steps), c(1.0));
        assert_eq!(add(c(1.0), c(1.0), &mut steps), c(2.0));
        assert_eq!(steps, vec![Step::MultiplyOne, Step::PowerZeroLeft, Step::FoldConstants]);
    }

    #[test]
    fn literal_zero_divisor() {
        let err = div(x(), c(0.0), &mut ()).unwrap_err();
        assert!(err.is::<crate::error::DivisionByZero>());

        // checked before folding
        let err = div(c(0.0), c(0.0), &mut ()).unwrap_err();
        assert!(err.is::<crate::error::DivisionByZero>());
    }

    #[test]
    fn ln_of_non_positive_constant() {
        for value in [0.0, -1.0] {
            let err = func(Func::Ln, c(value), &mut ()).unwrap_err();
            assert!(err.is::<crate::error::DomainError>());
        }

        let err = func(Func::Ln, Expression::constant(Complex64::new(-1.0, 2.0)), &mut ()).unwrap_err();
        assert_eq!(err.to_string(), "`ln` is not defined for (-1 + 2i)");
    }

    #[test]
    fn deferred_construction() {
        let quotient = div_or_defer(x(), c(0.0));
        assert_eq!(quotient.to_text(), "(x / 0)");
        assert!(quotient.simplify().unwrap_err().is::<crate::error::DivisionByZero>());

        let log = func_or_defer(Func::Ln, c(-2.0));
        assert_eq!(log.to_text(), "ln(-2)");
        assert!(log.simplify().unwrap_err().is::<crate::error::DomainError>());

        assert_eq!(div_or_defer(c(4.0), c(2.0)), c(2.0));
        assert_eq!(func_or_defer(Func::Exp, c(0.0)), c(1.0));
    }

    #[test]
    fn simplify_is_idempotent() {
        let expr = (x() + c(2.0)) * x().sin().pow(&c(3.0));
        let (simplified, steps) = expr.simplify_with_steps().unwrap();
        assert_eq!(simplified, expr);
        assert!(simplified.ptr_eq(&expr));
        assert!(steps.is_empty());
    }

    #[test]
    fn simplify_deferred_subtree() {
        // `(x * (2 / 1)) + 0`, with every node deferred
        let inner = binary_node(BinOpKind::Div, c(2.0), c(1.0));
        let product = binary_node(BinOpKind::Mul, x(), inner);
        let sum = binary_node(BinOpKind::Add, product, c(0.0));

        let (simplified, steps) = sum.simplify_with_steps().unwrap();
        assert_eq!(simplified.to_text(), "(x * 2)");
        assert_eq!(steps, vec![Step::FoldConstants, Step::AddZero]);
    }
}
