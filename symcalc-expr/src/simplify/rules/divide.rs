//! Simplification rules for division.

use crate::{domain::Domain, error::DivisionByZero, expr::Expression};
use crate::simplify::{rules::fold_constants, step::{Step, StepCollector}};
use symcalc_error::Error;

/// Rejects a literal zero divisor.
///
/// This is checked before anything else, so that `0/0` and `a/0` are both errors.
pub fn check_divisor<D: Domain>(rhs: &Expression<D>) -> Result<(), Error> {
    if rhs.is_constant_eq(D::zero()) {
        Err(Error::spanless(DivisionByZero))
    } else {
        Ok(())
    }
}

/// `6/3 = 2`
pub fn fold<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    fold_constants(lhs, rhs, step_collector, |a, b| a / b)
}

/// `a/1 = a`
pub fn divide_one<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    if !rhs.is_constant_eq(D::one()) {
        return None;
    }

    step_collector.push(Step::DivideOne);
    Some(lhs.clone())
}

/// `0/a = 0`
pub fn divide_zero<D: Domain>(
    lhs: &Expression<D>,
    _: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    if !lhs.is_constant_eq(D::zero()) {
        return None;
    }

    step_collector.push(Step::DivideZero);
    Some(Expression::constant(D::zero()))
}

/// Applies all division rules, after checking the divisor.
pub fn all<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expression<D>>, Error> {
    check_divisor(rhs)?;
    Ok(fold(lhs, rhs, step_collector)
        .or_else(|| divide_one(lhs, rhs, step_collector))
        .or_else(|| divide_zero(lhs, rhs, step_collector)))
}
