//! Simplification rules for multiplication.

use crate::{domain::Domain, expr::Expression};
use crate::simplify::{rules::fold_constants, step::{Step, StepCollector}};

/// `2*3 = 6`
pub fn fold<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    fold_constants(lhs, rhs, step_collector, |a, b| a * b)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    let opt = if lhs.is_constant_eq(D::one()) {
        rhs.clone()
    } else if rhs.is_constant_eq(D::one()) {
        lhs.clone()
    } else {
        return None;
    };

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    if !lhs.is_constant_eq(D::zero()) && !rhs.is_constant_eq(D::zero()) {
        return None;
    }

    step_collector.push(Step::MultiplyZero);
    Some(Expression::constant(D::zero()))
}

/// Applies all multiplication rules.
pub fn all<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    fold(lhs, rhs, step_collector)
        .or_else(|| multiply_one(lhs, rhs, step_collector))
        .or_else(|| multiply_zero(lhs, rhs, step_collector))
}
