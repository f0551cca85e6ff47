//! Simplification rules for powers.

use crate::{domain::Domain, expr::Expression};
use crate::simplify::{rules::fold_constants, step::{Step, StepCollector}};

/// `2^3 = 8`
pub fn fold<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    fold_constants(lhs, rhs, step_collector, D::pow)
}

/// `a^1 = a`
pub fn power_one<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    if !rhs.is_constant_eq(D::one()) {
        return None;
    }

    step_collector.push(Step::PowerOne);
    Some(lhs.clone())
}

/// `0^a = 1`
///
/// Applied for any `a`, including a symbolic one.
pub fn power_zero_left<D: Domain>(
    lhs: &Expression<D>,
    _: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    if !lhs.is_constant_eq(D::zero()) {
        return None;
    }

    step_collector.push(Step::PowerZeroLeft);
    Some(Expression::constant(D::one()))
}

/// Applies all power rules.
pub fn all<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    fold(lhs, rhs, step_collector)
        .or_else(|| power_one(lhs, rhs, step_collector))
        .or_else(|| power_zero_left(lhs, rhs, step_collector))
}
