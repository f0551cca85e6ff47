//! Simplification rules for subtraction.

use crate::{domain::Domain, expr::Expression};
use crate::simplify::{rules::fold_constants, step::{Step, StepCollector}};

/// `5-3 = 2`
pub fn fold<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    fold_constants(lhs, rhs, step_collector, |a, b| a - b)
}

/// `a-0 = a`
///
/// `0-a` is left alone, there is no negation node to rewrite it into.
pub fn subtract_zero<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    if !rhs.is_constant_eq(D::zero()) {
        return None;
    }

    step_collector.push(Step::SubtractZero);
    Some(lhs.clone())
}

/// Applies all subtraction rules.
pub fn all<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    fold(lhs, rhs, step_collector)
        .or_else(|| subtract_zero(lhs, rhs, step_collector))
}
