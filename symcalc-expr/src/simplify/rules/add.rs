//! Simplification rules for addition.

use crate::{domain::Domain, expr::Expression};
use crate::simplify::{rules::fold_constants, step::{Step, StepCollector}};

/// `2+3 = 5`
pub fn fold<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    fold_constants(lhs, rhs, step_collector, |a, b| a + b)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    let opt = if lhs.is_constant_eq(D::zero()) {
        rhs.clone()
    } else if rhs.is_constant_eq(D::zero()) {
        lhs.clone()
    } else {
        return None;
    };

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Applies all addition rules.
pub fn all<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expression<D>> {
    fold(lhs, rhs, step_collector)
        .or_else(|| add_zero(lhs, rhs, step_collector))
}
