//! Simplification rules for function applications.

use crate::{domain::Domain, error::DomainError, expr::{Expression, Func}};
use crate::simplify::step::{Step, StepCollector};
use symcalc_error::Error;

/// Evaluates a function applied to a constant.
///
/// `sin(0) = 0`
/// `exp(0) = 1`
/// `ln(1) = 0`
///
/// Returns an error if the function is `ln` and the constant is outside of its domain.
pub fn fold<D: Domain>(
    func: Func,
    arg: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expression<D>>, Error> {
    let Some(value) = arg.as_constant() else {
        return Ok(None);
    };

    if func == Func::Ln && !value.in_ln_domain() {
        return Err(Error::spanless(DomainError {
            func: func.name(),
            value: value.display().to_string(),
        }));
    }

    step_collector.push(Step::FoldFunction);
    Ok(Some(Expression::constant(func.apply(value))))
}

/// Applies all function rules.
pub fn all<D: Domain>(
    func: Func,
    arg: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expression<D>>, Error> {
    fold(func, arg, step_collector)
}
