//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the operands of the expression being built,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. Rules that can reject their operands return a [`Result`] instead.
//!
//! The rules of each operator are tried in a fixed order, and the first one that applies wins.

pub mod add;
pub mod divide;
pub mod function;
pub mod multiply;
pub mod power;
pub mod subtract;

use crate::{
    domain::Domain,
    expr::{BinOpKind, Expression, Func},
    simplify::step::{Step, StepCollector},
};
use symcalc_error::Error;

/// If both operands are constants, combines them into a single constant with the given function.
///
/// `2+3 = 5`
/// `2*3 = 6`
/// etc.
pub(crate) fn fold_constants<D: Domain>(
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
    f: impl FnOnce(D, D) -> D,
) -> Option<Expression<D>> {
    let (a, b) = (lhs.as_constant()?, rhs.as_constant()?);
    step_collector.push(Step::FoldConstants);
    Some(Expression::constant(f(a, b)))
}

/// Applies all rules of the given binary operator.
pub fn binary<D: Domain>(
    op: BinOpKind,
    lhs: &Expression<D>,
    rhs: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expression<D>>, Error> {
    Ok(match op {
        BinOpKind::Add => add::all(lhs, rhs, step_collector),
        BinOpKind::Sub => subtract::all(lhs, rhs, step_collector),
        BinOpKind::Mul => multiply::all(lhs, rhs, step_collector),
        BinOpKind::Div => divide::all(lhs, rhs, step_collector)?,
        BinOpKind::Pow => power::all(lhs, rhs, step_collector),
    })
}

/// Applies all rules of the given function.
pub fn unary<D: Domain>(
    func: Func,
    arg: &Expression<D>,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Expression<D>>, Error> {
    function::all(func, arg, step_collector)
}
