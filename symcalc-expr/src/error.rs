//! Errors raised while building or evaluating expressions.
//!
//! These errors are created without spans, since expression trees do not remember where they
//! were parsed from. The parser attaches spans when they occur during parsing.

use ariadne::Fmt;
use symcalc_attrs::ErrorKind;
use symcalc_error::EXPR;

/// A variable was not given a value when evaluating an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("variable `{}` was not found", self.name),
    labels = ["this variable"],
    help = format!("bind a value to it, for example: {} = {}", (&self.name).fg(EXPR), "<value>".fg(EXPR)),
)]
pub struct VariableNotFound {
    /// The name of the variable.
    pub name: String,
}

/// A division by zero was attempted, either with a literal zero divisor when building the
/// expression, or with a divisor that evaluated to zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this division"],
    help = "the divisor must not be zero",
)]
pub struct DivisionByZero;

/// A function was applied to a value outside of its domain.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined for {}", self.func, self.value),
    labels = ["this function call"],
    help = format!("the argument of `{}` must have a positive real part", self.func),
)]
pub struct DomainError {
    /// The name of the function.
    pub func: &'static str,

    /// The offending argument, formatted for display.
    pub value: String,
}
