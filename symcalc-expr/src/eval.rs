//! Numeric evaluation of expression trees.

use crate::{
    domain::Domain,
    error::{DivisionByZero, DomainError, VariableNotFound},
    expr::{BinOpKind, Expression, Func, Node},
};
use std::collections::HashMap;
use symcalc_error::Error;

/// A mapping from variable names to the values they take during evaluation.
pub type Bindings<D> = HashMap<String, D>;

/// The name of the variable that evaluates to the imaginary unit when it has no binding.
pub const IMAGINARY_UNIT: &str = "i";

impl<D: Domain> Expression<D> {
    /// Evaluates the expression with the given variable bindings.
    ///
    /// A variable is looked up in `bindings` first. If it is not bound, the name
    /// [`IMAGINARY_UNIT`] evaluates to the imaginary unit in domains that have one, and any other
    /// name fails with [`VariableNotFound`].
    ///
    /// Evaluation fails with [`DivisionByZero`] if a divisor evaluates to zero, and with
    /// [`DomainError`] if the argument of `ln` evaluates to a value whose real part is not
    /// positive.
    pub fn eval(&self, bindings: &Bindings<D>) -> Result<D, Error> {
        match self.node() {
            Node::Constant(value) => Ok(*value),
            Node::Variable(name) => lookup(name, bindings),
            Node::Binary { op: BinOpKind::Div, lhs, rhs } => {
                let divisor = rhs.eval(bindings)?;
                if divisor.is_zero() {
                    return Err(Error::spanless(DivisionByZero));
                }
                Ok(lhs.eval(bindings)? / divisor)
            },
            Node::Binary { op, lhs, rhs } => {
                let (lhs, rhs) = (lhs.eval(bindings)?, rhs.eval(bindings)?);
                Ok(match op {
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Pow => lhs.pow(rhs),
                    BinOpKind::Div => lhs / rhs,
                })
            },
            Node::Unary { func, arg } => {
                let value = arg.eval(bindings)?;
                if *func == Func::Ln && !value.in_ln_domain() {
                    return Err(Error::spanless(DomainError {
                        func: func.name(),
                        value: value.display().to_string(),
                    }));
                }
                Ok(func.apply(value))
            },
        }
    }
}

fn lookup<D: Domain>(name: &str, bindings: &Bindings<D>) -> Result<D, Error> {
    if let Some(value) = bindings.get(name) {
        return Ok(*value);
    }

    if name == IMAGINARY_UNIT {
        if let Some(i) = D::imaginary_unit() {
            return Ok(i);
        }
    }

    Err(Error::spanless(VariableNotFound { name: name.to_string() }))
}
