//! The operand and operator stacks of the operator-precedence parser.

use crate::error::{MissingOperand, UnclosedParenthesis, UnexpectedEof};
use std::ops::Range;
use symcalc_error::Error;
use symcalc_expr::{BinOpKind, Domain, Expression};
use tracing::trace;

/// An entry of the operator stack.
#[derive(Debug, Clone, PartialEq)]
enum StackOp {
    /// A binary operator, either written in the source or inserted by the parser.
    Binary {
        op: BinOpKind,

        /// The span of the token that produced the operator.
        span: Range<usize>,
    },

    /// An opening parenthesis that has not been matched yet.
    Paren {
        span: Range<usize>,
    },
}

/// The state of one operator-precedence parse.
///
/// The parser feeds tokens to the stack one at a time. Whenever an operator is pushed, pending
/// operators of the same or higher precedence are applied first, which makes every operator
/// left-associative, including `^`.
#[derive(Debug)]
pub struct ExprStack<D: Domain> {
    /// Operands and the results of applied operators.
    operands: Vec<Expression<D>>,

    /// Pending operators and opening parentheses.
    operators: Vec<StackOp>,

    /// Whether the next token should start an operand. This is true at the start of the
    /// expression, and after an opening parenthesis or an operator.
    expect_operand: bool,
}

impl<D: Domain> Default for ExprStack<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Domain> ExprStack<D> {
    /// Creates an empty stack, expecting an operand.
    pub fn new() -> Self {
        Self {
            operands: Vec::new(),
            operators: Vec::new(),
            expect_operand: true,
        }
    }

    /// Returns true if the next token should start an operand.
    pub fn expect_operand(&self) -> bool {
        self.expect_operand
    }

    /// Pushes a complete operand.
    pub fn push_operand(&mut self, operand: Expression<D>) {
        self.operands.push(operand);
        self.expect_operand = false;
    }

    /// Pushes an opening parenthesis.
    pub fn push_paren(&mut self, span: Range<usize>) {
        self.operators.push(StackOp::Paren { span });
        self.expect_operand = true;
    }

    /// Pushes a binary operator written in the source, after applying the pending operators that
    /// bind at least as tightly.
    pub fn push_operator(&mut self, op: BinOpKind, span: Range<usize>) -> Result<(), Error> {
        self.reduce_while(op.precedence())?;
        self.operators.push(StackOp::Binary { op, span });
        self.expect_operand = true;
        Ok(())
    }

    /// Pushes a minus sign found where an operand was expected. It is rewritten as `-1 *`, and
    /// nothing is applied first.
    pub fn push_negation(&mut self, span: Range<usize>) {
        self.operands.push(Expression::constant(-D::one()));
        self.operators.push(StackOp::Binary { op: BinOpKind::Mul, span });
        self.expect_operand = true;
    }

    /// Inserts a multiplication if an operand is about to follow another operand, as in `2x` or
    /// `(a)(b)`.
    ///
    /// Like negation, nothing is applied first, so the product binds tighter than any operator
    /// already on the stack: `1/2x` is `1 / (2 * x)`.
    pub fn implicit_multiplication(&mut self, span: Range<usize>) {
        if self.expect_operand {
            return;
        }

        self.operators.push(StackOp::Binary { op: BinOpKind::Mul, span });
        self.expect_operand = true;
    }

    /// Returns true if there is an opening parenthesis on the stack that has not been matched.
    pub fn has_open_paren(&self) -> bool {
        self.operators.iter().any(|op| matches!(op, StackOp::Paren { .. }))
    }

    /// Returns the span of the innermost opening parenthesis if it is the last thing pushed, as
    /// in `()`.
    pub fn empty_paren(&self) -> Option<Range<usize>> {
        match self.operators.last() {
            Some(StackOp::Paren { span }) if self.expect_operand => Some(span.clone()),
            _ => None,
        }
    }

    /// Applies the pending operators up to the innermost opening parenthesis, and removes it.
    ///
    /// The caller must check that there is an operand before the closing parenthesis.
    pub fn close_paren(&mut self, span: Range<usize>) -> Result<(), Error> {
        loop {
            match self.operators.pop() {
                Some(StackOp::Paren { .. }) => break,
                Some(StackOp::Binary { op, span }) => self.apply(op, span)?,
                None => return Err(Error::new(vec![span], UnclosedParenthesis { opening: false })),
            }
        }

        self.expect_operand = false;
        Ok(())
    }

    /// Applies all pending operators, returning the single expression that remains.
    ///
    /// `eof_span` is where the parser ran out of input.
    pub fn finish(mut self, eof_span: Range<usize>) -> Result<Expression<D>, Error> {
        if self.expect_operand {
            return Err(Error::new(vec![eof_span], UnexpectedEof));
        }

        while let Some(entry) = self.operators.pop() {
            match entry {
                StackOp::Binary { op, span } => self.apply(op, span)?,
                StackOp::Paren { span } => {
                    return Err(Error::new(vec![span], UnclosedParenthesis { opening: true }));
                },
            }
        }

        match (self.operands.pop(), self.operands.is_empty()) {
            (Some(expr), true) => Ok(expr),
            _ => Err(Error::new(vec![eof_span], UnexpectedEof)),
        }
    }

    /// Applies pending operators while the one on top binds at least as tightly as `precedence`.
    fn reduce_while(&mut self, precedence: u8) -> Result<(), Error> {
        while let Some(StackOp::Binary { op, .. }) = self.operators.last() {
            if op.precedence() < precedence {
                break;
            }

            if let Some(StackOp::Binary { op, span }) = self.operators.pop() {
                self.apply(op, span)?;
            }
        }
        Ok(())
    }

    /// Pops two operands and replaces them with the result of the operator.
    fn apply(&mut self, op: BinOpKind, span: Range<usize>) -> Result<(), Error> {
        let (Some(rhs), Some(lhs)) = (self.operands.pop(), self.operands.pop()) else {
            return Err(Error::new(vec![span], MissingOperand));
        };

        trace!(%op, %lhs, %rhs, "applying operator");
        let result = match op {
            BinOpKind::Add => lhs + rhs,
            BinOpKind::Sub => lhs - rhs,
            BinOpKind::Mul => lhs * rhs,
            BinOpKind::Div => lhs.div(&rhs).map_err(|err| err.or_spans(|| vec![span]))?,
            BinOpKind::Pow => lhs.pow(&rhs),
        };
        self.operands.push(result);
        Ok(())
    }
}
