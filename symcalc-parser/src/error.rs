//! Errors that can occur while parsing an expression.
//!
//! Together, these make up every way the text of an expression can be malformed. Errors raised
//! while building the expression, such as dividing by the literal `0`, are defined in
//! [`symcalc_expr::error`] and are given the span of the operator that raised them.

use ariadne::Fmt;
use symcalc_attrs::ErrorKind;
use symcalc_error::EXPR;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A character that is not part of the grammar was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected character `{}`", self.found),
    labels = ["I could not understand this"],
    help = format!("expressions may only contain numbers, names, parentheses, and {}", "+ - * / ^".fg(EXPR)),
)]
pub struct UnexpectedToken {
    /// The text that was found.
    pub found: String,
}

/// A numeric literal could not be parsed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("malformed number `{}`", self.lexeme),
    labels = ["this number"],
    help = "numbers may contain at most one decimal point",
)]
pub struct MalformedNumber {
    /// The text of the number.
    pub lexeme: String,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if self.opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was nothing between a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty parentheses",
    labels = ["there is nothing in here"],
    help = format!("add an {} between the parentheses", "expression".fg(EXPR)),
)]
pub struct EmptyParenthesis;

/// A function name was not directly followed by its argument in parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument for `{}`", self.name),
    labels = ["this function"],
    help = format!("write the argument in parentheses directly after the name: {}", format!("{}(x)", self.name).fg(EXPR)),
)]
pub struct MissingFunctionArgs {
    /// The name of the function.
    pub name: String,
}

/// An operator was found where an operand was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operand",
    labels = [format!("I expected to see an {} before this", "expression".fg(EXPR))],
)]
pub struct MissingOperand;
