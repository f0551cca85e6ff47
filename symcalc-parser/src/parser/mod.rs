//! The operator-precedence parser.
//!
//! The parser makes a single left-to-right pass over the tokens, keeping a stack of operands and
//! a stack of pending operators (see [`ExprStack`]). On top of the usual algorithm, it handles:
//!
//! - **Implicit multiplication**: a number, name, function call, or `(` that directly follows an
//!   operand is multiplied with it, so `2x`, `x(y + 1)`, and `(a)(b)` all parse. The inserted
//!   product is applied before any operator already pending, so `1/2x` is `1 / (2 * x)`.
//! - **Unary minus**: a `-` where an operand is expected is read as `-1 *`.
//! - **Function calls**: `sin`, `cos`, `ln`, and `exp` must be directly followed by their
//!   argument in parentheses, which is parsed on its own.
//!
//! Every operator is applied through the operators of [`Expression`], so the result is already
//! simplified, and errors such as `1 / 0` are reported while parsing.

pub mod stack;

use crate::{
    error::{
        EmptyParenthesis,
        MalformedNumber,
        MissingFunctionArgs,
        MissingOperand,
        UnclosedParenthesis,
        UnexpectedToken,
    },
    tokenizer::{tokenize_complete, Token, TokenKind},
};
use stack::ExprStack;
use std::ops::Range;
use symcalc_error::Error;
use symcalc_expr::{BinOpKind, Domain, Expression, Func};
use tracing::debug;

/// A parser for infix expressions.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The source code being parsed.
    source: &'source str,

    /// The tokens of the source code, whitespace included.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.source.len()..self.source.len()
    }

    /// Parses the entire source code into an expression over the domain `D`.
    pub fn try_parse_full<D: Domain>(&mut self) -> Result<Expression<D>, Error> {
        debug!(source = self.source, domain = D::NAME, "parsing expression");
        self.cursor = 0;
        let end = self.tokens.len();
        self.parse_until(end, self.eof_span())
    }

    /// Parses the tokens from the cursor up to, but not including, the token at `end`.
    ///
    /// `eof_span` is reported if the tokens run out in the middle of an expression.
    fn parse_until<D: Domain>(&mut self, end: usize, eof_span: Range<usize>) -> Result<Expression<D>, Error> {
        let mut stack = ExprStack::new();

        while self.cursor < end {
            let token = self.tokens[self.cursor].clone();
            self.cursor += 1;

            match token.kind {
                TokenKind::Whitespace => (),
                TokenKind::Number => {
                    stack.implicit_multiplication(token.span.clone());
                    stack.push_operand(Expression::constant(D::from_real(parse_number(&token)?)));
                },
                TokenKind::Name => {
                    let operand = match Func::from_name(token.lexeme) {
                        Some(func) => self.parse_call(func, &token, end)?,
                        None => Expression::var(token.lexeme),
                    };
                    stack.implicit_multiplication(token.span.clone());
                    stack.push_operand(operand);
                },
                TokenKind::OpenParen => {
                    stack.implicit_multiplication(token.span.clone());
                    stack.push_paren(token.span);
                },
                TokenKind::CloseParen => {
                    if !stack.has_open_paren() {
                        return Err(Error::new(vec![token.span], UnclosedParenthesis { opening: false }));
                    }

                    if stack.expect_operand() {
                        return Err(match stack.empty_paren() {
                            Some(open) => Error::new(vec![open.start..token.span.end], EmptyParenthesis),
                            None => Error::new(vec![token.span], MissingOperand),
                        });
                    }

                    stack.close_paren(token.span)?;
                },
                TokenKind::Sub if stack.expect_operand() => stack.push_negation(token.span),
                TokenKind::Add | TokenKind::Sub | TokenKind::Mul | TokenKind::Div | TokenKind::Exp => {
                    if stack.expect_operand() {
                        return Err(Error::new(vec![token.span], MissingOperand));
                    }

                    stack.push_operator(binary_op(token.kind), token.span)?;
                },
                TokenKind::Symbol => {
                    return Err(Error::new(vec![token.span], UnexpectedToken {
                        found: token.lexeme.to_string(),
                    }));
                },
            }
        }

        stack.finish(eof_span)
    }

    /// Parses the argument of a call to `func`, whose name is `name`. The cursor must point at
    /// the token directly after the name, and is moved past the closing parenthesis.
    fn parse_call<D: Domain>(&mut self, func: Func, name: &Token, end: usize) -> Result<Expression<D>, Error> {
        let missing_args = |span: Range<usize>| Error::new(vec![span], MissingFunctionArgs {
            name: func.name().to_string(),
        });

        let open = self.cursor;
        if open >= end || self.tokens[open].kind != TokenKind::OpenParen {
            return Err(missing_args(name.span.clone()));
        }

        let close = self.matching_paren(open, end)
            .ok_or_else(|| Error::new(vec![self.tokens[open].span.clone()], UnclosedParenthesis { opening: true }))?;
        let call_span = name.span.start..self.tokens[close].span.end;
        if self.tokens[open + 1..close].iter().all(Token::is_whitespace) {
            return Err(missing_args(call_span));
        }

        self.cursor = open + 1;
        let arg = self.parse_until::<D>(close, self.tokens[close].span.clone())?;
        self.cursor = close + 1;

        arg.apply(func).map_err(|err| err.or_spans(|| vec![call_span]))
    }

    /// Returns the index of the parenthesis closing the one at `open`, searching no further than
    /// `end`.
    fn matching_paren(&self, open: usize, end: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (idx, token) in self.tokens.iter().enumerate().take(end).skip(open) {
            match token.kind {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(idx);
                    }
                },
                _ => (),
            }
        }
        None
    }
}

/// Converts an operator token into the corresponding operator.
fn binary_op(kind: TokenKind) -> BinOpKind {
    match kind {
        TokenKind::Add => BinOpKind::Add,
        TokenKind::Sub => BinOpKind::Sub,
        TokenKind::Mul => BinOpKind::Mul,
        TokenKind::Div => BinOpKind::Div,
        _ => BinOpKind::Pow,
    }
}

/// Parses a numeric literal.
fn parse_number(token: &Token) -> Result<f64, Error> {
    token.lexeme.parse::<f64>().map_err(|_| Error::new(vec![token.span.clone()], MalformedNumber {
        lexeme: token.lexeme.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> Result<Expression<f64>, Error> {
        Parser::new(source).try_parse_full()
    }

    /// Parses the source and renders the result.
    fn text(source: &str) -> String {
        parse(source).unwrap().to_text()
    }

    /// Parses the source, expecting an error of kind `K` at the given spans.
    fn fails_with<K: symcalc_error::ErrorKind + 'static>(source: &str, spans: Vec<Range<usize>>) {
        let err = parse(source).unwrap_err();
        assert!(err.is::<K>(), "expected {} for {source:?}, got {err:?}", std::any::type_name::<K>());
        assert_eq!(err.spans, spans);
    }

    #[test]
    fn literals() {
        assert_eq!(text("42"), "42");
        assert_eq!(text("3.25"), "3.25");
        assert_eq!(text(".5"), "0.5");
        assert_eq!(text("x"), "x");
        assert_eq!(text("  abc "), "abc");
    }

    #[test]
    fn precedence() {
        assert_eq!(text("a + b * c"), "(a + (b * c))");
        assert_eq!(text("a * b + c"), "((a * b) + c)");
        assert_eq!(text("a - b / c ^ d"), "(a - (b / (c ^ d)))");
        assert_eq!(text("(a + b) * c"), "((a + b) * c)");
    }

    #[test]
    fn left_associative() {
        assert_eq!(text("a - b - c"), "((a - b) - c)");
        assert_eq!(text("a / b / c"), "((a / b) / c)");
        assert_eq!(text("a ^ b ^ c"), "((a ^ b) ^ c)");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(text("2x"), "(2 * x)");
        assert_eq!(text("2 x"), "(2 * x)");
        assert_eq!(text("x(y + 1)"), "(x * (y + 1))");
        assert_eq!(text("(a)(b)"), "(a * b)");
        assert_eq!(text("2 sin(x)"), "(2 * sin(x))");
        assert_eq!(text("a b ^ 2"), "(a * (b ^ 2))");
        assert_eq!(text("a + b c"), "(a + (b * c))");
    }

    #[test]
    fn implicit_multiplication_binds_tightest() {
        assert_eq!(text("1/2x"), "(1 / (2 * x))");
        assert_eq!(text("a / b c"), "(a / (b * c))");
        assert_eq!(text("2^3x"), "(2 ^ (3 * x))");
        assert_eq!(text("x^2 sin(x)"), "(x ^ (2 * sin(x)))");
        assert_eq!(text("2x y"), "(2 * (x * y))");
        assert_eq!(text("2x * y"), "((2 * x) * y)");
    }

    #[test]
    fn unary_minus() {
        assert_eq!(text("-x"), "(-1 * x)");
        assert_eq!(text("-2"), "-2");
        assert_eq!(text("-x ^ 2"), "(-1 * (x ^ 2))");
        assert_eq!(text("a * -b"), "(a * (-1 * b))");
        assert_eq!(text("a - -b"), "(a - (-1 * b))");
        assert_eq!(text("(-a)"), "(-1 * a)");
        assert_eq!(text("2 ^ -x"), "(2 ^ (-1 * x))");
    }

    #[test]
    fn functions() {
        assert_eq!(text("sin(x)"), "sin(x)");
        assert_eq!(text("cos(x) + ln(y)"), "(cos(x) + ln(y))");
        assert_eq!(text("exp(sin(x) * 2)"), "exp((sin(x) * 2))");
        assert_eq!(text("sin((x))"), "sin(x)");
        assert_eq!(text("sin(0)"), "0");
        assert_eq!(text("sine"), "sine");
    }

    #[test]
    fn simplified_while_parsing() {
        assert_eq!(text("x + 0"), "x");
        assert_eq!(text("1 * x * 1"), "x");
        assert_eq!(text("0 * sin(x)"), "0");
        assert_eq!(text("x ^ 1 / 1"), "x");
        assert_eq!(text("0 ^ y"), "1");
        assert_eq!(text("2 + 3 * x"), "(2 + (3 * x))");
        assert_eq!(text("(2 + 3) * x"), "(5 * x)");
    }

    #[test]
    fn empty_input() {
        fails_with::<crate::error::UnexpectedEof>("", vec![0..0]);
        fails_with::<crate::error::UnexpectedEof>("   ", vec![3..3]);
    }

    #[test]
    fn trailing_operator() {
        fails_with::<crate::error::UnexpectedEof>("1 +", vec![3..3]);
        fails_with::<crate::error::UnexpectedEof>("-", vec![1..1]);
        fails_with::<crate::error::UnexpectedEof>("sin(x -)", vec![7..8]);
    }

    #[test]
    fn missing_operand() {
        fails_with::<MissingOperand>("* 2", vec![0..1]);
        fails_with::<MissingOperand>("1 + * 2", vec![4..5]);
        fails_with::<MissingOperand>("(1 +)", vec![4..5]);
    }

    #[test]
    fn parentheses() {
        fails_with::<UnclosedParenthesis>(")(", vec![0..1]);
        fails_with::<UnclosedParenthesis>("(1 + 2", vec![0..1]);
        fails_with::<UnclosedParenthesis>("1 + 2)", vec![5..6]);
        fails_with::<UnclosedParenthesis>("sin(x", vec![3..4]);
        fails_with::<EmptyParenthesis>("2 * ()", vec![4..6]);
    }

    #[test]
    fn function_arguments() {
        fails_with::<MissingFunctionArgs>("sin", vec![0..3]);
        fails_with::<MissingFunctionArgs>("sin x", vec![0..3]);
        fails_with::<MissingFunctionArgs>("2 + cos (x)", vec![4..7]);
        fails_with::<MissingFunctionArgs>("ln( )", vec![0..5]);
    }

    #[test]
    fn bad_tokens() {
        fails_with::<MalformedNumber>("1.2.3", vec![0..5]);
        fails_with::<MalformedNumber>("x + .", vec![4..5]);
        fails_with::<UnexpectedToken>("2 $ 3", vec![2..3]);
        fails_with::<UnexpectedToken>("x_1", vec![1..2]);
    }

    #[test]
    fn construction_errors_get_spans() {
        fails_with::<symcalc_expr::error::DivisionByZero>("1/0", vec![1..2]);
        fails_with::<symcalc_expr::error::DivisionByZero>("x / (2 - 2)", vec![2..3]);
        fails_with::<symcalc_expr::error::DomainError>("1 + ln(0)", vec![4..9]);
        fails_with::<symcalc_expr::error::DomainError>("ln(-1)", vec![0..6]);
    }
}
