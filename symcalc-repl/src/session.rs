//! Calculator state that persists between inputs.

use crate::{command::Command, error::Error, options::DomainKind};
use std::fmt::{self, Display, Formatter};
use symcalc_expr::{Bindings, Complex64, Domain, Expression, IMAGINARY_UNIT};
use symcalc_parser::parse;
use tracing::debug;

/// Help text for the interactive commands.
pub const COMMANDS: &str = "\
<expr>                evaluate or simplify an expression
<name> = <expr>       bind a variable to the value of an expression
:d <var> <expr>       differentiate an expression with respect to <var>
:vars                 list the bound variables
:clear                remove all bindings
:domain real|complex  switch the domain, removing all bindings
:help                 print this message";

/// The result of processing an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Output<D: Domain> {
    /// Every variable was bound, so the expression was evaluated.
    Value(D),

    /// The expression has unbound variables, so it is printed in simplified form.
    Expr(Expression<D>),
}

impl<D: Domain> Display for Output<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => value.fmt_value(f),
            Self::Expr(expr) => write!(f, "{}", expr),
        }
    }
}

/// The variable bindings of a calculator session over the domain `D`.
#[derive(Debug, Clone)]
pub struct Session<D: Domain> {
    bindings: Bindings<D>,
}

impl<D: Domain> Default for Session<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Domain> Session<D> {
    /// Creates a session with no bindings.
    pub fn new() -> Self {
        Self { bindings: Bindings::new() }
    }

    /// Returns the bound variables, sorted by name.
    pub fn vars(&self) -> Vec<(&str, D)> {
        let mut vars = self.bindings.iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect::<Vec<_>>();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        vars
    }

    /// Removes all bindings.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Evaluates `source` and binds the result to `name`. Returns the bound value.
    pub fn assign(&mut self, name: &str, source: &str) -> Result<D, Error> {
        let value = parse::<D>(source)
            .and_then(|expr| expr.eval(&self.bindings))
            .map_err(|err| Error::expr(source, err))?;
        debug!(name, value = %value.display(), "bound variable");
        self.bindings.insert(name.to_string(), value);
        Ok(value)
    }

    /// Parses `source`, differentiates it with respect to each variable of `diff` in turn, and
    /// evaluates the result if all of its variables are bound.
    pub fn process(&self, source: &str, diff: &[String]) -> Result<Output<D>, Error> {
        let mut expr = parse::<D>(source).map_err(|err| Error::expr(source, err))?;
        for var in diff {
            expr = expr.diff(var);
        }

        if self.is_bound(&expr) {
            expr.eval(&self.bindings)
                .map(Output::Value)
                .map_err(|err| Error::expr(source, err))
        } else {
            Ok(Output::Expr(expr))
        }
    }

    /// Returns true if every variable of the expression has a value.
    fn is_bound(&self, expr: &Expression<D>) -> bool {
        expr.variables()
            .into_iter()
            .all(|name| {
                self.bindings.contains_key(name)
                    || (name == IMAGINARY_UNIT && D::imaginary_unit().is_some())
            })
    }
}

/// A session over either domain, since the domain can be switched at runtime.
#[derive(Debug, Clone)]
pub enum AnySession {
    Real(Session<f64>),
    Complex(Session<Complex64>),
}

impl AnySession {
    /// Creates an empty session over the given domain.
    pub fn new(domain: DomainKind) -> Self {
        match domain {
            DomainKind::Real => Self::Real(Session::new()),
            DomainKind::Complex => Self::Complex(Session::new()),
        }
    }

    /// Returns the domain of the session.
    pub fn domain(&self) -> DomainKind {
        match self {
            Self::Real(_) => DomainKind::Real,
            Self::Complex(_) => DomainKind::Complex,
        }
    }

    /// Binds each `(name, value)` pair, in order.
    pub fn assign_all(&mut self, bindings: &[(String, String)]) -> Result<(), Error> {
        for (name, value) in bindings {
            match self {
                Self::Real(session) => session.assign(name, value).map(|_| ())?,
                Self::Complex(session) => session.assign(name, value).map(|_| ())?,
            }
        }
        Ok(())
    }

    /// Processes an expression, returning the text to print.
    pub fn process(&self, source: &str, diff: &[String]) -> Result<String, Error> {
        match self {
            Self::Real(session) => session.process(source, diff).map(|output| output.to_string()),
            Self::Complex(session) => session.process(source, diff).map(|output| output.to_string()),
        }
    }

    /// Executes one line of input, returning the text to print, if any.
    pub fn execute(&mut self, line: &str) -> Result<Option<String>, Error> {
        let output = match Command::parse(line)? {
            Command::Empty => return Ok(None),
            Command::Evaluate(source) => self.process(source, &[])?,
            Command::Assign { name, source } => match self {
                Self::Real(session) => format!("{} = {}", name, session.assign(name, source)?.display()),
                Self::Complex(session) => format!("{} = {}", name, session.assign(name, source)?.display()),
            },
            Command::Diff { var, source } => self.process(source, &[var.to_string()])?,
            Command::Vars => {
                let lines = match self {
                    Self::Real(session) => format_vars(session),
                    Self::Complex(session) => format_vars(session),
                };
                if lines.is_empty() {
                    "no variables are bound".to_string()
                } else {
                    lines.join("\n")
                }
            },
            Command::Clear => {
                match self {
                    Self::Real(session) => session.clear(),
                    Self::Complex(session) => session.clear(),
                }
                "cleared all bindings".to_string()
            },
            Command::Domain(domain) => {
                *self = Self::new(domain);
                format!("switched to the {} domain", domain)
            },
            Command::Help => COMMANDS.to_string(),
        };
        Ok(Some(output))
    }
}

fn format_vars<D: Domain>(session: &Session<D>) -> Vec<String> {
    session.vars()
        .into_iter()
        .map(|(name, value)| format!("{} = {}", name, value.display()))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(session: &mut AnySession, line: &str) -> String {
        session.execute(line).unwrap().unwrap_or_default()
    }

    #[test]
    fn evaluate_and_simplify() {
        let mut session = AnySession::new(DomainKind::Real);
        assert_eq!(run(&mut session, "2 + 2 * 2"), "6");
        assert_eq!(run(&mut session, "x * 1 + 0"), "x");
        assert_eq!(run(&mut session, "x = 3"), "x = 3");
        assert_eq!(run(&mut session, "x ^ 2"), "9");
        assert_eq!(run(&mut session, "y = x / 2"), "y = 1.5");
        assert_eq!(run(&mut session, ":vars"), "x = 3\ny = 1.5");
    }

    #[test]
    fn differentiate() {
        let mut session = AnySession::new(DomainKind::Real);
        assert_eq!(run(&mut session, ":d x x * sin(x)"), "(sin(x) + (x * cos(x)))");
        run(&mut session, "x = 3");
        assert_eq!(run(&mut session, ":d x x ^ 2"), "6");
    }

    #[test]
    fn clear_and_switch_domain() {
        let mut session = AnySession::new(DomainKind::Real);
        run(&mut session, "a = 1");
        run(&mut session, ":clear");
        assert_eq!(run(&mut session, ":vars"), "no variables are bound");

        assert_eq!(run(&mut session, "i * i"), "(i * i)");
        run(&mut session, ":domain complex");
        assert_eq!(session.domain(), DomainKind::Complex);
        assert_eq!(run(&mut session, "i * i"), "-1");
        assert_eq!(run(&mut session, "z = 3 - 2i"), "z = (3 - 2i)");
    }

    #[test]
    fn errors_keep_their_source() {
        let mut session = AnySession::new(DomainKind::Real);
        match session.execute("x = 1 / 0") {
            Err(Error::Expr { source, err }) => {
                assert_eq!(source, "1 / 0");
                assert_eq!(err.spans, vec![2..3]);
            },
            other => panic!("unexpected result: {:?}", other),
        }

        run(&mut session, "x = 0");
        assert!(session.execute("1 / x").is_err());
        assert!(session.execute(":domain octonion").is_err());
    }

    #[test]
    fn one_shot_bindings() {
        let mut session = AnySession::new(DomainKind::Real);
        let bindings = vec![
            ("x".to_string(), "2".to_string()),
            ("y".to_string(), "x + 1".to_string()),
        ];
        session.assign_all(&bindings).unwrap();
        assert_eq!(session.process("x * y", &[]).unwrap(), "6");
        assert_eq!(session.process("x ^ 3", &["x".to_string(), "x".to_string()]).unwrap(), "12");

        let err = session.assign_all(&[("z".to_string(), "w".to_string())]).unwrap_err();
        assert_eq!(err.to_string(), "variable `w` was not found");
    }
}
