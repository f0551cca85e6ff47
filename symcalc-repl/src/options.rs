//! Command line arguments and environment configuration.

use clap::Parser;
use crate::error::Error;
use std::{fmt::{self, Display, Formatter}, str::FromStr};
use symcalc_expr::{Bindings, Complex64, Domain};
use symcalc_parser::parse;

/// The environment variable that selects the domain when no flag is given.
pub const DOMAIN_ENV: &str = "SYMCALC_DOMAIN";

/// Extra help text describing the environment.
const AFTER_HELP: &str = "\
Each NAME=VALUE binds a variable to the value of a constant expression, in order. If every
variable of the result is bound, its value is printed, otherwise the expression itself is printed.

environment:
  SYMCALC_DOMAIN  `real` or `complex`, used when neither --real nor --complex is given
  RUST_LOG        log filter, such as `symcalc_parser=trace`";

/// The numeric domain to evaluate expressions over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainKind {
    Real,
    Complex,
}

impl DomainKind {
    /// Returns the name of the domain.
    pub fn name(self) -> &'static str {
        match self {
            Self::Real => f64::NAME,
            Self::Complex => Complex64::NAME,
        }
    }

    /// Guesses the domain from the values of the given bindings: the complex domain is chosen
    /// if any value only makes sense as a complex number, such as `1+2i`.
    pub fn detect<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let is_complex = |value: &str| {
            let empty = Bindings::new();
            parse::<f64>(value).and_then(|expr| expr.eval(&empty)).is_err()
                && parse::<Complex64>(value).and_then(|expr| expr.eval(&Bindings::new())).is_ok()
        };

        if values.into_iter().any(is_complex) {
            Self::Complex
        } else {
            Self::Real
        }
    }
}

impl FromStr for DomainKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "real" => Ok(Self::Real),
            "complex" => Ok(Self::Complex),
            other => Err(Error::Usage(format!("unknown domain `{}`, expected `real` or `complex`", other))),
        }
    }
}

impl Display for DomainKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Evaluates or differentiates symbolic expressions.
///
/// Without EXPR, expressions are read from stdin, one per line, or from an interactive prompt.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "symcalc", version, after_help = AFTER_HELP)]
pub struct Options {
    /// Evaluate over the real numbers
    #[arg(long, conflicts_with = "complex")]
    pub real: bool,

    /// Evaluate over the complex numbers, where `i` is the imaginary unit
    #[arg(long)]
    pub complex: bool,

    /// Differentiate with respect to VAR; repeat for higher derivatives
    #[arg(short, long, value_name = "VAR", requires = "expr")]
    pub diff: Vec<String>,

    /// The expression to process. Put `--` before an expression that starts with `-`
    #[arg(value_name = "EXPR")]
    pub expr: Option<String>,

    /// Variables to bind before processing EXPR
    #[arg(value_name = "NAME=VALUE", value_parser = parse_binding, requires = "expr")]
    pub bindings: Vec<(String, String)>,
}

impl Options {
    /// Returns the domain given with `--real` or `--complex`.
    pub fn domain(&self) -> Option<DomainKind> {
        if self.complex {
            Some(DomainKind::Complex)
        } else if self.real {
            Some(DomainKind::Real)
        } else {
            None
        }
    }

    /// Picks the domain: the command line flag wins, then the environment variable, and then the
    /// domain is guessed from the bindings.
    pub fn resolve_domain(&self, env: Option<&str>) -> Result<DomainKind, Error> {
        if let Some(domain) = self.domain() {
            return Ok(domain);
        }

        match env {
            Some(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(DomainKind::detect(self.bindings.iter().map(|(_, value)| value.as_str()))),
        }
    }
}

/// Parses a `NAME=VALUE` command line argument.
fn parse_binding(s: &str) -> Result<(String, String), String> {
    split_binding(s)
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected `NAME=VALUE`, found `{}`", s))
}

/// Splits `name=value` into its parts, if `name` is a valid variable name.
pub fn split_binding(s: &str) -> Option<(&str, &str)> {
    let (name, value) = s.split_once('=')?;
    let name = name.trim();
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()) {
        Some((name, value.trim()))
    } else {
        None
    }
}
