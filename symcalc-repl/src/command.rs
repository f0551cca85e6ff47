//! Commands of the interactive calculator.

use crate::{error::Error, options::{split_binding, DomainKind}};

/// A single line of input to the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// A blank line.
    Empty,

    /// `<expr>`: evaluate the expression, or print it if it has unbound variables.
    Evaluate(&'a str),

    /// `<name> = <expr>`: evaluate the expression and bind its value.
    Assign {
        name: &'a str,
        source: &'a str,
    },

    /// `:d <var> <expr>`: differentiate the expression.
    Diff {
        var: &'a str,
        source: &'a str,
    },

    /// `:vars`
    Vars,

    /// `:clear`
    Clear,

    /// `:domain real|complex`
    Domain(DomainKind),

    /// `:help`
    Help,
}

impl<'a> Command<'a> {
    /// Parses a line of input.
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Empty);
        }

        if let Some(rest) = line.strip_prefix(':') {
            let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let args = args.trim();
            return match name {
                "d" | "diff" => {
                    let (var, source) = args.split_once(char::is_whitespace)
                        .ok_or_else(|| Error::Usage("usage: :d <var> <expr>".to_string()))?;
                    Ok(Self::Diff { var, source: source.trim() })
                },
                "vars" => Ok(Self::Vars),
                "clear" => Ok(Self::Clear),
                "domain" => Ok(Self::Domain(args.parse()?)),
                "help" => Ok(Self::Help),
                _ => Err(Error::Usage(format!("unknown command `:{}`, try `:help`", name))),
            };
        }

        if line.contains('=') {
            let (name, source) = split_binding(line)
                .ok_or_else(|| Error::Usage("the left side of `=` must be a variable name".to_string()))?;
            return Ok(Self::Assign { name, source });
        }

        Ok(Self::Evaluate(line))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn expressions_and_assignments() {
        assert_eq!(Command::parse("   ").unwrap(), Command::Empty);
        assert_eq!(Command::parse(" 2x + 1 ").unwrap(), Command::Evaluate("2x + 1"));
        assert_eq!(Command::parse("x = 2 + 1").unwrap(), Command::Assign { name: "x", source: "2 + 1" });
        assert!(Command::parse("2 = x").is_err());
    }

    #[test]
    fn colon_commands() {
        assert_eq!(
            Command::parse(":d x  x ^ 2").unwrap(),
            Command::Diff { var: "x", source: "x ^ 2" },
        );
        assert_eq!(Command::parse(":vars").unwrap(), Command::Vars);
        assert_eq!(Command::parse(":clear").unwrap(), Command::Clear);
        assert_eq!(Command::parse(":domain complex").unwrap(), Command::Domain(DomainKind::Complex));
        assert_eq!(Command::parse(":help").unwrap(), Command::Help);
        assert!(Command::parse(":d x").is_err());
        assert!(Command::parse(":quit").is_err());
    }
}
