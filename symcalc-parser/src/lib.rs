#![doc = include_str!("../README.md")]

pub mod error;
pub mod parser;
pub mod tokenizer;

use parser::Parser;
use symcalc_error::Error;
use symcalc_expr::{Domain, Expression};

/// Parses the given source code into an expression over the domain `D`.
///
/// This is a shortcut for [`Parser::new`] followed by [`Parser::try_parse_full`].
pub fn parse<D: Domain>(source: &str) -> Result<Expression<D>, Error> {
    Parser::new(source).try_parse_full()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;
    use symcalc_expr::{error::{DivisionByZero, VariableNotFound}, Bindings, Complex64};

    fn bind<D: Domain>(pairs: &[(&str, D)]) -> Bindings<D> {
        pairs.iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    fn eval(source: &str, bindings: &[(&str, f64)]) -> f64 {
        parse::<f64>(source).unwrap().eval(&bind(bindings)).unwrap()
    }

    #[test]
    fn order_of_operations() {
        assert_eq!(eval("2 + 2 * 2", &[]), 6.0);
        assert_eq!(eval("(2 + 2) * 2", &[]), 8.0);
        assert_eq!(eval("2 ^ 3 ^ 2", &[]), 64.0);
        assert_eq!(eval("10 - 4 - 3", &[]), 3.0);
        assert_eq!(eval("-2 ^ 2", &[]), -4.0);
    }

    #[test]
    fn implicit_multiplication_value() {
        assert_eq!(eval("2 x", &[("x", 5.0)]), 10.0);
        assert_eq!(eval("3(x + 1)", &[("x", 1.0)]), 6.0);
        assert_eq!(eval("1/2x", &[("x", 4.0)]), 0.125);
        assert_eq!(eval("2^3x", &[("x", 1.0)]), 8.0);
        assert_eq!(eval("2^3x", &[("x", 2.0)]), 64.0);
    }

    #[test]
    fn derivative_values() {
        let at = |source: &str, x: f64| {
            parse::<f64>(source).unwrap().diff("x").eval(&bind(&[("x", x)])).unwrap()
        };
        assert_float_relative_eq!(at("x ^ 2", 3.0), 6.0);
        assert_eq!(at("sin(x)", 0.0), 1.0);
        assert_eq!(at("ln(x)", 1.0), 1.0);
        assert_float_relative_eq!(at("x ^ x", 2.0), 4.0 * (2.0_f64.ln() + 1.0));
        assert_float_relative_eq!(at("2 ^ x", 3.0), 8.0 * 2.0_f64.ln());
    }

    #[test]
    fn derivative_rendering() {
        let derivative = parse::<f64>("x * sin(x)").unwrap().diff("x");
        assert_eq!(derivative.to_text(), "(sin(x) + (x * cos(x)))");
    }

    #[test]
    fn constant_folding_round_trip() {
        let values = [0.0, 1.0, -1.0, 0.1, 2.5, -3.75, 1e10, 123.456, 1e-7];
        for a in values {
            for b in values {
                let source = format!("{}+{}", a, b);
                let expr = parse::<f64>(&source).unwrap();
                assert!(expr.is_constant(), "{source} did not fold");
                assert_eq!(expr.eval(&Bindings::new()).unwrap(), a + b, "{source}");
            }
        }
    }

    #[test]
    fn rendering_reparses() {
        for source in ["x * sin(x) + 2", "(a - b) / c ^ 2", "exp(-x) - ln(y + 1)", "0.5x"] {
            let expr = parse::<f64>(source).unwrap();
            let reparsed = parse::<f64>(&expr.to_text()).unwrap();
            assert_eq!(reparsed, expr, "{source}");
        }
    }

    #[test]
    fn simplification_is_idempotent() {
        for source in ["x * sin(x)", "(x + 1) ^ 2 - 3 / x", "exp(2 x) * cos(y)"] {
            let expr = parse::<f64>(source).unwrap();
            let (simplified, steps) = expr.simplify_with_steps().unwrap();
            assert_eq!(simplified, expr);
            assert!(steps.is_empty(), "{source}: {steps:?}");

            let derivative = expr.diff("x");
            assert_eq!(derivative.simplify().unwrap(), derivative);
        }
    }

    #[test]
    fn division_by_zero() {
        let expr = parse::<f64>("1 / x").unwrap();
        let err = expr.eval(&bind(&[("x", 0.0)])).unwrap_err();
        assert!(err.is::<DivisionByZero>());

        let err = parse::<f64>("1/0").unwrap_err();
        assert!(err.is::<DivisionByZero>());
    }

    #[test]
    fn unbalanced_parentheses() {
        assert!(parse::<f64>(")(").unwrap_err().is::<error::UnclosedParenthesis>());
    }

    #[test]
    fn unbound_variable() {
        let err = parse::<f64>("x + y").unwrap().eval(&bind(&[("x", 1.0)])).unwrap_err();
        assert_eq!(err.downcast_ref::<VariableNotFound>().map(|kind| kind.name.as_str()), Some("y"));
    }

    #[test]
    fn complex_domain() {
        let expr = parse::<Complex64>("(1 + 2i) * z").unwrap();
        assert_eq!(expr.to_text(), "((1 + (2 * i)) * z)");

        let value = expr.eval(&bind(&[("z", Complex64::new(0.0, 1.0))])).unwrap();
        assert_eq!(value, Complex64::new(-2.0, 1.0));

        let value = parse::<Complex64>("i ^ 2").unwrap().eval(&Bindings::new()).unwrap();
        assert_eq!(value, Complex64::new(-1.0, 0.0));

        // `i` is only special in the complex domain
        let err = parse::<f64>("i ^ 2").unwrap().eval(&Bindings::new()).unwrap_err();
        assert!(err.is::<VariableNotFound>());
    }

    #[test]
    fn complex_constants_reparse() {
        let expr = parse::<Complex64>("z * 1").unwrap().diff("z") * Expression::constant(Complex64::new(3.0, -2.0));
        assert_eq!(expr.to_text(), "(3 - 2i)");
        let reparsed = parse::<Complex64>(&expr.to_text()).unwrap();
        assert_eq!(reparsed.to_text(), "(3 - (2 * i))");
        assert_eq!(reparsed.eval(&Bindings::new()).unwrap(), Complex64::new(3.0, -2.0));
    }

    #[test]
    fn report_points_at_operator() {
        let source = "x + 1/0";
        let err = parse::<f64>(source).unwrap_err();
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", ariadne::Source::from(source)), &mut buf)
            .unwrap();
        let report = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        assert!(report.contains("division by zero"));
        assert!(report.contains("this division"));
    }
}
