use ariadne::Source;
use std::fmt::{self, Display, Formatter};
use symcalc_error::Error as ExprError;

/// Utility enum to package errors that can occur while running the calculator.
#[derive(Debug)]
pub enum Error {
    /// The command line arguments or a REPL command were malformed.
    Usage(String),

    /// An error that occurred while parsing or evaluating an expression. The source code of the
    /// expression is kept so that the error can point into it.
    Expr {
        /// The source code that the error was raised for.
        source: String,

        /// The error.
        err: ExprError,
    },
}

impl Error {
    /// Creates an error raised for the given source code.
    pub fn expr(source: &str, err: ExprError) -> Self {
        Self::Expr { source: source.to_string(), err }
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
    /// implementation, so we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self) {
        match self {
            Self::Usage(msg) => eprintln!("error: {}", msg),
            Self::Expr { source, err } => {
                let report = err.build_report("input");
                if report.eprint(("input", Source::from(source))).is_err() {
                    eprintln!("error: {}", err);
                }
            },
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{}", msg),
            Self::Expr { err, .. } => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}
