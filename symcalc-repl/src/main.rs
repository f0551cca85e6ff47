mod command;
mod error;
mod options;
mod session;

use clap::Parser;
use error::Error;
use options::{DomainKind, Options, DOMAIN_ENV};
use rustyline::{error::ReadlineError, DefaultEditor};
use session::AnySession;
use std::{io::{self, BufRead, IsTerminal}, process::ExitCode};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Processes the expression given on the command line.
fn one_shot(domain: DomainKind, options: &Options, expr: &str) -> Result<(), Error> {
    let mut session = AnySession::new(domain);
    session.assign_all(&options.bindings)?;
    println!("{}", session.process(expr, &options.diff)?);
    Ok(())
}

/// Processes each line of stdin as a command. Returns true if every line succeeded.
fn read_stdin(domain: DomainKind) -> bool {
    let mut session = AnySession::new(domain);
    let mut ok = true;

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("error: {}", err);
                return false;
            },
        };

        match session.execute(&line) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => (),
            Err(err) => {
                err.report_to_stderr();
                ok = false;
            },
        }
    }

    ok
}

/// Runs the interactive REPL.
fn repl(domain: DomainKind) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    let mut session = AnySession::new(domain);
    debug!(domain = %session.domain(), "starting interactive session");

    fn process_line(rl: &mut DefaultEditor, session: &mut AnySession) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        match session.execute(&input) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => (),
            Err(err) => err.report_to_stderr(),
        }
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, &mut session) {
            return match err {
                ReadlineError::Eof | ReadlineError::Interrupted => Ok(()),
                err => Err(err),
            };
        }
    }
}

fn main() -> ExitCode {
    // logs go to stderr, so that stdout only carries results
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // usage errors exit with status 2
    let options = Options::parse();

    let env_domain = std::env::var(DOMAIN_ENV).ok();
    let domain = match options.resolve_domain(env_domain.as_deref()) {
        Ok(domain) => domain,
        Err(err) => {
            err.report_to_stderr();
            return ExitCode::from(2);
        },
    };
    debug!(%domain, "selected domain");

    if let Some(expr) = &options.expr {
        return match one_shot(domain, &options, expr) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                err.report_to_stderr();
                ExitCode::FAILURE
            },
        };
    }

    if !io::stdin().is_terminal() {
        return if read_stdin(domain) { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    }

    match repl(domain) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        },
    }
}
