//! Lox scanner CLI
//!
//! Usage: lox [script]

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use lox::repl::{self, ReplOptions};
use lox::{Driver, LoxError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// sysexits.h codes
const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_IOERR: u8 = 74;

#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(author = "Lox Team")]
#[command(version = "0.1.0")]
#[command(about = "Lox scanner - prints the tokens of a script, or of each line typed at the prompt", long_about = None)]
struct Args {
    /// Script to scan; starts an interactive prompt when omitted
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Do not print tokens, only diagnostics
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EX_USAGE);
        }
    };

    if args.no_color {
        colored::control::set_override(false);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(args.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.script {
        Some(path) => run_file(path, args.quiet),
        None => match repl::run_prompt(ReplOptions { quiet: args.quiet }) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => report_failure(&e),
        },
    }
}

fn run_file(path: PathBuf, quiet: bool) -> ExitCode {
    let mut driver = match Driver::from_file(&path) {
        Ok(driver) => driver,
        Err(e) => return report_failure(&e),
    };
    driver.set_dump_tokens(!quiet);

    let output = driver.scan();
    if !output.has_errors() {
        return ExitCode::SUCCESS;
    }

    for diag in &output.diagnostics {
        eprintln!("{}", diag);
    }

    let error_count = output.error_count();
    eprintln!(
        "{} generated",
        format!("{} error{}", error_count, if error_count == 1 { "" } else { "s" }).red().bold()
    );

    ExitCode::from(EX_DATAERR)
}

fn report_failure(error: &LoxError) -> ExitCode {
    eprintln!("{}: {}", "error".red().bold(), error);
    match error {
        LoxError::Io { .. } => ExitCode::from(EX_IOERR),
        LoxError::Readline(_) => ExitCode::FAILURE,
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "lox=warn",
        1 => "lox=debug",
        _ => "lox=trace",
    }
}
