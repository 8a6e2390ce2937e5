//! Interactive prompt: scans one line at a time.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::driver::{Driver, LoxError};

const PROMPT: &str = ">>> ";

/// Options for the interactive prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplOptions {
    /// Suppress token output; diagnostics are still printed
    pub quiet: bool,
}

/// Run the prompt until end of input (Ctrl-D) or interrupt (Ctrl-C).
///
/// Every line gets a fresh driver, so an error on one line never carries over
/// to the next.
pub fn run_prompt(options: ReplOptions) -> Result<(), LoxError> {
    let mut rl = DefaultEditor::new()?;
    let mut line_number = 0usize;

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                line_number += 1;
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }

                let mut driver = Driver::new(format!("<repl:{}>", line_number), line);
                driver.set_dump_tokens(!options.quiet);
                let output = driver.scan();

                for diag in &output.diagnostics {
                    eprint!("{}", diag);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                tracing::debug!(lines = line_number, "prompt closed");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
