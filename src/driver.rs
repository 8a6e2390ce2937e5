//! Driver that runs one scan and collects its diagnostics.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::diagnostics::{Diagnostic, DiagnosticReporter};
use crate::lexer::{Scanner, Token};

/// Failures outside the scanner itself
#[derive(Debug, Error)]
pub enum LoxError {
    #[error("could not read file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line editor failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Tokens and diagnostics from one scan
#[derive(Debug)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// The scanning driver
pub struct Driver {
    file: String,
    source: String,
    dump_tokens: bool,
}

impl Driver {
    pub fn new(file: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            source: source.into(),
            dump_tokens: false,
        }
    }

    /// Read a whole script; its content becomes one source string
    pub fn from_file(path: &Path) -> Result<Self, LoxError> {
        let source = std::fs::read_to_string(path).map_err(|source| LoxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "read script");
        Ok(Self::new(path.to_string_lossy(), source))
    }

    /// Print each token to stdout as it is produced
    pub fn set_dump_tokens(&mut self, enabled: bool) {
        self.dump_tokens = enabled;
    }

    /// Scan the source. Lexical errors never stop the scan.
    pub fn scan(&self) -> ScanOutput {
        let mut reporter = DiagnosticReporter::new(&self.file, &self.source);
        let tokens = Scanner::new(&self.source, &mut reporter).scan_tokens();

        if self.dump_tokens {
            for token in &tokens {
                println!("{}", token);
            }
        }

        let diagnostics = reporter.take_diagnostics();
        tracing::debug!(
            file = %self.file,
            tokens = tokens.len(),
            errors = diagnostics.len(),
            "scanned source"
        );

        ScanOutput { tokens, diagnostics }
    }
}
