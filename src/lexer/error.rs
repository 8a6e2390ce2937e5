//! Lexical errors and the reporter interface the scanner sends them to.
//!
//! The scanner never aborts. Every problem it finds is handed to an
//! [`ErrorReporter`] at the point of detection and scanning continues with the
//! next unconsumed character.

use thiserror::Error;

/// A lexical error found while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line {line}] Error: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// 1-based line the scanner was on when the error was detected.
    pub line: usize,
    /// Byte offset of the offending text.
    pub offset: usize,
    /// Length in bytes of the offending text.
    pub length: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, line: usize, offset: usize, length: usize) -> Self {
        Self {
            kind,
            line,
            offset,
            length,
        }
    }

    pub fn unexpected_character(c: char, line: usize, offset: usize) -> Self {
        Self::new(LexErrorKind::UnexpectedCharacter(c), line, offset, c.len_utf8())
    }

    pub fn unterminated_string(line: usize, offset: usize, length: usize) -> Self {
        Self::new(LexErrorKind::UnterminatedString, line, offset, length)
    }

    /// The bare message, without the line prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A string literal reached end of input without its closing quote.
    #[error("Unterminated string.")]
    UnterminatedString,

    /// A character that starts no token.
    #[error("Unexpected character.")]
    UnexpectedCharacter(char),
}

/// Receives lexical errors as the scanner detects them.
pub trait ErrorReporter {
    fn report(&mut self, error: LexError);
}

impl ErrorReporter for Vec<LexError> {
    fn report(&mut self, error: LexError) {
        self.push(error);
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &mut R {
    fn report(&mut self, error: LexError) {
        (**self).report(error);
    }
}

/// Adapts a plain `(line, message)` callback into an [`ErrorReporter`].
pub struct FnReporter<F>(pub F);

impl<F: FnMut(usize, &str)> ErrorReporter for FnReporter<F> {
    fn report(&mut self, error: LexError) {
        (self.0)(error.line, &error.message());
    }
}
