//! Lox - lexical front end for the Lox scripting language
//!
//! Turns Lox source text into a flat sequence of typed tokens, reporting
//! lexical errors without ever stopping the scan.

pub mod ast;
pub mod diagnostics;
pub mod driver;
pub mod lexer;
pub mod repl;

// Re-export commonly used types
pub use diagnostics::{Diagnostic, DiagnosticReporter, SourceLocation};
pub use driver::{Driver, LoxError, ScanOutput};
pub use lexer::{scan_tokens, LexError, Literal, ScanResult, Token, TokenType};
