//! Lexer module for tokenizing Lox source code.

mod error;
mod scanner;
mod token;


pub use error::{ErrorReporter, FnReporter, LexError, LexErrorKind};
pub use scanner::{scan_tokens, ScanResult, Scanner};
pub use token::{lookup_keyword, Literal, Token, TokenType};
