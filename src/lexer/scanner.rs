//! Scanner for Lox source code tokenization.

use super::error::{ErrorReporter, LexError};
use super::token::{lookup_keyword, Literal, Token, TokenType};

/// Tokens and errors from one scan of a source string.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl ScanResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Scan `source` and collect every lexical error alongside the tokens.
pub fn scan_tokens(source: &str) -> ScanResult {
    let mut errors = Vec::new();
    let tokens = Scanner::new(source, &mut errors).scan_tokens();
    ScanResult { tokens, errors }
}

/// Scanner that produces tokens from source code
pub struct Scanner<'a> {
    source: &'a str,
    /// Byte offset where the current lexeme begins.
    start: usize,
    /// Byte offset of the next unread character.
    current: usize,
    line: usize,
    /// Line on which the current lexeme begins.
    start_line: usize,
    tokens: Vec<Token>,
    reporter: &'a mut dyn ErrorReporter,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, reporter: &'a mut dyn ErrorReporter) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            tokens: Vec::new(),
            reporter,
        }
    }

    /// Tokenize the entire source. The result always ends with exactly one EOF token.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.line));
        tracing::debug!(tokens = self.tokens.len(), lines = self.line, "scan complete");
        self.tokens
    }

    /// Scan a single token, or skip one whitespace, newline or comment unit
    fn scan_token(&mut self) {
        let c = match self.advance() {
            Some(c) => c,
            None => return,
        };

        match c {
            // Single-char tokens
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),

            // One or two char tokens
            '!' => self.match_compound('=', TokenType::BangEqual, TokenType::Bang),
            '=' => self.match_compound('=', TokenType::EqualEqual, TokenType::Equal),
            '<' => self.match_compound('=', TokenType::LessEqual, TokenType::Less),
            '>' => self.match_compound('=', TokenType::GreaterEqual, TokenType::Greater),

            '/' => {
                if self.match_char('/') {
                    // Line comment, the newline itself is left for the main loop
                    while self.peek().map_or(false, |c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => self.scan_string(),

            c if c.is_ascii_digit() => self.scan_number(),

            c if is_ident_start(c) => self.scan_identifier(),

            _ => self.report(LexError::unexpected_character(c, self.line, self.start)),
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_compound(&mut self, next: char, matched: TokenType, default: TokenType) {
        let kind = if self.match_char(next) { matched } else { default };
        self.add_token(kind);
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, kind: TokenType) {
        self.push_token(kind, None);
    }

    fn push_token(&mut self, kind: TokenType, literal: Option<Literal>) {
        debug_assert_eq!(literal.is_some(), kind.has_literal());
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(kind, lexeme, literal, self.start_line));
    }

    fn report(&mut self, error: LexError) {
        tracing::trace!(line = error.line, offset = error.offset, "{}", error.kind);
        self.reporter.report(error);
    }

    fn scan_string(&mut self) {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            let length = self.current - self.start;
            self.report(LexError::unterminated_string(self.line, self.start, length));
            return;
        }

        // The closing quote
        self.advance();

        let value = &self.source[self.start + 1..self.current - 1];
        self.push_token(TokenType::String, Some(Literal::String(value.to_string())));
    }

    fn scan_number(&mut self) {
        self.consume_digits();

        // A fractional part needs a digit after the dot, so `12.` leaves the dot alone
        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }

        // Digit runs with an optional fraction always parse
        let value = self.lexeme().parse::<f64>().unwrap_or_default();
        self.push_token(TokenType::Number, Some(Literal::Number(value)));
    }

    fn consume_digits(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn scan_identifier(&mut self) {
        while self.peek().map_or(false, is_ident_continue) {
            self.advance();
        }

        let kind = lookup_keyword(self.lexeme()).unwrap_or(TokenType::Identifier);
        self.add_token(kind);
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}
