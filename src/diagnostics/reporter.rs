//! Diagnostic reporter that turns lexical errors into rendered diagnostics.

use super::{codes, Diagnostic, SourceLocation};
use crate::lexer::{ErrorReporter, LexError, LexErrorKind};

/// Collects diagnostics during a scan
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
    source: String,
    file: String,
    lines: Vec<(usize, usize)>, // (start, end) byte offsets for each line
}

impl DiagnosticReporter {
    pub fn new(file: &str, source: &str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;

        for (i, c) in source.char_indices() {
            if c == '\n' {
                lines.push((start, i));
                start = i + 1;
            }
        }

        // Last line, possibly empty
        lines.push((start, source.len()));

        Self {
            diagnostics: Vec::new(),
            source: source.to_string(),
            file: file.to_string(),
            lines,
        }
    }

    /// Get line number, column and line content from a byte offset
    pub fn location_from_offset(&self, offset: usize) -> (SourceLocation, String) {
        let index = self
            .lines
            .iter()
            .position(|&(start, end)| offset >= start && offset <= end)
            .unwrap_or(self.lines.len().saturating_sub(1));
        let (line_start, _) = self.lines.get(index).copied().unwrap_or((0, 0));
        let line_num = index + 1;

        let column = self.source[line_start..offset.min(self.source.len())].chars().count() + 1;

        (
            SourceLocation::new(&self.file, line_num, column, 1),
            self.get_line(line_num),
        )
    }

    /// Get a specific line's content
    pub fn get_line(&self, line_num: usize) -> String {
        if line_num == 0 || line_num > self.lines.len() {
            return String::new();
        }

        let (start, end) = self.lines[line_num - 1];
        self.source[start..end].trim_end_matches('\r').to_string()
    }

    /// Report a diagnostic anchored at a byte offset
    pub fn report_at(&mut self, diagnostic: Diagnostic, offset: usize, length: usize, label: &str) {
        let (mut loc, line_content) = self.location_from_offset(offset);

        // Underline in characters, no further than the end of the first line
        let chars = self.source.get(offset..offset + length).map_or(1, |s| s.chars().count());
        let visible = line_content.chars().count().saturating_sub(loc.column - 1);
        loc.length = chars.min(visible).max(1);

        let diagnostic = diagnostic
            .with_label(loc.column, loc.length, label)
            .with_source_line(line_content)
            .with_location(loc);

        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Consume and return all diagnostics
    pub fn take_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl ErrorReporter for DiagnosticReporter {
    fn report(&mut self, error: LexError) {
        match error.kind {
            LexErrorKind::UnexpectedCharacter(c) => {
                let diagnostic = Diagnostic::error(codes::UNEXPECTED_CHARACTER, error.message())
                    .with_note(format!("'{}' does not start any token", c.escape_debug()));
                self.report_at(diagnostic, error.offset, error.length, "unexpected character");
            }
            LexErrorKind::UnterminatedString => {
                let mut diagnostic = Diagnostic::error(codes::UNTERMINATED_STRING, error.message())
                    .with_help("add a closing '\"' at the end of the string");

                // The error's line is where input ran out, which may be past the opening quote
                let (start, _) = self.location_from_offset(error.offset);
                if start.line != error.line {
                    diagnostic = diagnostic.with_note(format!("input ends on line {}", error.line));
                }
                self.report_at(diagnostic, error.offset, error.length, "string starts here");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;

    fn scan(source: &str) -> DiagnosticReporter {
        let mut reporter = DiagnosticReporter::new("test.lox", source);
        Scanner::new(source, &mut reporter).scan_tokens();
        reporter
    }

    #[test]
    fn clean_source_has_no_diagnostics() {
        let reporter = scan("print 1 + 2;");
        assert!(!reporter.has_errors());
        assert_eq!(reporter.error_count(), 0);
    }

    #[test]
    fn unexpected_character_location() {
        let reporter = scan("var a = 1;\nvar b = $;");
        assert_eq!(reporter.error_count(), 1);

        let diag = &reporter.diagnostics()[0];
        assert_eq!(diag.code, codes::UNEXPECTED_CHARACTER);
        assert_eq!(diag.message, "Unexpected character.");
        let loc = diag.location.as_ref().map(|l| (l.line, l.column, l.length));
        assert_eq!(loc, Some((2, 9, 1)));
        assert_eq!(diag.source_line.as_deref(), Some("var b = $;"));
    }

    #[test]
    fn every_lexical_error_becomes_one_labelled_diagnostic() {
        let reporter = scan("@ \"open");
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 2);

        let labels: Vec<_> = reporter
            .diagnostics()
            .iter()
            .flat_map(|d| d.labels.iter().map(|(_, _, label)| label.as_str()))
            .collect();
        assert_eq!(labels, vec!["unexpected character", "string starts here"]);
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let reporter = scan("\"é\" ~");
        let loc = reporter.diagnostics()[0].location.clone();
        assert_eq!(loc.map(|l| l.column), Some(5));
    }

    #[test]
    fn unterminated_string_points_at_opening_quote() {
        let reporter = scan("x = \"abc\ndef");
        let diags = reporter.take_diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, codes::UNTERMINATED_STRING);
        let loc = diags[0].location.as_ref().map(|l| (l.line, l.column, l.length));
        assert_eq!(loc, Some((1, 5, 4)));
        assert_eq!(diags[0].notes, vec!["input ends on line 2".to_string()]);
    }

    #[test]
    fn get_line_handles_out_of_range_and_crlf() {
        let reporter = DiagnosticReporter::new("f", "one\r\ntwo");
        assert_eq!(reporter.get_line(1), "one");
        assert_eq!(reporter.get_line(2), "two");
        assert_eq!(reporter.get_line(0), "");
        assert_eq!(reporter.get_line(3), "");
    }
}
