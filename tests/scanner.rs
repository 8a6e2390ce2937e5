use lox::lexer::{ErrorReporter, FnReporter, LexError, LexErrorKind, Scanner};
use lox::{scan_tokens, Driver, Literal, Token, TokenType};

fn types(tokens: &[Token]) -> Vec<TokenType> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn small_program() {
    let source = "\
class Point {
  init(x, y) {
    this.x = x; // store
    this.y = y;
  }
}

var p = Point(1, 2.5);
if (p.x >= 1 and p.y != nil) print \"ok\";
";
    let result = scan_tokens(source);
    assert!(result.errors.is_empty(), "{:?}", result.errors);

    let tokens = &result.tokens;
    assert_eq!(tokens[0].kind, TokenType::Class);
    assert_eq!(tokens[1].lexeme, "Point");

    let this = tokens.iter().find(|t| t.kind == TokenType::This).map(|t| t.line);
    assert_eq!(this, Some(3));

    let numbers: Vec<_> = tokens.iter().filter_map(|t| t.literal.as_ref()).filter_map(Literal::as_number).collect();
    assert_eq!(numbers, vec![1.0, 2.5, 1.0]);

    let ok = tokens.iter().find(|t| t.kind == TokenType::String);
    assert_eq!(ok.map(|t| (t.lexeme.as_str(), t.line)), Some(("\"ok\"", 9)));

    assert_eq!(tokens.last(), Some(&Token::eof(10)));
}

#[test]
fn errors_do_not_leave_gaps_in_structure() {
    let result = scan_tokens("print 1 | 2;\nprint \"never closed");
    let kinds: Vec<_> = result.errors.iter().map(|e| (e.kind, e.line)).collect();
    assert_eq!(
        kinds,
        vec![
            (LexErrorKind::UnexpectedCharacter('|'), 1),
            (LexErrorKind::UnterminatedString, 2),
        ]
    );
    assert_eq!(
        types(&result.tokens),
        vec![
            TokenType::Print,
            TokenType::Number,
            TokenType::Number,
            TokenType::Semicolon,
            TokenType::Print,
            TokenType::Eof,
        ]
    );
}

#[test]
fn custom_reporter_sees_errors_in_order() {
    struct Counting {
        lines: Vec<usize>,
    }

    impl ErrorReporter for Counting {
        fn report(&mut self, error: LexError) {
            self.lines.push(error.line);
        }
    }

    let mut reporter = Counting { lines: Vec::new() };
    let tokens = Scanner::new("?\n\n^ ok", &mut reporter).scan_tokens();
    assert_eq!(reporter.lines, vec![1, 3]);
    assert_eq!(types(&tokens), vec![TokenType::Identifier, TokenType::Eof]);
}

#[test]
fn line_callback_matches_stderr_format() {
    let mut reported = Vec::new();
    {
        let mut reporter = FnReporter(|line: usize, message: &str| reported.push(format!("[line {line}] Error: {message}")));
        Scanner::new("\"abc", &mut reporter).scan_tokens();
    }
    assert_eq!(reported, vec!["[line 1] Error: Unterminated string.".to_string()]);
    assert_eq!(scan_tokens("\"abc").errors[0].to_string(), reported[0]);
}

#[test]
fn driver_reads_script_from_disk() {
    let path = std::env::temp_dir().join(format!("lox-scanner-test-{}.lox", std::process::id()));
    std::fs::write(&path, "var greeting = \"hi\";\n@\n").expect("write temp script");

    let driver = Driver::from_file(&path).expect("read temp script");
    let output = driver.scan();
    let _ = std::fs::remove_file(&path);

    assert_eq!(output.error_count(), 1);
    assert_eq!(output.diagnostics[0].line(), Some(2));
    assert_eq!(output.tokens.last(), Some(&Token::eof(3)));
}
