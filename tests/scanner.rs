use loxide as lox;

use lox::scanner::Scanner;
use lox::token::{Token, TokenType};

fn scan_ok(source: &str) -> Vec<Token> {
    Scanner::new(source).filter_map(Result::ok).collect()
}

fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
    let tokens = scan_ok(source);

    assert_eq!(tokens.len(), expected.len());

    for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
        assert_eq!(actual.token_type, *expected_type);
        assert_eq!(actual.lexeme, *expected_lexeme);
    }
}

#[test]
fn symbols() {
    assert_token_sequence(
        "({*.,+*})",
        &[
            (TokenType::LEFT_PAREN, "("),
            (TokenType::LEFT_BRACE, "{"),
            (TokenType::STAR, "*"),
            (TokenType::DOT, "."),
            (TokenType::COMMA, ","),
            (TokenType::PLUS, "+"),
            (TokenType::STAR, "*"),
            (TokenType::RIGHT_BRACE, "}"),
            (TokenType::RIGHT_PAREN, ")"),
            (TokenType::EOF, ""),
        ],
    );
}

#[test]
fn one_or_two_character_operators() {
    assert_token_sequence(
        "! != = == < <= > >= /",
        &[
            (TokenType::BANG, "!"),
            (TokenType::BANG_EQUAL, "!="),
            (TokenType::EQUAL, "="),
            (TokenType::EQUAL_EQUAL, "=="),
            (TokenType::LESS, "<"),
            (TokenType::LESS_EQUAL, "<="),
            (TokenType::GREATER, ">"),
            (TokenType::GREATER_EQUAL, ">="),
            (TokenType::SLASH, "/"),
            (TokenType::EOF, ""),
        ],
    );
}

#[test]
fn keywords_override_identifiers() {
    assert_token_sequence(
        "and assert class fun while andover",
        &[
            (TokenType::AND, "and"),
            (TokenType::ASSERT, "assert"),
            (TokenType::CLASS, "class"),
            (TokenType::FUN, "fun"),
            (TokenType::WHILE, "while"),
            (TokenType::IDENTIFIER, "andover"),
            (TokenType::EOF, ""),
        ],
    );
}

#[test]
fn number_literals_carry_their_value() {
    let tokens = scan_ok("12 3.45 6.");

    match &tokens[0].token_type {
        TokenType::NUMBER(n) => assert_eq!(*n, 12.0),
        other => panic!("expected NUMBER, got {:?}", other),
    }

    match &tokens[1].token_type {
        TokenType::NUMBER(n) => assert_eq!(*n, 3.45),
        other => panic!("expected NUMBER, got {:?}", other),
    }

    // A trailing dot is not part of the number.
    match &tokens[2].token_type {
        TokenType::NUMBER(n) => assert_eq!(*n, 6.0),
        other => panic!("expected NUMBER, got {:?}", other),
    }
    assert_eq!(tokens[3].token_type, TokenType::DOT);
}

#[test]
fn string_literals_decode_without_quotes() {
    let tokens = scan_ok("\"hello world\"");

    match &tokens[0].token_type {
        TokenType::STRING(s) => assert_eq!(s, "hello world"),
        other => panic!("expected STRING, got {:?}", other),
    }
    assert_eq!(tokens[0].lexeme, "\"hello world\"");
}

#[test]
fn strings_may_span_lines() {
    let tokens = scan_ok("\"a\nb\"\nfoo");

    match &tokens[0].token_type {
        TokenType::STRING(s) => assert_eq!(s, "a\nb"),
        other => panic!("expected STRING, got {:?}", other),
    }
    assert_eq!(tokens[0].line, 2);

    assert_eq!(tokens[1].token_type, TokenType::IDENTIFIER);
    assert_eq!(tokens[1].line, 3);
}

#[test]
fn comments_and_whitespace_are_skipped() {
    assert_token_sequence(
        "// a comment\nprint\t1; // trailing",
        &[
            (TokenType::PRINT, "print"),
            (TokenType::NUMBER(0.0), "1"),
            (TokenType::SEMICOLON, ";"),
            (TokenType::EOF, ""),
        ],
    );
}

#[test]
fn newlines_advance_the_line_counter() {
    let tokens = scan_ok("a\nb\n\nc");

    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[2].line, 4);
    // EOF carries the final line.
    assert_eq!(tokens[3].token_type, TokenType::EOF);
    assert_eq!(tokens[3].line, 4);
}

#[test]
fn unexpected_characters_report_and_continue() {
    let results: Vec<_> = Scanner::new(",.$(#").collect();

    // ',' '.' Err('$') '(' Err('#') EOF
    assert_eq!(results.len(), 6);

    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(results[2].is_err());
    assert!(results[3].is_ok());
    assert!(results[4].is_err());
    assert!(results[5].is_ok());

    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(
            err.to_string().contains("Unexpected character"),
            "unexpected message: {}",
            err
        );
    }

    match &results[5] {
        Ok(token) => assert_eq!(token.token_type, TokenType::EOF),
        Err(e) => panic!("expected EOF token, got error: {}", e),
    }
}

#[test]
fn unterminated_string_reports_the_opening_line() {
    let results: Vec<_> = Scanner::new("\"abc\ndef").collect();

    assert_eq!(results.len(), 2);

    match &results[0] {
        Err(err) => {
            let rendered = err.to_string();
            assert!(rendered.contains("[line 1]"), "got: {}", rendered);
            assert!(rendered.contains("Unterminated string."), "got: {}", rendered);
        }
        Ok(token) => panic!("expected an error, got {:?}", token),
    }

    match &results[1] {
        Ok(token) => assert_eq!(token.token_type, TokenType::EOF),
        Err(e) => panic!("expected EOF token, got error: {}", e),
    }
}

#[test]
fn relexing_lexemes_yields_the_same_kinds() {
    let source = "var x = 1 + 2.5; print \"ok\"; // tail\nif (x >= 3) { x = x / 2; }";
    let first = scan_ok(source);

    let rejoined: String = first
        .iter()
        .map(|t| t.lexeme.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let second = scan_ok(&rejoined);

    let first_kinds: Vec<_> = first.iter().map(|t| t.token_type.clone()).collect();
    let second_kinds: Vec<_> = second.iter().map(|t| t.token_type.clone()).collect();

    assert_eq!(first_kinds, second_kinds);
}
