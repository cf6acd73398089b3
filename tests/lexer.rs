use chonker::{
    ast::Literal,
    error::Stage,
    interpreter::lexer::{Token, TokenKind, scan},
};
use pretty_assertions::assert_eq;

fn kinds(src: &str) -> Vec<TokenKind> {
    scan(src).unwrap_or_else(|e| panic!("Failed to scan {src:?}: {e:?}"))
             .iter()
             .map(|t| t.kind)
             .collect()
}

fn tokens(src: &str) -> Vec<Token> {
    scan(src).unwrap_or_else(|e| panic!("Failed to scan {src:?}: {e:?}"))
}

#[test]
fn operators_prefer_the_longest_match() {
    use TokenKind::{
        Bang, BangEqual, Eof, Equal, EqualEqual, Greater, GreaterEqual, Less, LessEqual, Slash,
    };

    assert_eq!(kinds("! != = == < <= > >= /"),
               vec![Bang, BangEqual, Equal, EqualEqual, Less, LessEqual, Greater, GreaterEqual,
                    Slash, Eof]);
}

#[test]
fn logical_operators_have_word_aliases() {
    use TokenKind::{And, Eof, Identifier, Or};

    assert_eq!(kinds("a && b || c and d or e"),
               vec![Identifier, And, Identifier, Or, Identifier, And, Identifier, Or, Identifier,
                    Eof]);
}

#[test]
fn keywords_are_whole_words() {
    use TokenKind::{Eof, Identifier, NumberType, Puts, Var, VoidType, While};

    assert_eq!(kinds("var variable number numbers puts putsy while void"),
               vec![Var, Identifier, NumberType, Identifier, Puts, Identifier, While, VoidType,
                    Eof]);
    assert!(TokenKind::ListType.is_variable_type());
    assert!(!TokenKind::VoidType.is_variable_type());
}

#[test]
fn number_and_string_literals() {
    let tokens = tokens("12 3.25 \"hi there\" 4.");

    assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
    assert_eq!(tokens[1].literal, Some(Literal::Number(3.25)));
    assert_eq!(tokens[2].literal, Some(Literal::from("hi there")));
    assert_eq!(tokens[2].lexeme, "\"hi there\"");
    assert_eq!(tokens[3].kind, TokenKind::Number);
    assert_eq!(tokens[4].kind, TokenKind::Dot);
    assert_eq!(tokens[0].lexeme, "12");
}

#[test]
fn comments_and_whitespace_are_skipped() {
    use TokenKind::{Eof, Identifier, Semicolon};

    assert_eq!(kinds("a; // the rest is ignored ;;;\n\t b /* block\n comment */ ;\r\n"),
               vec![Identifier, Semicolon, Identifier, Semicolon, Eof]);
    assert_eq!(kinds("a /* never closed ; b"), vec![Identifier, Eof]);
    assert_eq!(kinds(""), vec![Eof]);
}

#[test]
fn lines_are_counted() {
    let tokens = tokens("one\ntwo /* a\nb\n */ three\n\"multi\nline\" four\n");
    let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();

    assert_eq!(lines, vec![1, 2, 4, 6, 6, 7]);
    assert_eq!(tokens[3].literal, Some(Literal::from("multi\nline")));
}

#[test]
fn every_error_is_reported() {
    let errors = scan("@\n#\n& | \"open").unwrap_err();
    let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();

    assert_eq!(rendered,
               vec!["Scanner error:\n[ 1 ] Unexpected character '@'.\n".to_string(),
                    "Scanner error:\n[ 2 ] Unexpected character '#'.\n".to_string(),
                    "Scanner error:\n[ 3 ] Another '&' expected after single '&'.\n".to_string(),
                    "Scanner error:\n[ 3 ] Another '|' expected after single '|'.\n".to_string(),
                    "Scanner error:\n[ 3 ] Unterminated string.\n".to_string(),]);
    assert!(errors.iter().all(|e| e.stage() == Stage::Scanner));
}

#[test]
fn unterminated_strings_report_their_opening_line() {
    let errors = scan("puts 1;\nputs \"never\nclosed\n;\n").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "Scanner error:\n[ 2 ] Unterminated string.\n");
}

#[test]
fn lexemes_cover_the_source() {
    let src = "number x=1;\nputs  x;";
    let tokens = tokens(src);
    let covered: usize = tokens.iter().map(|t| t.lexeme.len()).sum();
    let whitespace = src.chars().filter(|c| c.is_whitespace()).count();

    assert_eq!(covered + whitespace, src.len());
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}
