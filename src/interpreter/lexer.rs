use logos::Logos;

use crate::{
    ast::Literal,
    error::{Error, LexError},
};

/// The kind of a lexical token.
///
/// Keywords are matched as whole words: logos prefers the longest match, so
/// `variable` lexes as an identifier while `var` lexes as [`TokenKind::Var`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
pub enum TokenKind {
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `[`
    #[token("[")]
    LeftBracket,
    /// `]`
    #[token("]")]
    RightBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `:`
    #[token(":")]
    Colon,
    /// `?`
    #[token("?")]
    Question,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&` or `and`
    #[token("&&")]
    #[token("and")]
    #[token("&", lone_ampersand)]
    And,
    /// `||` or `or`
    #[token("||")]
    #[token("or")]
    #[token("|", lone_pipe)]
    Or,

    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// String literal tokens. The callback consumes everything up to the
    /// closing quote.
    #[token("\"", string_literal)]
    String,
    /// Numeric literal tokens, such as `42` or `3.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    /// `class`
    #[token("class")]
    Class,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `for`
    #[token("for")]
    For,
    /// `function`
    #[token("function")]
    Function,
    /// `if`
    #[token("if")]
    If,
    /// `null`
    #[token("null")]
    Null,
    /// `print`
    #[token("print")]
    Print,
    /// `puts`
    #[token("puts")]
    Puts,
    /// `return`
    #[token("return")]
    Return,
    /// `super`
    #[token("super")]
    Super,
    /// `this`
    #[token("this")]
    This,
    /// `true`
    #[token("true")]
    True,
    /// `var`
    #[token("var")]
    Var,
    /// `while`
    #[token("while")]
    While,
    /// `break`
    #[token("break")]
    Break,
    /// `string`
    #[token("string")]
    StringType,
    /// `number`
    #[token("number")]
    NumberType,
    /// `bool`
    #[token("bool")]
    BoolType,
    /// `list`
    #[token("list")]
    ListType,
    /// `void`
    #[token("void")]
    VoidType,
    /// `switch`
    #[token("switch")]
    Switch,
    /// `case`
    #[token("case")]
    Case,
    /// `default`
    #[token("default")]
    Default,

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `/* Block comments. */`, closed by the first `*/` or by the end of
    /// input.
    #[token("/*", block_comment)]
    BlockComment,
    /// Line breaks.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r]+", logos::skip)]
    Ignored,

    /// End of input. Never produced by logos; [`scan`] appends it.
    Eof,
}

impl TokenKind {
    /// Returns `true` for the keywords that name a variable type.
    #[must_use]
    pub const fn is_variable_type(self) -> bool {
        matches!(self,
                 Self::NumberType | Self::StringType | Self::BoolType | Self::ListType)
    }
}

/// The reason logos rejected a piece of input.
///
/// Converted into a [`LexError`] together with the current line once the
/// lexer reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// No token starts with this character.
    #[default]
    UnexpectedCharacter,
    /// A `&` not followed by another `&`.
    LoneAmpersand,
    /// A `|` not followed by another `|`.
    LonePipe,
    /// A `"` never closed.
    UnterminatedString,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for tokens and diagnostics. Newlines inside
/// strings and block comments are counted as they are consumed.
#[derive(Debug)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// A token produced by [`scan`].
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The exact source text, quotes included for strings.
    pub lexeme:  String,
    /// The value of `NUMBER` and `STRING` tokens.
    pub literal: Option<Literal>,
    /// The line the token ends on.
    pub line:    usize,
}

impl Token {
    /// Creates a token without a literal payload.
    ///
    /// Used by the parser when it synthesizes operators during desugaring.
    #[must_use]
    pub fn synthetic(kind: TokenKind, lexeme: &str, line: usize) -> Self {
        Self { kind,
               lexeme: lexeme.to_string(),
               literal: None,
               line }
    }
}

/// Converts source text into tokens.
///
/// Scanning continues past every error so that all of them can be reported
/// at once; the token vector is only returned when the source is clean. On
/// success the last token is always [`TokenKind::Eof`].
///
/// # Errors
/// Returns every lexing error found in the source.
///
/// # Example
/// ```
/// use chonker::interpreter::lexer::{TokenKind, scan};
///
/// let tokens = scan("number x = 4.5;").unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::NumberType,
///                 TokenKind::Identifier,
///                 TokenKind::Equal,
///                 TokenKind::Number,
///                 TokenKind::Semicolon,
///                 TokenKind::Eof]);
///
/// assert!(scan("\"never closed").is_err());
/// ```
pub fn scan(source: &str) -> Result<Vec<Token>, Vec<Error>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = TokenKind::lexer_with_extras(source, LexerExtras::default());

    while let Some(result) = lexer.next() {
        let line = lexer.extras.line;
        let lexeme = lexer.slice();

        match result {
            Ok(kind) => match literal_of(kind, lexeme, line) {
                Ok(literal) => tokens.push(Token { kind,
                                                   lexeme: lexeme.to_string(),
                                                   literal,
                                                   line }),
                Err(e) => errors.push(Error::from(e)),
            },
            Err(kind) => {
                let error = match kind {
                    LexErrorKind::UnexpectedCharacter => {
                        LexError::UnexpectedCharacter { character: lexeme.to_string(),
                                                        line }
                    },
                    LexErrorKind::LoneAmpersand => LexError::LoneAmpersand { line },
                    LexErrorKind::LonePipe => LexError::LonePipe { line },
                    LexErrorKind::UnterminatedString => LexError::UnterminatedString { line },
                };
                tracing::debug!(%error, "lexing error");
                errors.push(Error::from(error));
            },
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    tokens.push(Token::synthetic(TokenKind::Eof, "", lexer.extras.line));
    tracing::debug!(count = tokens.len(), "scanned source");

    Ok(tokens)
}

/// Extracts the literal value carried by `NUMBER` and `STRING` tokens.
///
/// # Parameters
/// - `kind`: The token kind.
/// - `lexeme`: The matched source text.
/// - `line`: Line used for error reporting.
///
/// # Returns
/// - `Ok(Some(Literal))` for numbers and strings.
/// - `Ok(None)` for every other token.
/// - `Err(LexError::InvalidNumber)` if a number does not parse as a double.
fn literal_of(kind: TokenKind, lexeme: &str, line: usize) -> Result<Option<Literal>, LexError> {
    match kind {
        TokenKind::Number => {
            let value = lexeme.parse::<f64>()
                              .map_err(|_| LexError::InvalidNumber { literal: lexeme.to_string(),
                                                                     line })?;
            Ok(Some(Literal::Number(value)))
        },
        TokenKind::String => {
            let inner = lexeme.strip_prefix('"')
                              .and_then(|rest| rest.strip_suffix('"'))
                              .unwrap_or_default();
            Ok(Some(Literal::from(inner)))
        },
        _ => Ok(None),
    }
}

/// Consumes a string literal after its opening quote.
///
/// On a missing closing quote the rest of the input is consumed so that
/// scanning ends there. The line is left at the opening quote, where the
/// error is reported.
fn string_literal(lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    let remainder = lex.remainder();

    let Some(end) = remainder.find('"') else {
        lex.bump(remainder.len());
        return Err(LexErrorKind::UnterminatedString);
    };

    lex.extras.line += remainder[..end].matches('\n').count();
    lex.bump(end + 1);
    Ok(())
}

/// Skips a block comment. Comments do not nest.
fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    let remainder = lex.remainder();
    let length = remainder.find("*/").map_or(remainder.len(), |end| end + 2);

    lex.extras.line += remainder[..length].matches('\n').count();
    lex.bump(length);
    logos::Skip
}

fn lone_ampersand(_: &mut logos::Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::LoneAmpersand)
}

fn lone_pipe(_: &mut logos::Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::LonePipe)
}
