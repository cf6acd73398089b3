/// Lexing errors.
///
/// Defines the failures the scanner can report: stray characters, a single
/// `&` or `|`, and strings that never close.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree:
/// missing punctuation, malformed declarations, invalid assignment targets
/// and functions that can never return their declared type.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include type mismatches, unknown names, division by zero, bad
/// subscripts, misplaced control flow and failures inside native functions.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The pipeline stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Raised by the lexer.
    Scanner,
    /// Raised by the parser.
    Parser,
    /// Raised by the evaluator.
    Interpreter,
    /// Raised inside a built-in function.
    NativeFunction,
    /// A failure of the host rather than of the program.
    Internal,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Scanner => "Scanner",
            Self::Parser => "Parser",
            Self::Interpreter => "Interpreter",
            Self::NativeFunction => "Native Function",
            Self::Internal => "Internal",
        };
        write!(f, "{name}")
    }
}

/// Any error that aborts the pipeline.
///
/// The `Display` implementation renders the diagnostic block printed by the
/// command line front-end:
///
/// ```text
/// Parser error:
/// [ 1 ] Expect ';' after value. at end.
///
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lexing failure.
    #[error("{}", render(Stage::Scanner, .0.line(), .0, .0.location()))]
    Lex(#[from] LexError),
    /// A parsing failure.
    #[error("{}", render(Stage::Parser, .0.line(), .0, .0.location()))]
    Parse(#[from] ParseError),
    /// A runtime failure.
    #[error("{}", render(.0.stage(), .0.line(), .0, .0.location()))]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the stage that raised this error.
    ///
    /// # Example
    /// ```
    /// use chonker::error::{Error, LexError, Stage};
    ///
    /// let error = Error::from(LexError::UnterminatedString { line: 2 });
    /// assert_eq!(error.stage(), Stage::Scanner);
    /// ```
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Lex(_) => Stage::Scanner,
            Self::Parse(_) => Stage::Parser,
            Self::Runtime(e) => e.stage(),
        }
    }

    /// Returns the source line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line(),
            Self::Parse(e) => e.line(),
            Self::Runtime(e) => e.line(),
        }
    }

    /// Returns the offending lexeme, if the error is tied to a token.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Lex(e) => e.location(),
            Self::Parse(e) => e.location(),
            Self::Runtime(e) => e.location(),
        }
    }
}

fn render(stage: Stage,
          line: usize,
          message: &dyn std::fmt::Display,
          location: Option<&str>)
          -> String {
    let mut text = format!("{stage} error:\n[ {line} ] {message}.");
    if let Some(lexeme) = location {
        text.push_str(&format!(" at {lexeme}."));
    }
    text.push('\n');
    text
}
