/// Represents all errors that can occur while scanning source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A character that starts no token.
    #[error("Unexpected character '{character}'")]
    UnexpectedCharacter {
        /// The offending character.
        character: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A single `&`; only `&&` is an operator.
    #[error("Another '&' expected after single '&'")]
    LoneAmpersand {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A single `|`; only `||` is an operator.
    #[error("Another '|' expected after single '|'")]
    LonePipe {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal that reaches the end of input without a closing `"`.
    #[error("Unterminated string")]
    UnterminatedString {
        /// The line the input ended on.
        line: usize,
    },
    /// A numeric literal that could not be converted to a double.
    #[error("Invalid number literal '{literal}'")]
    InvalidNumber {
        /// The literal text.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl LexError {
    /// Returns the source line of the error.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::LoneAmpersand { line }
            | Self::LonePipe { line }
            | Self::UnterminatedString { line }
            | Self::InvalidNumber { line, .. } => *line,
        }
    }

    /// Lexing errors name their input in the message itself.
    #[must_use]
    pub const fn location(&self) -> Option<&str> {
        None
    }
}
