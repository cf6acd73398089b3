/// Represents all errors that can occur during parsing.
///
/// Every variant records the lexeme the parser was looking at (`"end"` once
/// the input is exhausted) so the diagnostic can point at it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A required token was missing, e.g. `Expect ';' after value`.
    #[error("{message}")]
    Expected {
        /// What the parser expected, phrased as a sentence.
        message: String,
        /// The lexeme found instead.
        found:   String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// No expression starts at the current token.
    #[error("Expect expression")]
    ExpectedExpression {
        /// The lexeme found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The left side of `=` is not a plain variable.
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget {
        /// The `=` lexeme.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A switch body with two `default` branches.
    #[error("One switch statement can't have more than one 'default' branch")]
    DuplicateDefault {
        /// The second `default` lexeme.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A non-void function whose body contains no `return` with a value.
    #[error("Function '{name}' must return a value of type {return_type}")]
    MissingReturn {
        /// The function name.
        name:        String,
        /// The declared return type.
        return_type: crate::ast::DeclaredType,
        /// The line of the function name.
        line:        usize,
    },
}

impl ParseError {
    /// Returns the source line of the error.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Expected { line, .. }
            | Self::ExpectedExpression { line, .. }
            | Self::InvalidAssignmentTarget { line, .. }
            | Self::DuplicateDefault { line, .. }
            | Self::MissingReturn { line, .. } => *line,
        }
    }

    /// Returns the lexeme the parser stopped at.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Expected { found, .. }
            | Self::ExpectedExpression { found, .. }
            | Self::InvalidAssignmentTarget { found, .. }
            | Self::DuplicateDefault { found, .. } => Some(found),
            Self::MissingReturn { name, .. } => Some(name),
        }
    }
}
