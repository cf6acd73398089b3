use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Token, value::core::Value},
    util::num::f64_to_usize_checked,
};

/// Validates a subscript and converts it to a position.
///
/// The index must be a whole, non-negative number smaller than the list
/// length.
///
/// # Parameters
/// - `index`: The evaluated index.
/// - `length`: Length of the subscripted list.
/// - `bracket`: The `[` token, for error reporting.
///
/// # Returns
/// The position of the element.
///
/// # Errors
/// - `InvalidIndex` for non-numbers and fractional numbers.
/// - `IndexOutOfBounds` for negative indices and indices past the end.
///
/// # Example
/// ```
/// use chonker::{
///     error::RuntimeError,
///     interpreter::{
///         evaluator::utils::subscript_index,
///         lexer::{Token, TokenKind},
///         value::core::Value,
///     },
/// };
///
/// let bracket = Token::synthetic(TokenKind::LeftBracket, "[", 4);
///
/// assert_eq!(subscript_index(&Value::Number(2.0), 3, &bracket).unwrap(), 2);
///
/// let err = subscript_index(&Value::Number(3.0), 3, &bracket).unwrap_err();
/// assert!(matches!(err, RuntimeError::IndexOutOfBounds { length: 3, line: 4, .. }));
///
/// let err = subscript_index(&Value::Number(0.5), 3, &bracket).unwrap_err();
/// assert!(matches!(err, RuntimeError::InvalidIndex { line: 4, .. }));
/// ```
pub fn subscript_index(index: &Value, length: usize, bracket: &Token) -> EvalResult<usize> {
    let invalid = || RuntimeError::InvalidIndex { index:  index.to_string(),
                                                  lexeme: bracket.lexeme.clone(),
                                                  line:   bracket.line, };
    let out_of_bounds = || RuntimeError::IndexOutOfBounds { index: index.to_string(),
                                                            length,
                                                            lexeme: bracket.lexeme.clone(),
                                                            line: bracket.line };

    let Some(number) = index.as_number() else {
        return Err(invalid());
    };
    if number.fract() != 0.0 || number.is_nan() {
        return Err(invalid());
    }

    match f64_to_usize_checked(number, ()) {
        Ok(position) if position < length => Ok(position),
        _ => Err(out_of_bounds()),
    }
}
