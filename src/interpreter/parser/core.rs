use std::iter::Peekable;

use crate::{
    ast::{Expr, Stmt},
    error::{Error, ParseError},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::parse_assignment,
            statement::parse_declaration,
            utils::{peek_kind, synchronize},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// Declarations are parsed one after another until the end-of-file token.
/// When a declaration fails, the error is recorded and the parser skips ahead
/// to the next statement boundary, so a single run reports every independent
/// syntax error. Blocks recover the same way without leaving the block.
///
/// Grammar: `program := declaration* EOF`
///
/// # Parameters
/// - `tokens`: The token vector produced by the lexer.
///
/// # Returns
/// The statements of the program, in source order.
///
/// # Errors
/// Returns every parse error found, in source order.
///
/// # Example
/// ```
/// use chonker::interpreter::{lexer::scan, parser::core::parse_program};
///
/// let tokens = scan("number a = 1, b = 2; puts a + b;").unwrap();
/// let program = parse_program(&tokens).unwrap();
/// assert_eq!(program.len(), 3);
///
/// let tokens = scan("puts 1 puts 2; puts (3;").unwrap();
/// let errors = parse_program(&tokens).unwrap_err();
/// assert_eq!(errors.len(), 2);
///
/// let tokens = scan("{ puts 1 puts 2; puts 3; }").unwrap();
/// let errors = parse_program(&tokens).unwrap_err();
/// assert_eq!(errors.len(), 1);
/// ```
pub fn parse_program(tokens: &[Token]) -> Result<Vec<Stmt>, Vec<Error>> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();
    let mut errors = Vec::new();

    while peek_kind(&mut iter) != TokenKind::Eof {
        if let Err(error) = parse_declaration(&mut iter, &mut statements, &mut errors) {
            tracing::debug!(%error, "parse error, synchronizing");
            errors.push(error);
            synchronize(&mut iter, false);
        }
    }

    if !errors.is_empty() {
        return Err(errors.into_iter().map(Error::from).collect());
    }

    tracing::debug!(count = statements.len(), "parsed program");
    Ok(statements)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, assignment, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first token of the
///   expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_assignment(tokens)
}
