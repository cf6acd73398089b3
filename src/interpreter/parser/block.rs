use std::iter::Peekable;

use crate::{
    ast::Stmt,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            statement::parse_declaration,
            utils::{expect, peek_kind, synchronize},
        },
    },
};

/// Parses the declarations of a block after its opening brace.
///
/// A declaration that fails is recorded in `errors` and the parser skips to
/// the next statement boundary inside the block, so one bad line does not
/// take the rest of the block down with it.
///
/// Grammar: `block := "{" declaration* "}"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `{`.
/// - `errors`: Receives the errors of declarations that were skipped.
///
/// # Returns
/// The statements of the block that parsed, in source order.
///
/// # Errors
/// Returns a `ParseError` if the closing `}` is missing.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>,
                          errors: &mut Vec<ParseError>)
                          -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a Token>
{
    let mut statements = Vec::new();

    while !matches!(peek_kind(tokens), TokenKind::RightBrace | TokenKind::Eof) {
        if let Err(error) = parse_declaration(tokens, &mut statements, errors) {
            tracing::debug!(%error, "parse error in block, synchronizing");
            errors.push(error);
            synchronize(tokens, true);
        }
    }

    expect(tokens, TokenKind::RightBrace, "Expect '}' after block")?;
    Ok(statements)
}
