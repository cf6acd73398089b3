use std::iter::Peekable;

use crate::{
    ast::DeclaredType,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Keywords that start a fresh declaration; recovery stops in front of them.
const STATEMENT_STARTS: [TokenKind; 10] = [TokenKind::Class,
                                           TokenKind::Function,
                                           TokenKind::Var,
                                           TokenKind::For,
                                           TokenKind::If,
                                           TokenKind::While,
                                           TokenKind::Print,
                                           TokenKind::Puts,
                                           TokenKind::Break,
                                           TokenKind::Return];

/// Returns the kind of the next token, or `Eof` once the stream is drained.
pub(in crate::interpreter::parser) fn peek_kind<'a, I>(tokens: &mut Peekable<I>) -> TokenKind
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().map_or(TokenKind::Eof, |token| token.kind)
}

/// Consumes the next token if its kind is one of `kinds`.
pub(in crate::interpreter::parser) fn advance_if<'a, I>(tokens: &mut Peekable<I>,
                                                        kinds: &[TokenKind])
                                                        -> Option<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.next_if(|token| kinds.contains(&token.kind))
}

/// Consumes a token of the given kind.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `kind`: The required token kind.
/// - `message`: The error message used when the token is missing, e.g.
///   `"Expect ';' after value"`.
///
/// # Returns
/// The consumed token.
///
/// # Errors
/// Returns `ParseError::Expected` pointing at the token found instead.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: TokenKind,
                                                    message: &str)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.next_if(|token| token.kind == kind)
          .ok_or_else(|| expected(tokens, message))
}

/// Builds an `Expected` error pointing at the next token.
pub(in crate::interpreter::parser) fn expected<'a, I>(tokens: &mut Peekable<I>,
                                                      message: &str)
                                                      -> ParseError
    where I: Iterator<Item = &'a Token>
{
    let (found, line) = location(tokens.peek().copied());
    ParseError::Expected { message: message.to_string(),
                           found,
                           line }
}

/// Describes where an error occurred: the lexeme (`"end"` at end of input)
/// and its line.
pub(in crate::interpreter::parser) fn location(token: Option<&Token>) -> (String, usize) {
    match token {
        Some(token) if token.kind != TokenKind::Eof => (token.lexeme.clone(), token.line),
        Some(token) => ("end".to_string(), token.line),
        None => ("end".to_string(), 0),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals, call arguments and parameter
/// lists. It repeatedly calls `parse_item` to parse one element, expecting
/// either a comma to continue the list or the closing token to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token kind that terminates the list (e.g. `]` or `)`).
/// - `message`: Error message used when the closing token is missing.
///
/// # Returns
/// The parsed items together with the closing token.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse or the closing token is
/// missing.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: TokenKind,
    message: &str)
    -> ParseResult<(Vec<T>, &'a Token)>
    where I: Iterator<Item = &'a Token>
{
    let mut items = Vec::new();
    if let Some(close) = advance_if(tokens, &[closing]) {
        return Ok((items, close));
    }

    loop {
        items.push(parse_item(tokens)?);
        if advance_if(tokens, &[TokenKind::Comma]).is_none() {
            break;
        }
    }

    let close = expect(tokens, closing, message)?;
    Ok((items, close))
}

/// Maps a type keyword to its declared type.
///
/// `void` is only accepted when `allow_void` is set, which is the case for
/// function return types.
pub(in crate::interpreter::parser) const fn declared_type(kind: TokenKind,
                                                          allow_void: bool)
                                                          -> Option<DeclaredType> {
    match kind {
        TokenKind::NumberType => Some(DeclaredType::Number),
        TokenKind::StringType => Some(DeclaredType::String),
        TokenKind::BoolType => Some(DeclaredType::Bool),
        TokenKind::ListType => Some(DeclaredType::List),
        TokenKind::VoidType if allow_void => Some(DeclaredType::Void),
        _ => None,
    }
}

/// Consumes a type keyword.
///
/// # Errors
/// Returns `ParseError::Expected` with `message` if the next token is not an
/// accepted type keyword.
pub(in crate::interpreter::parser) fn expect_type<'a, I>(tokens: &mut Peekable<I>,
                                                         allow_void: bool,
                                                         message: &str)
                                                         -> ParseResult<DeclaredType>
    where I: Iterator<Item = &'a Token>
{
    match declared_type(peek_kind(tokens), allow_void) {
        Some(ty) => {
            tokens.next();
            Ok(ty)
        },
        None => Err(expected(tokens, message)),
    }
}

/// Skips tokens after a parse error until a likely statement boundary.
///
/// The offending token is always skipped. Skipping then stops right after a
/// `;` or in front of a keyword that starts a declaration. Inside a block it
/// also stops in front of the closing `}` so the block can still end.
pub(in crate::interpreter::parser) fn synchronize<'a, I>(tokens: &mut Peekable<I>,
                                                         inside_block: bool)
    where I: Iterator<Item = &'a Token>
{
    if inside_block && peek_kind(tokens) == TokenKind::RightBrace {
        return;
    }
    let Some(mut previous) = tokens.next_if(|token| token.kind != TokenKind::Eof) else {
        return;
    };

    while previous.kind != TokenKind::Semicolon {
        let kind = peek_kind(tokens);
        if kind == TokenKind::Eof
           || STATEMENT_STARTS.contains(&kind)
           || (inside_block && kind == TokenKind::RightBrace)
        {
            return;
        }
        match tokens.next() {
            Some(token) => previous = token,
            None => return,
        }
    }
}
