use std::iter::Peekable;

use crate::{
    ast::{Expr, Literal, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{advance_if, expect, location, parse_comma_separated},
        },
    },
};

/// Parses unary expressions.
///
/// Supports logical not (`!`) and numeric negation (`-`). Prefix operators
/// nest, so `!!flag` and `- -x` are accepted, and they bind looser than
/// calls and subscripts: `-f(x)` negates the result of the call.
///
/// The rule is: `unary := ("!" | "-") unary | postfix`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An `Expr::Unary` node, or the postfix expression if no operator is
/// present.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let Some(operator) = advance_if(tokens, &[TokenKind::Bang, TokenKind::Minus]) else {
        return parse_postfix(tokens);
    };

    let op = if operator.kind == TokenKind::Bang { UnaryOperator::Not } else { UnaryOperator::Negate };
    let right = parse_unary(tokens)?;

    Ok(Expr::Unary { op,
                     operator: operator.clone(),
                     right: Box::new(right) })
}

/// Parses calls and subscripts following a primary expression.
///
/// Both postfix forms can be chained in any order: `table[0](1)` calls the
/// first element of `table`, and `make()[2]` subscripts a call result.
///
/// The rule is: `postfix := primary ("(" arguments? ")" | "[" expression "]")*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// The primary expression wrapped in `Expr::Call` and `Expr::Subscript`
/// nodes.
///
/// # Errors
/// Returns a `ParseError` if an argument list or subscript is not closed.
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_primary(tokens)?;

    while let Some(open) = advance_if(tokens, &[TokenKind::LeftParen, TokenKind::LeftBracket]) {
        if open.kind == TokenKind::LeftParen {
            let (arguments, paren) = parse_comma_separated(tokens,
                                                           parse_expression,
                                                           TokenKind::RightParen,
                                                           "Expect ')' after arguments")?;
            expr = Expr::Call { callee: Box::new(expr),
                                paren: paren.clone(),
                                arguments };
        } else {
            let index = parse_expression(tokens)?;
            expect(tokens, TokenKind::RightBracket, "Expect ']' after index")?;
            expr = Expr::Subscript { list:    Box::new(expr),
                                     index:   Box::new(index),
                                     bracket: open.clone(), };
        }
    }

    Ok(expr)
}

/// Parses a primary expression.
///
/// Primary expressions are literals, variable references, parenthesized
/// expressions and list literals.
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// Returns `ParseError::ExpectedExpression` if no expression starts at the
/// next token; the token is left unconsumed.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let Some(token) = tokens.peek().copied() else {
        let (found, line) = location(None);
        return Err(ParseError::ExpectedExpression { found, line });
    };

    let expr = match token.kind {
        TokenKind::True => Expr::Literal(Literal::Bool(true)),
        TokenKind::False => Expr::Literal(Literal::Bool(false)),
        TokenKind::Null => Expr::Literal(Literal::Null),
        TokenKind::Number | TokenKind::String => match &token.literal {
            Some(literal) => Expr::Literal(literal.clone()),
            None => {
                return Err(ParseError::ExpectedExpression { found: token.lexeme.clone(),
                                                            line:  token.line, });
            },
        },
        TokenKind::Identifier => Expr::Variable { name: token.clone() },
        TokenKind::LeftParen => {
            tokens.next();
            let inner = parse_expression(tokens)?;
            expect(tokens, TokenKind::RightParen, "Expect ')' after expression")?;
            return Ok(Expr::Grouped(Box::new(inner)));
        },
        TokenKind::LeftBracket => {
            tokens.next();
            return parse_list_literal(tokens, token);
        },
        _ => {
            let (found, line) = location(Some(token));
            return Err(ParseError::ExpectedExpression { found, line });
        },
    };

    tokens.next();
    Ok(expr)
}

/// Parses the elements of a list literal after its opening bracket.
///
/// Grammar: `list := "[" (expression ("," expression)*)? "]"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `[`.
/// - `bracket`: The opening bracket token.
///
/// # Returns
/// An `Expr::List` holding the element expressions.
fn parse_list_literal<'a, I>(tokens: &mut Peekable<I>, bracket: &Token) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let (elements, _) = parse_comma_separated(tokens,
                                              parse_expression,
                                              TokenKind::RightBracket,
                                              "Expect ']' after list elements")?;

    Ok(Expr::List { elements,
                    bracket: bracket.clone() })
}
