use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            unary::parse_unary,
            utils::{advance_if, expect},
        },
    },
};

/// Parses an assignment expression.
///
/// The left side is parsed as an ordinary expression first; only when an `=`
/// follows is it checked to be a plain variable. Assignment is
/// right-associative, so `a = b = 1` assigns `1` to both.
///
/// The rule is: `assignment := ternary ("=" assignment)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An `Expr::Assign` node, or the plain expression if no `=` follows.
///
/// # Errors
/// - `InvalidAssignmentTarget` if the left side is not a variable.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let target = parse_ternary(tokens)?;

    let Some(equals) = advance_if(tokens, &[TokenKind::Equal]) else {
        return Ok(target);
    };

    let value = parse_assignment(tokens)?;

    match target {
        Expr::Variable { name } => Ok(Expr::Assign { name,
                                                     value: Box::new(value) }),
        _ => Err(ParseError::InvalidAssignmentTarget { found: equals.lexeme.clone(),
                                                       line:  equals.line, }),
    }
}

/// Parses a conditional expression.
///
/// The rule is: `ternary := or ("?" or ":" ternary)?`
///
/// The `else` branch may itself be a ternary, so `a ? b : c ? d : e` groups
/// as `a ? b : (c ? d : e)`.
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An `Expr::Ternary` node, or the condition alone if no `?` follows.
pub fn parse_ternary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let condition = parse_logical_or(tokens)?;

    if advance_if(tokens, &[TokenKind::Question]).is_none() {
        return Ok(condition);
    }

    let then_branch = parse_logical_or(tokens)?;
    expect(tokens, TokenKind::Colon, "Expect ':' in ternary expression")?;
    let else_branch = parse_ternary(tokens)?;

    Ok(Expr::Ternary { condition:   Box::new(condition),
                       then_branch: Box::new(then_branch),
                       else_branch: Box::new(else_branch), })
}

/// Parses logical OR expressions.
///
/// The rule is: `or := and ("||" and)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A left-associative chain of `Expr::Logical` nodes.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_logical_and(tokens)?;

    while let Some(operator) = advance_if(tokens, &[TokenKind::Or]) {
        let right = parse_logical_and(tokens)?;
        left = Expr::Logical { left:     Box::new(left),
                               op:       LogicalOperator::Or,
                               operator: operator.clone(),
                               right:    Box::new(right), };
    }

    Ok(left)
}

/// Parses logical AND expressions.
///
/// The rule is: `and := equality ("&&" equality)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A left-associative chain of `Expr::Logical` nodes.
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_equality(tokens)?;

    while let Some(operator) = advance_if(tokens, &[TokenKind::And]) {
        let right = parse_equality(tokens)?;
        left = Expr::Logical { left:     Box::new(left),
                               op:       LogicalOperator::And,
                               operator: operator.clone(),
                               right:    Box::new(right), };
    }

    Ok(left)
}

/// Parses `==` and `!=`.
///
/// The rule is: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_binary_level(tokens,
                       &[TokenKind::EqualEqual, TokenKind::BangEqual],
                       parse_comparison)
}

/// Parses `<`, `<=`, `>` and `>=`.
///
/// The rule is: `comparison := additive (("<" | ">" | "<=" | ">=") additive)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_binary_level(tokens,
                       &[TokenKind::Less,
                         TokenKind::LessEqual,
                         TokenKind::Greater,
                         TokenKind::GreaterEqual],
                       parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_binary_level(tokens,
                       &[TokenKind::Plus, TokenKind::Minus],
                       parse_multiplicative)
}

/// Parses multiplication and division expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_binary_level(tokens, &[TokenKind::Star, TokenKind::Slash], parse_unary)
}

/// Parses one left-associative precedence level.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `operators`: Token kinds accepted at this level.
/// - `operand`: Parser for the next tighter level.
///
/// # Returns
/// A left-associative chain of `Expr::Binary` nodes.
fn parse_binary_level<'a, I>(tokens: &mut Peekable<I>,
                             operators: &[TokenKind],
                             operand: fn(&mut Peekable<I>) -> ParseResult<Expr>)
                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = operand(tokens)?;

    while let Some(operator) = tokens.peek().copied()
          && let Some(op) = token_to_binary_operator(operator.kind)
          && operators.contains(&operator.kind)
    {
        tokens.next();
        let right = operand(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              operator: operator.clone(),
                              right: Box::new(right) };
    }

    Ok(left)
}

/// Maps a token kind to its binary operator, if it is one.
///
/// # Example
/// ```
/// use chonker::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(TokenKind::Slash), Some(BinaryOperator::Divide));
/// assert_eq!(token_to_binary_operator(TokenKind::And), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        TokenKind::Star => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::Comma => Some(BinaryOperator::Sequence),
        _ => None,
    }
}
