use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, Literal, Stmt},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            statement::{parse_expression_statement, parse_statement, parse_var_declaration},
            utils::{advance_if, expect, expect_type, expected, peek_kind},
        },
    },
};

/// Parses a `for` loop after the keyword and rewrites it into a `while`.
///
/// Grammar: `forStmt := "for" "(" (varDecl | expressionStmt | ";") expression? ";" expression? ")" statement`
///
/// # Errors
/// Returns a `ParseError` for a malformed header or body.
pub fn parse_for<'a, I>(tokens: &mut Peekable<I>, errors: &mut Vec<ParseError>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::LeftParen, "Expect '(' after 'for'")?;

    let mut initializer = Vec::new();
    if advance_if(tokens, &[TokenKind::Semicolon]).is_none() {
        let has_var = advance_if(tokens, &[TokenKind::Var]).is_some();
        if has_var || peek_kind(tokens).is_variable_type() {
            let ty = expect_type(tokens, false, "Expect variable type")?;
            parse_var_declaration(tokens, ty, &mut initializer)?;
        } else {
            initializer.push(parse_expression_statement(tokens)?);
        }
    }

    let condition = match peek_kind(tokens) {
        TokenKind::Semicolon => None,
        _ => Some(parse_expression(tokens)?),
    };
    expect(tokens, TokenKind::Semicolon, "Expect ';' after loop condition")?;

    let increment = match peek_kind(tokens) {
        TokenKind::RightParen => None,
        _ => Some(parse_expression(tokens)?),
    };
    expect(tokens, TokenKind::RightParen, "Expect ')' after for clauses")?;

    let body = parse_statement(tokens, errors)?;

    Ok(desugar_for(initializer, condition, increment, body))
}

/// Rewrites `for (init; condition; increment) body` into
/// `{ init; while (condition) { body; increment; } }`.
///
/// A missing condition loops forever. Without an initializer no enclosing
/// block is emitted, and without an increment the body is used as is.
///
/// # Example
/// ```
/// use chonker::{
///     ast::{Expr, Literal, Stmt},
///     interpreter::parser::desugar::desugar_for,
/// };
///
/// let body = Stmt::Break { keyword: chonker::interpreter::lexer::scan("break").unwrap()[0].clone() };
/// let lowered = desugar_for(Vec::new(), None, None, body.clone());
///
/// assert_eq!(lowered,
///            Stmt::While { condition: Expr::Literal(Literal::Bool(true)),
///                          body:      Box::new(body), });
/// ```
#[must_use]
pub fn desugar_for(initializer: Vec<Stmt>,
                   condition: Option<Expr>,
                   increment: Option<Expr>,
                   body: Stmt)
                   -> Stmt {
    let body = match increment {
        Some(increment) => Stmt::Block(vec![body, Stmt::Expression(increment)]),
        None => body,
    };

    let condition = condition.unwrap_or(Expr::Literal(Literal::Bool(true)));
    let lowered = Stmt::While { condition,
                                body: Box::new(body) };

    if initializer.is_empty() {
        return lowered;
    }

    let mut block = initializer;
    block.push(lowered);
    Stmt::Block(block)
}

/// Parses a `switch` statement after the keyword and rewrites it into an
/// `if` chain.
///
/// Each `case value:` becomes the condition `value == subject`, built with a
/// synthesized `==` token carrying the line of its `case`. The subject
/// expression is re-evaluated for every case that is tested.
///
/// Grammar:
/// ```text
/// switchStmt := "switch" "(" expression ")" "{" (caseArm | defaultArm)* "}"
/// caseArm    := "case" expression ":" statement
/// defaultArm := "default" ":" statement
/// ```
///
/// # Errors
/// - `DuplicateDefault` when a second `default` arm appears.
/// - `Expected` for a malformed header or arm.
pub fn parse_switch<'a, I>(tokens: &mut Peekable<I>,
                           errors: &mut Vec<ParseError>)
                           -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::LeftParen, "Expect '(' after 'switch'")?;
    let subject = parse_expression(tokens)?;
    expect(tokens, TokenKind::RightParen, "Expect ')' after expression in switch")?;
    expect(tokens, TokenKind::LeftBrace, "Expect '{' after switch()")?;

    let mut cases = Vec::new();
    let mut default = None;

    while !matches!(peek_kind(tokens), TokenKind::RightBrace | TokenKind::Eof) {
        let Some(label) = advance_if(tokens, &[TokenKind::Case, TokenKind::Default]) else {
            return Err(expected(tokens, "Expect either 'case' or 'default' in switch body"));
        };

        if label.kind == TokenKind::Case {
            let value = parse_expression(tokens)?;
            expect(tokens, TokenKind::Colon, "Expect ':' after case/default condition")?;
            let body = parse_statement(tokens, errors)?;

            let condition =
                Expr::Binary { left:     Box::new(value),
                               op:       BinaryOperator::Equal,
                               operator: Token::synthetic(TokenKind::EqualEqual, "==", label.line),
                               right:    Box::new(subject.clone()), };
            cases.push((condition, body));
            continue;
        }

        if default.is_some() {
            return Err(ParseError::DuplicateDefault { found: label.lexeme.clone(),
                                                      line:  label.line, });
        }
        expect(tokens, TokenKind::Colon, "Expect ':' after case/default condition")?;
        default = Some(parse_statement(tokens, errors)?);
    }

    expect(tokens, TokenKind::RightBrace, "Expect '}' after switch body")?;

    Ok(desugar_switch(cases, default))
}

/// Folds switch arms into a right-leaning `if` chain.
///
/// `[(c1, s1), (c2, s2)]` with default `d` becomes
/// `if (c1) s1 else if (c2) s2 else d`. A switch with no arms at all becomes
/// an empty block.
#[must_use]
pub fn desugar_switch(cases: Vec<(Expr, Stmt)>, default: Option<Stmt>) -> Stmt {
    cases.into_iter()
         .rev()
         .fold(default, |chain, (condition, body)| {
             Some(Stmt::If { condition,
                             then_branch: Box::new(body),
                             else_branch: chain.map(Box::new) })
         })
         .unwrap_or_else(|| Stmt::Block(Vec::new()))
}

/// Returns `true` if `stmt` contains a `return` with a value.
///
/// Blocks, both branches of an `if`, loop bodies and switch arms are
/// searched. Nested function declarations are not, since their returns
/// belong to them.
#[must_use]
pub fn returns_value(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return { value, .. } => value.is_some(),
        Stmt::Block(statements) => statements.iter().any(returns_value),
        Stmt::If { then_branch,
                   else_branch,
                   .. } => returns_value(then_branch) || else_branch.as_deref().is_some_and(returns_value),
        Stmt::While { body, .. } => returns_value(body),
        Stmt::Switch { cases, default } => {
            cases.iter().any(|(_, body)| returns_value(body)) || default.as_deref().is_some_and(returns_value)
        },
        Stmt::Expression(_) | Stmt::Print { .. } | Stmt::Var { .. } | Stmt::Function(_) | Stmt::Break { .. } => false,
    }
}
