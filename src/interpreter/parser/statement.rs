use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{DeclaredType, Expr, FunctionDecl, Literal, Param, Stmt},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            desugar::{parse_for, parse_switch, returns_value},
            utils::{
                advance_if, declared_type, expect, expect_type, expected, parse_comma_separated,
                peek_kind,
            },
        },
    },
};

/// Parses one declaration and appends the resulting statements to `out`.
///
/// A declaration is either a typed variable declaration, optionally
/// introduced by `var`, or any other statement. Variable declarations may
/// declare several names at once and therefore push more than one statement.
///
/// Grammar: `declaration := "var"? varDecl | statement`
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `out`: Statement list receiving the parsed statements.
/// - `errors`: Receives errors recovered from inside nested blocks.
///
/// # Errors
/// Propagates any error from the declaration or statement parsers.
pub fn parse_declaration<'a, I>(tokens: &mut Peekable<I>,
                                out: &mut Vec<Stmt>,
                                errors: &mut Vec<ParseError>)
                                -> ParseResult<()>
    where I: Iterator<Item = &'a Token>
{
    let has_var = advance_if(tokens, &[TokenKind::Var]).is_some();

    if has_var || peek_kind(tokens).is_variable_type() {
        let ty = expect_type(tokens, false, "Expect variable type")?;
        return parse_var_declaration(tokens, ty, out);
    }

    out.push(parse_statement(tokens, errors)?);
    Ok(())
}

/// Parses the rest of a variable declaration after its type keyword.
///
/// Several variables can be declared in one statement, separated by commas.
/// Each one becomes its own `Stmt::Var`. A type keyword after a comma
/// switches the type for the following names; otherwise the previous type is
/// reused. Missing initializers are replaced by the default value of the
/// type.
///
/// Grammar: `varDecl := type IDENT ("=" expression)? ("," type? IDENT ("=" expression)?)* ";"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first variable name.
/// - `ty`: The declared type of the first variable.
/// - `out`: Statement list receiving one `Stmt::Var` per name.
///
/// # Errors
/// Returns a `ParseError` if a name or the final `;` is missing.
pub fn parse_var_declaration<'a, I>(tokens: &mut Peekable<I>,
                                    mut ty: DeclaredType,
                                    out: &mut Vec<Stmt>)
                                    -> ParseResult<()>
    where I: Iterator<Item = &'a Token>
{
    loop {
        let name = expect(tokens, TokenKind::Identifier, "Expect variable name")?.clone();

        let initializer = if advance_if(tokens, &[TokenKind::Equal]).is_some() {
            parse_expression(tokens)?
        } else {
            default_initializer(ty, &name)
        };

        out.push(Stmt::Var { name,
                             ty,
                             initializer });

        if advance_if(tokens, &[TokenKind::Comma]).is_none() {
            break;
        }
        if let Some(next) = declared_type(peek_kind(tokens), false) {
            tokens.next();
            ty = next;
        }
    }

    expect(tokens, TokenKind::Semicolon, "Expect ';' after variable declaration")?;
    Ok(())
}

/// The value a variable holds when declared without an initializer.
fn default_initializer(ty: DeclaredType, name: &Token) -> Expr {
    match ty {
        DeclaredType::Number => Expr::Literal(Literal::Number(0.0)),
        DeclaredType::String => Expr::Literal(Literal::from("")),
        DeclaredType::Bool => Expr::Literal(Literal::Bool(false)),
        DeclaredType::List => {
            Expr::List { elements: Vec::new(),
                         bracket:  Token::synthetic(TokenKind::LeftBracket, "[", name.line), }
        },
        DeclaredType::Void | DeclaredType::Callable => Expr::Literal(Literal::Null),
    }
}

/// Parses a single statement.
///
/// Dispatches on the leading keyword; anything else is an expression
/// statement.
///
/// Grammar:
/// ```text
/// statement := printStmt | putsStmt | ifStmt | whileStmt | forStmt
///            | switchStmt | functionDecl | returnStmt | breakStmt
///            | block | expressionStmt
/// ```
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `errors`: Receives errors recovered from inside nested blocks.
///
/// # Returns
/// The parsed statement; `for` and `switch` come back already desugared.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              errors: &mut Vec<ParseError>)
                              -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let keyword = match peek_kind(tokens) {
        TokenKind::Print
        | TokenKind::Puts
        | TokenKind::If
        | TokenKind::While
        | TokenKind::For
        | TokenKind::Switch
        | TokenKind::Function
        | TokenKind::Return
        | TokenKind::Break
        | TokenKind::LeftBrace => tokens.next(),
        _ => None,
    };

    let Some(keyword) = keyword else {
        return parse_expression_statement(tokens);
    };

    match keyword.kind {
        TokenKind::Print => parse_print(tokens, false),
        TokenKind::Puts => parse_print(tokens, true),
        TokenKind::If => parse_if(tokens, errors),
        TokenKind::While => parse_while(tokens, errors),
        TokenKind::For => parse_for(tokens, errors),
        TokenKind::Switch => parse_switch(tokens, errors),
        TokenKind::Function => parse_function(tokens, errors),
        TokenKind::Return => parse_return(tokens, keyword),
        TokenKind::Break => {
            expect(tokens, TokenKind::Semicolon, "Expect ';' after 'break'")?;
            Ok(Stmt::Break { keyword: keyword.clone() })
        },
        _ => Ok(Stmt::Block(parse_block(tokens, errors)?)),
    }
}

/// Parses an expression followed by `;`.
///
/// # Errors
/// Returns a `ParseError` if the expression is malformed or the `;` is
/// missing.
pub fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let expr = parse_expression(tokens)?;
    expect(tokens, TokenKind::Semicolon, "Expect ';' after expression")?;
    Ok(Stmt::Expression(expr))
}

/// Parses `print value;` or `puts value;` after the keyword.
fn parse_print<'a, I>(tokens: &mut Peekable<I>, newline: bool) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let expr = parse_expression(tokens)?;
    expect(tokens, TokenKind::Semicolon, "Expect ';' after value")?;
    Ok(Stmt::Print { expr, newline })
}

/// Parses an `if` statement after the keyword.
///
/// Grammar: `ifStmt := "if" "(" expression ")" statement ("else" statement)?`
///
/// An `else` binds to the nearest `if`.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, errors: &mut Vec<ParseError>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::LeftParen, "Expect '(' after 'if'")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, TokenKind::RightParen, "Expect ')' after if condition")?;

    let then_branch = Box::new(parse_statement(tokens, errors)?);
    let else_branch = match advance_if(tokens, &[TokenKind::Else]) {
        Some(_) => Some(Box::new(parse_statement(tokens, errors)?)),
        None => None,
    };

    Ok(Stmt::If { condition,
                  then_branch,
                  else_branch })
}

/// Parses a `while` statement after the keyword.
///
/// Grammar: `whileStmt := "while" "(" expression ")" statement`
fn parse_while<'a, I>(tokens: &mut Peekable<I>, errors: &mut Vec<ParseError>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::LeftParen, "Expect '(' after 'while'")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, TokenKind::RightParen, "Expect ')' after condition")?;
    let body = Box::new(parse_statement(tokens, errors)?);

    Ok(Stmt::While { condition, body })
}

/// Parses a `return` statement after the keyword.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, keyword: &Token) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let value = if peek_kind(tokens) == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    expect(tokens, TokenKind::Semicolon, "Expect ';' after return value")?;

    Ok(Stmt::Return { keyword: keyword.clone(),
                      value })
}

/// Parses a function declaration after the `function` keyword.
///
/// A function with a non-void return type must contain at least one
/// `return` with a value somewhere in its body. Nested blocks, both branches
/// of an `if`, loop bodies and switch cases are all searched; nested function
/// declarations are not. The check is skipped when the body already had
/// errors of its own, since the missing return may sit in a skipped line.
///
/// Grammar:
/// ```text
/// functionDecl := "function" returnType IDENT "(" (type IDENT ("," type IDENT)*)? ")" block
/// returnType   := type | "void"
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the return type.
/// - `errors`: Receives errors recovered from inside the body.
///
/// # Returns
/// A `Stmt::Function` holding the shared declaration.
///
/// # Errors
/// - `Expected` for missing types, names, parentheses or braces.
/// - `MissingReturn` when a non-void function never returns a value.
fn parse_function<'a, I>(tokens: &mut Peekable<I>,
                         errors: &mut Vec<ParseError>)
                         -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let return_type = expect_type(tokens, true, "Expect return type")?;
    let name = expect(tokens, TokenKind::Identifier, "Expect function name")?.clone();
    expect(tokens, TokenKind::LeftParen, "Expect '(' after function name")?;

    let (params, _) = parse_comma_separated(tokens,
                                            parse_param,
                                            TokenKind::RightParen,
                                            "Expect ')' after parameters")?;

    if advance_if(tokens, &[TokenKind::LeftBrace]).is_none() {
        return Err(expected(tokens, "Expect '{' before function body"));
    }
    let errors_before = errors.len();
    let body = parse_block(tokens, errors)?;
    let body_failed = errors.len() > errors_before;

    if return_type != DeclaredType::Void && !body_failed && !body.iter().any(returns_value) {
        return Err(ParseError::MissingReturn { name: name.lexeme.clone(),
                                               return_type,
                                               line: name.line });
    }

    Ok(Stmt::Function(Rc::new(FunctionDecl { name,
                                             return_type,
                                             params,
                                             body })))
}

/// Parses one `type name` parameter.
fn parse_param<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Param>
    where I: Iterator<Item = &'a Token>
{
    let ty = expect_type(tokens, false, "Expect parameter type")?;
    let name = expect(tokens, TokenKind::Identifier, "Expect parameter name")?.clone();
    Ok(Param { name, ty })
}
