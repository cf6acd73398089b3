use std::{
    io::Write,
    ops::{Mul, Sub},
    rc::Rc,
};

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        lexer::Token,
        value::core::Value,
    },
};

impl<W: Write> Interpreter<W> {
    /// Evaluates a binary operation.
    ///
    /// Both operands are evaluated, left first, before the operator is
    /// applied. `+` adds numbers or concatenates strings, the other
    /// arithmetic and ordering operators require numbers, equality accepts
    /// anything and `,` yields its right operand.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `operator`: The operator token, for error reporting.
    /// - `right`: Right operand expression.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use chonker::{
    ///     ast::{BinaryOperator, Expr, Literal},
    ///     interpreter::{
    ///         evaluator::core::Interpreter,
    ///         lexer::{Token, TokenKind},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut interpreter = Interpreter::new(std::io::sink());
    /// let plus = Token::synthetic(TokenKind::Plus, "+", 1);
    /// let left = Expr::Literal(Literal::from("chon"));
    /// let right = Expr::Literal(Literal::from("ker"));
    ///
    /// let result = interpreter.eval_binary(&left, BinaryOperator::Add, &plus, &right);
    /// assert_eq!(result.unwrap(), Value::from("chonker"));
    /// ```
    pub fn eval_binary(&mut self,
                       left: &Expr,
                       op: BinaryOperator,
                       operator: &Token,
                       right: &Expr)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Divide, Equal, Greater, GreaterEqual, Less, LessEqual, Multiply, NotEqual,
            Sequence, Subtract,
        };

        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match op {
            Sequence => Ok(right),
            Equal | NotEqual => Ok(Self::eval_equality(op, &left, &right)),
            Less => Self::eval_comparison(&left, &right, operator, f64::lt),
            LessEqual => Self::eval_comparison(&left, &right, operator, f64::le),
            Greater => Self::eval_comparison(&left, &right, operator, f64::gt),
            GreaterEqual => Self::eval_comparison(&left, &right, operator, f64::ge),
            Add => Self::eval_add(&left, &right, operator),
            Subtract => Self::eval_arithmetic(&left, &right, operator, f64::sub),
            Multiply => Self::eval_arithmetic(&left, &right, operator, f64::mul),
            Divide => Self::eval_divide(&left, &right, operator),
        }
    }

    /// Adds two numbers or concatenates two strings.
    ///
    /// # Errors
    /// Returns `InvalidAddition` for any other pair of operands.
    fn eval_add(left: &Value, right: &Value, operator: &Token) -> EvalResult<Value> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(Rc::from(format!("{a}{b}")))),
            _ => Err(RuntimeError::InvalidAddition { operator: operator.lexeme.clone(),
                                                     line:     operator.line, }),
        }
    }

    /// Applies `apply` to two numbers, as for `-` and `*`.
    ///
    /// # Errors
    /// Returns `OperandsMustBeNumbers` if either operand is not a number.
    fn eval_arithmetic(left: &Value,
                       right: &Value,
                       operator: &Token,
                       apply: fn(f64, f64) -> f64)
                       -> EvalResult<Value> {
        let (a, b) = numeric_operands(left, right, operator)?;
        Ok(Value::Number(apply(a, b)))
    }

    /// Divides two numbers.
    ///
    /// Only a divisor of exactly zero is an error; tiny divisors overflow to
    /// an infinity.
    ///
    /// # Errors
    /// - `OperandsMustBeNumbers` if either operand is not a number.
    /// - `DivisionByZero` when dividing by `0`.
    fn eval_divide(left: &Value, right: &Value, operator: &Token) -> EvalResult<Value> {
        let (a, b) = numeric_operands(left, right, operator)?;
        if b == 0.0 {
            return Err(RuntimeError::DivisionByZero { operator: operator.lexeme.clone(),
                                                      line:     operator.line, });
        }
        Ok(Value::Number(a / b))
    }
}

/// Extracts both operands as numbers.
///
/// # Errors
/// Returns `OperandsMustBeNumbers` unless both values are numbers.
pub(in crate::interpreter::evaluator) fn numeric_operands(left: &Value,
                                                          right: &Value,
                                                          operator: &Token)
                                                          -> EvalResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::OperandsMustBeNumbers { operator: operator.lexeme.clone(),
                                                       line:     operator.line, }),
    }
}
