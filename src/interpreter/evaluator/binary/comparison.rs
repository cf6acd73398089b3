use std::io::Write;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::core::numeric_operands,
            core::{EvalResult, Interpreter},
        },
        lexer::Token,
        value::core::Value,
    },
};

impl<W: Write> Interpreter<W> {
    /// Evaluates `==` or `!=`.
    ///
    /// Values of different kinds are never equal, `null` equals only `null`,
    /// and lists and functions are equal only to themselves.
    ///
    /// # Example
    /// ```
    /// use chonker::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// type Eval = Interpreter<std::io::Sink>;
    ///
    /// assert_eq!(Eval::eval_equality(BinaryOperator::Equal, &Value::Null, &Value::Null),
    ///            Value::Bool(true));
    /// assert_eq!(Eval::eval_equality(BinaryOperator::NotEqual, &Value::Null, &Value::from(0.0)),
    ///            Value::Bool(true));
    /// ```
    #[must_use]
    pub fn eval_equality(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        let equal = left == right;
        Value::Bool(if op == BinaryOperator::Equal { equal } else { !equal })
    }

    /// Orders two numbers with `compare`, as for `<`, `<=`, `>` and `>=`.
    ///
    /// # Errors
    /// Returns `OperandsMustBeNumbers` unless both operands are numbers.
    ///
    /// # Example
    /// ```
    /// use chonker::interpreter::{
    ///     evaluator::core::Interpreter,
    ///     lexer::{Token, TokenKind},
    ///     value::core::Value,
    /// };
    ///
    /// type Eval = Interpreter<std::io::Sink>;
    /// let less = Token::synthetic(TokenKind::Less, "<", 1);
    ///
    /// let ordered = Eval::eval_comparison(&Value::from(1.0), &Value::from(2.0), &less, f64::lt);
    /// assert_eq!(ordered.unwrap(), Value::Bool(true));
    /// assert!(Eval::eval_comparison(&Value::from("a"), &Value::from(2.0), &less, f64::lt).is_err());
    /// ```
    pub fn eval_comparison(left: &Value,
                           right: &Value,
                           operator: &Token,
                           compare: fn(&f64, &f64) -> bool)
                           -> EvalResult<Value> {
        let (a, b) = numeric_operands(left, right, operator)?;
        Ok(Value::Bool(compare(&a, &b)))
    }
}
