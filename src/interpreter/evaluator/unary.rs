use std::io::Write;

use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        lexer::Token,
        value::core::Value,
    },
};

impl<W: Write> Interpreter<W> {
    /// Evaluates a unary operation.
    ///
    /// `!` negates the truthiness of any value; `-` negates a number.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `operator`: The operator token, for error reporting.
    /// - `right`: The operand expression.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result.
    ///
    /// # Errors
    /// Returns `OperandMustBeNumber` when `-` is applied to a non-number.
    pub fn eval_unary(&mut self,
                      op: UnaryOperator,
                      operator: &Token,
                      right: &Expr)
                      -> EvalResult<Value> {
        let value = self.evaluate(right)?;

        match op {
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::OperandMustBeNumber { operator: operator.lexeme.clone(),
                                                             line:     operator.line, }),
            },
        }
    }
}
