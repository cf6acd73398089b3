use std::io::Write;

use crate::{
    ast::{Expr, LogicalOperator},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl<W: Write> Interpreter<W> {
    /// Evaluates `&&` or `||` with short-circuiting.
    ///
    /// The result is one of the operands, not a coerced boolean: `||` yields
    /// the left operand when it is truthy and the right one otherwise, `&&`
    /// yields the left operand when it is falsy and the right one otherwise.
    /// The right operand is only evaluated when it becomes the result.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The logical operator.
    /// - `right`: Right operand expression.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the selected operand.
    pub fn eval_logical(&mut self,
                        left: &Expr,
                        op: LogicalOperator,
                        right: &Expr)
                        -> EvalResult<Value> {
        let left = self.evaluate(left)?;

        let short_circuits = match op {
            LogicalOperator::Or => left.is_truthy(),
            LogicalOperator::And => !left.is_truthy(),
        };

        if short_circuits { Ok(left) } else { self.evaluate(right) }
    }
}
