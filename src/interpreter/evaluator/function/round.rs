use crate::interpreter::{
    evaluator::core::EvalResult,
    value::{callable::NativeCall, core::Value},
};

/// Rounds a number to the nearest integer.
///
/// Halfway cases round to the even neighbour, so `round(2.5)` is `2` and
/// `round(3.5)` is `4`. `null` rounds to `null`.
///
/// # Example
/// ```
/// use std::time::Instant;
///
/// use chonker::interpreter::{
///     evaluator::function::round::round,
///     value::{callable::NativeCall, core::Value},
/// };
///
/// let call = |x: f64| {
///     let args = [Value::Number(x)];
///     round(&NativeCall { args: &args, line: 1, started: Instant::now() }).unwrap()
/// };
///
/// assert_eq!(call(2.5), Value::Number(2.0));
/// assert_eq!(call(3.5), Value::Number(4.0));
/// assert_eq!(call(-1.2), Value::Number(-1.0));
/// ```
pub fn round(call: &NativeCall<'_>) -> EvalResult<Value> {
    match call.args.first() {
        Some(Value::Number(n)) => Ok(Value::Number(n.round_ties_even())),
        _ => Ok(Value::Null),
    }
}
